use super::appointment::Appointment;
use serde::Deserialize;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DashboardStats {
    #[serde(default)]
    pub today: u32,
    #[serde(default)]
    pub this_week: u32,
    #[serde(default)]
    pub this_month: u32,
    #[serde(default)]
    pub total_clients: u32,
}

/// Response of `GET .../dashboard`: aggregate counts plus today's and the
/// upcoming week's appointments, both sorted by start time.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DashboardSummary {
    #[serde(default)]
    pub stats: DashboardStats,
    #[serde(default)]
    pub today_appointments: Vec<Appointment>,
    #[serde(default)]
    pub upcoming_appointments: Vec<Appointment>,
}

impl DashboardSummary {
    pub fn upcoming(&self, limit: usize) -> &[Appointment] {
        let end = self.upcoming_appointments.len().min(limit);
        &self.upcoming_appointments[..end]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dashboard_parsing_and_upcoming_limit() {
        let apt = |id: &str| {
            serde_json::json!({
                "appointment_id": id,
                "client_id": "c",
                "service_id": "s",
                "staff_id": "st",
                "start_time": "2024-03-14T10:00:00",
                "status": "scheduled"
            })
        };
        let json = serde_json::json!({
            "stats": {"today": 2, "this_week": 5, "this_month": 9, "total_clients": 14},
            "today_appointments": [apt("a")],
            "upcoming_appointments": [apt("b"), apt("c"), apt("d"), apt("e"), apt("f"), apt("g")]
        });

        let summary: DashboardSummary = serde_json::from_value(json).unwrap();
        assert_eq!(summary.stats.total_clients, 14);
        assert_eq!(summary.upcoming(5).len(), 5);
        assert_eq!(summary.upcoming(5)[0].appointment_id, "b");
        assert_eq!(summary.upcoming(50).len(), 6);
    }

    #[test]
    fn test_missing_stats_default_to_zero() {
        let summary: DashboardSummary = serde_json::from_str("{}").unwrap();
        assert_eq!(summary.stats, DashboardStats::default());
        assert!(summary.upcoming(5).is_empty());
    }
}
