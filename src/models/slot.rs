use super::business::Business;
use super::datetime::{deserialize_flexible, deserialize_flexible_opt};
use super::service::Service;
use super::staff::Staff;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A server-computed candidate start time, valid only for the
/// (staff, service, date) triple it was fetched for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvailableSlot {
    /// Display label, e.g. `"09:30"`
    pub time: String,
    #[serde(deserialize_with = "deserialize_flexible")]
    pub datetime: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SlotsResponse {
    pub slots: Vec<AvailableSlot>,
}

/// The dependency triple an availability lookup is made for.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SlotQuery {
    pub staff_id: String,
    pub service_id: String,
    pub date: NaiveDate,
}

impl SlotQuery {
    pub fn query_pairs(&self) -> [(&'static str, String); 3] {
        [
            ("staff_id", self.staff_id.clone()),
            ("service_id", self.service_id.clone()),
            ("date", self.date.format("%Y-%m-%d").to_string()),
        ]
    }
}

/// Response of `GET /api/agenda/public/{slug}`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PublicBusiness {
    pub business: Business,
    #[serde(default)]
    pub services: Vec<Service>,
    #[serde(default)]
    pub staff: Vec<Staff>,
}

/// Body of `POST /api/agenda/public/{slug}/book`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookingRequest {
    pub client_name: String,
    pub client_email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_phone: Option<String>,
    pub service_id: String,
    pub staff_id: String,
    pub start_time: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BookingConfirmation {
    pub appointment_id: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default, deserialize_with = "deserialize_flexible_opt")]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "deserialize_flexible_opt")]
    pub end_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub service: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_slots_response_parsing() {
        let json = r#"{"slots": [
            {"time": "09:00", "datetime": "2024-03-14T09:00:00+00:00"},
            {"time": "09:30", "datetime": "2024-03-14T09:30:00+00:00"}
        ]}"#;
        let parsed: SlotsResponse = serde_json::from_str(json).unwrap();

        assert_eq!(parsed.slots.len(), 2);
        assert_eq!(parsed.slots[1].time, "09:30");
        assert_eq!(
            parsed.slots[1].datetime,
            Utc.with_ymd_and_hms(2024, 3, 14, 9, 30, 0).unwrap()
        );
    }

    #[test]
    fn test_query_pairs_format_date() {
        let query = SlotQuery {
            staff_id: "staff_1".into(),
            service_id: "service_1".into(),
            date: NaiveDate::from_ymd_opt(2024, 3, 4).unwrap(),
        };
        assert_eq!(query.query_pairs()[2], ("date", "2024-03-04".to_string()));
    }

    #[test]
    fn test_booking_request_omits_missing_phone() {
        let request = BookingRequest {
            client_name: "Ana".into(),
            client_email: "ana@example.com".into(),
            client_phone: None,
            service_id: "s".into(),
            staff_id: "st".into(),
            start_time: Utc.with_ymd_and_hms(2024, 3, 14, 9, 0, 0).unwrap(),
        };
        let json = serde_json::to_value(&request).unwrap();

        assert!(json.get("client_phone").is_none());
        assert_eq!(json["start_time"], "2024-03-14T09:00:00Z");
    }

    #[test]
    fn test_confirmation_parsing() {
        let json = r#"{
            "message": "Booking confirmed!",
            "appointment_id": "apt_123456789abc",
            "start_time": "2024-03-14T09:00:00+00:00",
            "end_time": "2024-03-14T09:30:00+00:00",
            "service": "Haircut"
        }"#;
        let parsed: BookingConfirmation = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.appointment_id, "apt_123456789abc");
        assert_eq!(parsed.service.as_deref(), Some("Haircut"));
    }
}
