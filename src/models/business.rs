use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Days used as keys of the working-hours map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    /// All days in the order the settings page lists them.
    pub fn all() -> &'static [Weekday] {
        &[
            Weekday::Monday,
            Weekday::Tuesday,
            Weekday::Wednesday,
            Weekday::Thursday,
            Weekday::Friday,
            Weekday::Saturday,
            Weekday::Sunday,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
            Weekday::Saturday => "Saturday",
            Weekday::Sunday => "Sunday",
        }
    }
}

impl From<chrono::Weekday> for Weekday {
    fn from(day: chrono::Weekday) -> Self {
        match day {
            chrono::Weekday::Mon => Weekday::Monday,
            chrono::Weekday::Tue => Weekday::Tuesday,
            chrono::Weekday::Wed => Weekday::Wednesday,
            chrono::Weekday::Thu => Weekday::Thursday,
            chrono::Weekday::Fri => Weekday::Friday,
            chrono::Weekday::Sat => Weekday::Saturday,
            chrono::Weekday::Sun => Weekday::Sunday,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DaySchedule {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_start")]
    pub start: String,
    #[serde(default = "default_end")]
    pub end: String,
}

fn default_start() -> String {
    "09:00".to_string()
}

fn default_end() -> String {
    "18:00".to_string()
}

impl DaySchedule {
    pub fn open(start: &str, end: &str) -> Self {
        Self {
            enabled: true,
            start: start.to_string(),
            end: end.to_string(),
        }
    }

    pub fn closed() -> Self {
        Self {
            enabled: false,
            start: "00:00".to_string(),
            end: "00:00".to_string(),
        }
    }
}

/// Per-weekday opening hours. Entries are only meaningful when `enabled`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkingHours(BTreeMap<Weekday, DaySchedule>);

impl Default for WorkingHours {
    fn default() -> Self {
        let mut days = BTreeMap::new();
        for day in &Weekday::all()[..5] {
            days.insert(*day, DaySchedule::open("09:00", "18:00"));
        }
        days.insert(Weekday::Saturday, DaySchedule::open("09:00", "13:00"));
        days.insert(Weekday::Sunday, DaySchedule::closed());
        Self(days)
    }
}

impl WorkingHours {
    pub fn empty() -> Self {
        Self(BTreeMap::new())
    }

    pub fn get(&self, day: Weekday) -> Option<&DaySchedule> {
        self.0.get(&day)
    }

    /// The schedule for `day`, or a closed placeholder when none is configured.
    pub fn schedule(&self, day: Weekday) -> DaySchedule {
        self.0.get(&day).cloned().unwrap_or_else(|| DaySchedule {
            enabled: false,
            start: default_start(),
            end: default_end(),
        })
    }

    pub fn is_open(&self, day: Weekday) -> bool {
        self.0.get(&day).is_some_and(|s| s.enabled)
    }

    /// Days with an enabled schedule, Monday first.
    pub fn open_days(&self) -> Vec<Weekday> {
        Weekday::all()
            .iter()
            .copied()
            .filter(|d| self.is_open(*d))
            .collect()
    }

    pub fn set_enabled(&mut self, day: Weekday, enabled: bool) {
        self.entry(day).enabled = enabled;
    }

    pub fn set_start(&mut self, day: Weekday, start: impl Into<String>) {
        self.entry(day).start = start.into();
    }

    pub fn set_end(&mut self, day: Weekday, end: impl Into<String>) {
        self.entry(day).end = end.into();
    }

    fn entry(&mut self, day: Weekday) -> &mut DaySchedule {
        self.0.entry(day).or_insert_with(|| DaySchedule {
            enabled: false,
            start: default_start(),
            end: default_end(),
        })
    }
}

fn default_plan() -> String {
    "basic".to_string()
}

/// A tenant of the scheduling application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Business {
    pub business_id: String,
    #[serde(default)]
    pub owner_id: Option<String>,
    pub name: String,
    pub slug: String,
    pub timezone: String,
    #[serde(default = "WorkingHours::empty")]
    pub working_hours: WorkingHours,
    #[serde(default)]
    pub logo_url: Option<String>,
    #[serde(default = "default_plan")]
    pub plan: String,
}

impl Business {
    /// Public booking link for this business, e.g. `https://host/agenda/marias-hair-salon`.
    pub fn booking_url(&self, origin: &str) -> String {
        format!("{}/agenda/{}", origin.trim_end_matches('/'), self.slug)
    }

    /// Merges a successfully saved update into this business.
    pub fn apply_update(&mut self, update: &BusinessUpdate) {
        if let Some(name) = &update.name {
            self.name.clone_from(name);
        }
        if let Some(timezone) = &update.timezone {
            self.timezone.clone_from(timezone);
        }
        if let Some(hours) = &update.working_hours {
            self.working_hours = hours.clone();
        }
        if let Some(logo) = &update.logo_url {
            self.logo_url = Some(logo.clone());
        }
    }
}

/// Body of `POST /api/agenda/businesses`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewBusiness {
    pub name: String,
    pub slug: String,
    pub timezone: String,
}

/// Body of `PUT /api/agenda/businesses/{id}`; absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BusinessUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub working_hours: Option<WorkingHours>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
}

/// Timezones offered during onboarding and in settings, with display labels.
pub const TIMEZONES: [(&str, &str); 7] = [
    ("America/New_York", "Eastern Time (ET)"),
    ("America/Chicago", "Central Time (CT)"),
    ("America/Denver", "Mountain Time (MT)"),
    ("America/Los_Angeles", "Pacific Time (PT)"),
    ("America/Sao_Paulo", "Brasilia Time (BRT)"),
    ("Europe/London", "London (GMT)"),
    ("Europe/Paris", "Paris (CET)"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_hours_match_backend() {
        let hours = WorkingHours::default();
        assert_eq!(hours.open_days().len(), 6);
        assert!(!hours.is_open(Weekday::Sunday));
        assert_eq!(hours.schedule(Weekday::Saturday).end, "13:00");
        assert_eq!(hours.schedule(Weekday::Monday).start, "09:00");
    }

    #[test]
    fn test_working_hours_wire_format() {
        let json = r#"{
            "monday": {"start": "10:00", "end": "16:00", "enabled": true},
            "sunday": {"start": "00:00", "end": "00:00", "enabled": false}
        }"#;
        let hours: WorkingHours = serde_json::from_str(json).unwrap();

        assert_eq!(hours.open_days(), vec![Weekday::Monday]);
        assert_eq!(hours.get(Weekday::Monday).unwrap().start, "10:00");
        assert!(hours.get(Weekday::Tuesday).is_none());

        let back = serde_json::to_value(&hours).unwrap();
        assert_eq!(back["monday"]["enabled"], true);
    }

    #[test]
    fn test_editing_unconfigured_day_creates_entry() {
        let mut hours = WorkingHours::empty();
        hours.set_enabled(Weekday::Wednesday, true);
        hours.set_end(Weekday::Wednesday, "20:00");

        let wed = hours.schedule(Weekday::Wednesday);
        assert!(wed.enabled);
        assert_eq!(wed.start, "09:00");
        assert_eq!(wed.end, "20:00");
    }

    #[test]
    fn test_business_parses_without_optional_fields() {
        let json = r#"{
            "business_id": "biz_1",
            "name": "Maria's Hair Salon",
            "slug": "marias-hair-salon",
            "timezone": "America/Sao_Paulo"
        }"#;
        let business: Business = serde_json::from_str(json).unwrap();

        assert_eq!(business.plan, "basic");
        assert!(business.working_hours.open_days().is_empty());
        assert_eq!(
            business.booking_url("https://corella.com/"),
            "https://corella.com/agenda/marias-hair-salon"
        );
    }

    #[test]
    fn test_apply_update_merges_only_present_fields() {
        let mut business = Business {
            business_id: "biz_1".into(),
            owner_id: None,
            name: "Old".into(),
            slug: "old".into(),
            timezone: "Europe/London".into(),
            working_hours: WorkingHours::default(),
            logo_url: None,
            plan: "basic".into(),
        };

        business.apply_update(&BusinessUpdate {
            name: Some("New".into()),
            ..Default::default()
        });

        assert_eq!(business.name, "New");
        assert_eq!(business.timezone, "Europe/London");
        assert_eq!(business.slug, "old");
    }

    #[test]
    fn test_update_omits_absent_fields() {
        let update = BusinessUpdate {
            timezone: Some("Europe/Paris".into()),
            ..Default::default()
        };
        let json = serde_json::to_value(&update).unwrap();
        assert_eq!(json, serde_json::json!({"timezone": "Europe/Paris"}));
    }
}
