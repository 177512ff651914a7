use super::datetime::{deserialize_flexible, deserialize_flexible_opt};
use super::error::AppError;
use crate::utils::validation::optional;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle of an appointment. `Completed` and `Canceled` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    #[default]
    Scheduled,
    Completed,
    Canceled,
}

impl AppointmentStatus {
    pub const fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Scheduled, Self::Completed | Self::Canceled)
        )
    }

    pub const fn is_terminal(self) -> bool {
        !matches!(self, Self::Scheduled)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Scheduled => "scheduled",
            Self::Completed => "completed",
            Self::Canceled => "canceled",
        }
    }

    /// Returns CSS class name for color coding
    pub fn css_class(&self) -> &'static str {
        match self {
            Self::Scheduled => "status-scheduled",
            Self::Completed => "status-completed",
            Self::Canceled => "status-canceled",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    pub appointment_id: String,
    pub client_id: String,
    pub service_id: String,
    pub staff_id: String,
    #[serde(deserialize_with = "deserialize_flexible")]
    pub start_time: DateTime<Utc>,
    #[serde(default, deserialize_with = "deserialize_flexible_opt")]
    pub end_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub status: AppointmentStatus,
    #[serde(default)]
    pub notes: Option<String>,
}

impl Appointment {
    /// Builds the status change request, refusing transitions out of a
    /// terminal state before anything is sent.
    pub fn status_update(&self, next: AppointmentStatus) -> Result<AppointmentUpdate, AppError> {
        if !self.status.can_transition_to(next) {
            return Err(AppError::validation(format!(
                "Cannot change a {} appointment to {}",
                self.status.label(),
                next.label()
            )));
        }

        Ok(AppointmentUpdate {
            status: Some(next),
            ..Default::default()
        })
    }
}

/// Body of `POST .../appointments`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewAppointment {
    pub client_id: String,
    pub service_id: String,
    pub staff_id: String,
    pub start_time: DateTime<Utc>,
    pub notes: Option<String>,
}

/// Body of `PUT .../appointments/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AppointmentUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<AppointmentStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Format of the `datetime-local` input used by the creation modal.
pub const LOCAL_INPUT_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// Same input once a `step` below a minute adds seconds.
const LOCAL_INPUT_FORMAT_SECONDS: &str = "%Y-%m-%dT%H:%M:%S";

/// Parses a `datetime-local` value, with or without seconds.
pub fn parse_local_input(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    NaiveDateTime::parse_from_str(value, LOCAL_INPUT_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(value, LOCAL_INPUT_FORMAT_SECONDS))
        .ok()
}

/// Editor state of the new-appointment modal.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppointmentForm {
    pub client_id: String,
    pub service_id: String,
    pub staff_id: String,
    /// Local wall-clock start, `YYYY-MM-DDTHH:MM`
    pub start: String,
    pub notes: String,
}

impl AppointmentForm {
    /// Prefill for a click on the (date, hour) cell of the week grid.
    pub fn at(date: NaiveDate, hour: u32, default_staff: Option<&str>) -> Self {
        let start = NaiveTime::from_hms_opt(hour, 0, 0)
            .map(|t| date.and_time(t).format(LOCAL_INPUT_FORMAT).to_string())
            .unwrap_or_default();

        Self {
            staff_id: default_staff.unwrap_or_default().to_string(),
            start,
            ..Default::default()
        }
    }

    /// Validates the modal and converts its local start time to UTC.
    pub fn validate<Tz: TimeZone>(&self, tz: &Tz) -> Result<NewAppointment, AppError> {
        if self.client_id.is_empty() {
            return Err(AppError::validation("Select a client"));
        }
        if self.service_id.is_empty() {
            return Err(AppError::validation("Select a service"));
        }
        if self.staff_id.is_empty() {
            return Err(AppError::validation("Select a staff member"));
        }

        let local = parse_local_input(&self.start)
            .ok_or_else(|| AppError::validation("Enter a valid date and time"))?;
        let start_time = tz
            .from_local_datetime(&local)
            .earliest()
            .ok_or_else(|| AppError::validation("That time does not exist in your timezone"))?
            .with_timezone(&Utc);

        Ok(NewAppointment {
            client_id: self.client_id.clone(),
            service_id: self.service_id.clone(),
            staff_id: self.staff_id.clone(),
            start_time,
            notes: optional(&self.notes),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    fn appointment(status: AppointmentStatus) -> Appointment {
        Appointment {
            appointment_id: "apt_1".into(),
            client_id: "c".into(),
            service_id: "s".into(),
            staff_id: "st".into(),
            start_time: Utc.with_ymd_and_hms(2024, 3, 14, 10, 0, 0).unwrap(),
            end_time: None,
            status,
            notes: None,
        }
    }

    #[test]
    fn test_only_scheduled_can_transition() {
        use AppointmentStatus::*;

        assert!(Scheduled.can_transition_to(Completed));
        assert!(Scheduled.can_transition_to(Canceled));
        assert!(!Scheduled.can_transition_to(Scheduled));
        assert!(!Completed.can_transition_to(Canceled));
        assert!(!Canceled.can_transition_to(Scheduled));
        assert!(!Canceled.can_transition_to(Completed));
    }

    #[test]
    fn test_status_update_body() {
        let update = appointment(AppointmentStatus::Scheduled)
            .status_update(AppointmentStatus::Completed)
            .unwrap();
        assert_eq!(
            serde_json::to_value(update).unwrap(),
            serde_json::json!({"status": "completed"})
        );

        assert!(
            appointment(AppointmentStatus::Canceled)
                .status_update(AppointmentStatus::Completed)
                .is_err()
        );
    }

    #[test]
    fn test_parses_naive_backend_timestamps() {
        let json = r#"{
            "appointment_id": "apt_abc",
            "business_id": "biz_1",
            "client_id": "client_1",
            "service_id": "service_1",
            "staff_id": "staff_1",
            "start_time": "2024-03-14T10:00:00",
            "end_time": "2024-03-14T10:30:00",
            "status": "completed",
            "notes": null
        }"#;
        let apt: Appointment = serde_json::from_str(json).unwrap();

        assert_eq!(apt.status, AppointmentStatus::Completed);
        assert_eq!(apt.start_time, Utc.with_ymd_and_hms(2024, 3, 14, 10, 0, 0).unwrap());
        assert!(apt.end_time.is_some());
    }

    #[test]
    fn test_form_prefill_and_local_conversion() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 14).unwrap();
        let mut form = AppointmentForm::at(date, 9, Some("staff_1"));
        assert_eq!(form.start, "2024-03-14T09:00");
        assert_eq!(form.staff_id, "staff_1");

        form.client_id = "client_1".into();
        form.service_id = "service_1".into();

        let brt = FixedOffset::west_opt(3 * 3600).unwrap();
        let request = form.validate(&brt).unwrap();
        assert_eq!(request.start_time, Utc.with_ymd_and_hms(2024, 3, 14, 12, 0, 0).unwrap());
        assert_eq!(request.notes, None);
    }

    #[test]
    fn test_form_accepts_seconds_in_start() {
        let form = AppointmentForm {
            client_id: "client_1".into(),
            service_id: "service_1".into(),
            staff_id: "staff_1".into(),
            start: "2024-03-14T09:15:30".into(),
            ..AppointmentForm::default()
        };
        let request = form.validate(&Utc).unwrap();
        assert_eq!(request.start_time, Utc.with_ymd_and_hms(2024, 3, 14, 9, 15, 30).unwrap());

        assert!(parse_local_input("2024-03-14T09:15").is_some());
        assert!(parse_local_input("2024-03-14 09:15").is_none());
    }

    #[test]
    fn test_form_requires_selections() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 14).unwrap();
        let form = AppointmentForm::at(date, 9, None);
        assert_eq!(
            form.validate(&Utc).unwrap_err(),
            AppError::ValidationError("Select a client".into())
        );
    }
}
