use super::business::{Business, BusinessUpdate, Weekday, WorkingHours};
use super::error::AppError;
use crate::utils::validation::require_non_empty;

/// Editable copy of a business's settings.
#[derive(Debug, Clone, PartialEq)]
pub struct SettingsForm {
    pub name: String,
    pub timezone: String,
    pub working_hours: WorkingHours,
}

impl SettingsForm {
    /// Businesses saved before hours were configured fall back to the default week.
    pub fn from_business(business: &Business) -> Self {
        let working_hours = if business.working_hours == WorkingHours::empty() {
            WorkingHours::default()
        } else {
            business.working_hours.clone()
        };

        Self {
            name: business.name.clone(),
            timezone: business.timezone.clone(),
            working_hours,
        }
    }

    pub fn toggle_day(&mut self, day: Weekday) {
        let enabled = self.working_hours.is_open(day);
        self.working_hours.set_enabled(day, !enabled);
    }

    pub fn set_start(&mut self, day: Weekday, start: impl Into<String>) {
        self.working_hours.set_start(day, start);
    }

    pub fn set_end(&mut self, day: Weekday, end: impl Into<String>) {
        self.working_hours.set_end(day, end);
    }

    pub fn to_update(&self) -> Result<BusinessUpdate, AppError> {
        for day in self.working_hours.open_days() {
            let schedule = self.working_hours.schedule(day);
            if schedule.start >= schedule.end {
                return Err(AppError::validation(format!(
                    "{} closes before it opens",
                    day.label()
                )));
            }
        }

        Ok(BusinessUpdate {
            name: Some(require_non_empty(&self.name, "Business name")?),
            timezone: Some(self.timezone.clone()),
            working_hours: Some(self.working_hours.clone()),
            logo_url: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn business(hours: WorkingHours) -> Business {
        Business {
            business_id: "biz_1".into(),
            owner_id: None,
            name: "Maria's Hair Salon".into(),
            slug: "marias-hair-salon".into(),
            timezone: "America/New_York".into(),
            working_hours: hours,
            logo_url: None,
            plan: "basic".into(),
        }
    }

    #[test]
    fn test_missing_hours_fall_back_to_defaults() {
        let form = SettingsForm::from_business(&business(WorkingHours::empty()));
        assert_eq!(form.working_hours, WorkingHours::default());
    }

    #[test]
    fn test_toggle_and_edit_day() {
        let mut form = SettingsForm::from_business(&business(WorkingHours::default()));
        form.toggle_day(Weekday::Sunday);
        form.set_start(Weekday::Sunday, "10:00");
        form.set_end(Weekday::Sunday, "14:00");
        form.toggle_day(Weekday::Monday);

        let update = form.to_update().unwrap();
        let hours = update.working_hours.unwrap();
        assert!(hours.is_open(Weekday::Sunday));
        assert_eq!(hours.schedule(Weekday::Sunday).start, "10:00");
        assert!(!hours.is_open(Weekday::Monday));
    }

    #[test]
    fn test_update_merges_into_business() {
        let mut owned = business(WorkingHours::default());
        let mut form = SettingsForm::from_business(&owned);
        form.name = "  Maria's Studio ".into();
        form.timezone = "Europe/London".into();

        let update = form.to_update().unwrap();
        owned.apply_update(&update);
        assert_eq!(owned.name, "Maria's Studio");
        assert_eq!(owned.timezone, "Europe/London");
        assert_eq!(owned.slug, "marias-hair-salon");
    }

    #[test]
    fn test_invalid_settings_rejected() {
        let mut form = SettingsForm::from_business(&business(WorkingHours::default()));
        form.set_end(Weekday::Tuesday, "08:00");
        assert!(form.to_update().is_err());

        let mut form = SettingsForm::from_business(&business(WorkingHours::default()));
        form.name = " ".into();
        assert!(form.to_update().is_err());
    }
}
