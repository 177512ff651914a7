use super::business::NewBusiness;
use super::error::AppError;
use crate::config::Config;
use crate::utils::slug::{normalize_input, slugify};
use crate::utils::validation::require_non_empty;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OnboardingStep {
    #[default]
    Name,
    Link,
}

/// Two-step business creation form: the name first, then the public link
/// and timezone.
#[derive(Debug, Clone, PartialEq)]
pub struct OnboardingForm {
    pub step: OnboardingStep,
    pub name: String,
    pub slug: String,
    pub timezone: String,
}

impl Default for OnboardingForm {
    fn default() -> Self {
        Self {
            step: OnboardingStep::Name,
            name: String::new(),
            slug: String::new(),
            timezone: Config::DEFAULT_TIMEZONE.to_string(),
        }
    }
}

impl OnboardingForm {
    /// Typing the name re-derives the slug.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
        self.slug = slugify(&self.name);
    }

    pub fn set_slug(&mut self, input: &str) {
        self.slug = normalize_input(input);
    }

    pub fn set_timezone(&mut self, timezone: impl Into<String>) {
        self.timezone = timezone.into();
    }

    pub fn can_advance(&self) -> bool {
        !self.name.trim().is_empty()
    }

    pub fn advance(&mut self) -> Result<(), AppError> {
        require_non_empty(&self.name, "Business name")?;
        self.step = OnboardingStep::Link;
        Ok(())
    }

    pub fn back(&mut self) {
        self.step = OnboardingStep::Name;
    }

    /// Final slug as it will appear in the booking link.
    pub fn link_preview(&self, origin: &str) -> String {
        format!("{}/agenda/{}", origin.trim_end_matches('/'), slugify(&self.slug))
    }

    pub fn to_request(&self) -> Result<NewBusiness, AppError> {
        let name = require_non_empty(&self.name, "Business name")?;
        let slug = slugify(&self.slug);
        if slug.is_empty() {
            return Err(AppError::validation("Booking link is required"));
        }

        Ok(NewBusiness {
            name,
            slug,
            timezone: self.timezone.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_derives_slug() {
        let mut form = OnboardingForm::default();
        form.set_name("Maria's Hair Salon");
        assert_eq!(form.slug, "marias-hair-salon");
    }

    #[test]
    fn test_cannot_advance_without_name() {
        let mut form = OnboardingForm::default();
        form.set_name("   ");
        assert!(!form.can_advance());
        assert!(form.advance().is_err());
        assert_eq!(form.step, OnboardingStep::Name);

        form.set_name("Studio 9");
        form.advance().unwrap();
        assert_eq!(form.step, OnboardingStep::Link);
        form.back();
        assert_eq!(form.step, OnboardingStep::Name);
    }

    #[test]
    fn test_slug_edits_are_normalized() {
        let mut form = OnboardingForm::default();
        form.set_name("Studio");
        form.set_slug("My Studio-");
        assert_eq!(form.slug, "my-studio-");

        let request = form.to_request().unwrap();
        assert_eq!(request.slug, "my-studio");
        assert_eq!(request.timezone, "America/New_York");
    }

    #[test]
    fn test_empty_slug_is_rejected() {
        let mut form = OnboardingForm::default();
        form.set_name("Studio");
        form.set_slug("!!!");
        assert!(form.to_request().is_err());
    }

    #[test]
    fn test_link_preview() {
        let mut form = OnboardingForm::default();
        form.set_name("Barber Co");
        assert_eq!(
            form.link_preview("https://example.com/"),
            "https://example.com/agenda/barber-co"
        );
    }
}
