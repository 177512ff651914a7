use super::error::AppError;
use crate::utils::validation::{optional, require_non_empty};
use serde::{Deserialize, Serialize};

const fn default_active() -> bool {
    true
}

/// Something a business sells by the appointment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    pub service_id: String,
    pub name: String,
    /// Minutes
    pub duration: u32,
    pub price: f64,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

impl Service {
    /// Partial update flipping the active flag.
    pub fn toggle_update(&self) -> ServiceUpdate {
        ServiceUpdate {
            is_active: Some(!self.is_active),
            ..Default::default()
        }
    }

    /// CSS class for the management card; inactive services are dimmed.
    pub fn card_class(&self) -> &'static str {
        if self.is_active {
            "service-card"
        } else {
            "service-card inactive"
        }
    }
}

/// Services that can be offered in a booking flow.
pub fn bookable(services: &[Service]) -> Vec<Service> {
    services.iter().filter(|s| s.is_active).cloned().collect()
}

/// Body of `POST .../services`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServiceInput {
    pub name: String,
    pub duration: u32,
    pub price: f64,
    pub description: Option<String>,
}

/// Body of `PUT .../services/{id}`; absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ServiceUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl From<ServiceInput> for ServiceUpdate {
    fn from(input: ServiceInput) -> Self {
        Self {
            name: Some(input.name),
            duration: Some(input.duration),
            price: Some(input.price),
            description: Some(input.description.unwrap_or_default()),
            is_active: None,
        }
    }
}

/// Editor state of the add/edit service modal. Numeric fields are kept as
/// typed text until submission.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceForm {
    pub editing: Option<String>,
    pub name: String,
    pub duration: String,
    pub price: String,
    pub description: String,
}

impl Default for ServiceForm {
    fn default() -> Self {
        Self {
            editing: None,
            name: String::new(),
            duration: "30".to_string(),
            price: "0".to_string(),
            description: String::new(),
        }
    }
}

impl ServiceForm {
    pub fn edit(service: &Service) -> Self {
        Self {
            editing: Some(service.service_id.clone()),
            name: service.name.clone(),
            duration: service.duration.to_string(),
            price: service.price.to_string(),
            description: service.description.clone().unwrap_or_default(),
        }
    }

    pub const fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    pub fn validate(&self) -> Result<ServiceInput, AppError> {
        let name = require_non_empty(&self.name, "Service name")?;

        let duration = self
            .duration
            .trim()
            .parse::<u32>()
            .ok()
            .filter(|d| *d > 0)
            .ok_or_else(|| AppError::validation("Duration must be a positive number of minutes"))?;

        let price = self
            .price
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|p| p.is_finite() && *p > 0.0)
            .ok_or_else(|| AppError::validation("Price must be a positive amount"))?;

        Ok(ServiceInput {
            name,
            duration,
            price,
            description: optional(&self.description),
        })
    }
}
