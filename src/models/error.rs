#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AppError {
    #[error("API error: {0}")]
    ApiError(String),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Authentication error: {0}")]
    AuthError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Data error: {0}")]
    DataError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl AppError {
    /// Text suitable for showing to the user, without the category prefix.
    pub fn message(&self) -> &str {
        match self {
            Self::ApiError(msg)
            | Self::NetworkError(msg)
            | Self::AuthError(msg)
            | Self::NotFound(msg)
            | Self::ValidationError(msg)
            | Self::DataError(msg)
            | Self::ConfigError(msg) => msg,
        }
    }

    /// Alert text for a failed action, keeping the server's own wording.
    pub fn notice(&self, action: &str) -> String {
        format!("Could not {action}: {}", self.message())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::ValidationError(msg.into())
    }

    pub const fn is_auth(&self) -> bool {
        matches!(self, Self::AuthError(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notice_keeps_server_detail() {
        let rejected = AppError::ApiError("Appointment already canceled".into());
        assert_eq!(
            rejected.notice("update appointment"),
            "Could not update appointment: Appointment already canceled"
        );
        assert_eq!(
            AppError::NotFound("Client not found".into()).notice("delete client"),
            "Could not delete client: Client not found"
        );
    }
}
