use crate::models::error::AppError;

/// Syntactic email check: a non-empty local part, a single `@`, and a domain
/// with at least one dot-separated segment after the first label.
pub fn is_valid_email(email: &str) -> bool {
    let email = email.trim();
    if email.chars().any(char::is_whitespace) {
        return false;
    }

    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    !local.is_empty()
        && !domain.contains('@')
        && domain.split('.').count() >= 2
        && domain.split('.').all(|label| !label.is_empty())
}

/// Trims `value` and rejects it if nothing is left.
pub fn require_non_empty(value: &str, field: &str) -> Result<String, AppError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(AppError::validation(format!("{field} is required")))
    } else {
        Ok(trimmed.to_string())
    }
}

/// Maps an empty or whitespace-only form field to `None`.
pub fn optional(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_emails() {
        assert!(is_valid_email("ana@example.com"));
        assert!(is_valid_email(" ana.silva+book@mail.example.co "));
    }

    #[test]
    fn test_invalid_emails() {
        for email in ["", "ana", "ana@", "@example.com", "ana@example", "ana@@example.com", "a b@x.com", "ana@example."] {
            assert!(!is_valid_email(email), "{email:?} should be rejected");
        }
    }

    #[test]
    fn test_require_non_empty() {
        assert_eq!(require_non_empty("  Ana ", "Name").unwrap(), "Ana");
        assert_eq!(
            require_non_empty("   ", "Name").unwrap_err(),
            AppError::ValidationError("Name is required".to_string())
        );
    }

    #[test]
    fn test_optional() {
        assert_eq!(optional(""), None);
        assert_eq!(optional("  "), None);
        assert_eq!(optional(" 555-0100 "), Some("555-0100".to_string()));
    }
}
