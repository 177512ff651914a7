/// Extracts the one-time `session_id` the identity provider appends to the
/// agenda URL fragment (`#session_id=abc&...`).
pub fn session_id_from_fragment(fragment: &str) -> Option<&str> {
    fragment
        .trim_start_matches('#')
        .split('&')
        .find_map(|pair| pair.strip_prefix("session_id="))
        .filter(|id| !id.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_session_id() {
        assert_eq!(session_id_from_fragment("#session_id=abc123"), Some("abc123"));
        assert_eq!(
            session_id_from_fragment("#state=x&session_id=abc123&other=1"),
            Some("abc123")
        );
    }

    #[test]
    fn test_missing_or_empty() {
        assert_eq!(session_id_from_fragment(""), None);
        assert_eq!(session_id_from_fragment("#session_id="), None);
        assert_eq!(session_id_from_fragment("#token=abc"), None);
    }
}
