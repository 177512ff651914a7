use chrono::{DateTime, NaiveDateTime, Utc};

/// Parses the datetime shapes the backend emits: RFC 3339 with an offset, or a
/// naive `YYYY-MM-DDTHH:MM[:SS[.frac]]` stamp that is stored as UTC.
pub fn parse_flexible(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    let naive = s.strip_suffix('Z').unwrap_or(s);
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(naive, fmt).ok())
        .map(|naive| DateTime::from_naive_utc_and_offset(naive, Utc))
}

/// Custom deserializer for datetime that handles offset and naive forms
pub fn deserialize_flexible<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: String = serde::Deserialize::deserialize(deserializer)?;

    parse_flexible(&s)
        .ok_or_else(|| serde::de::Error::custom(format!("Failed to parse datetime '{s}'")))
}

pub fn deserialize_flexible_opt<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = serde::Deserialize::deserialize(deserializer)?;

    match s {
        None => Ok(None),
        Some(s) => parse_flexible(&s)
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("Failed to parse datetime '{s}'"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_offset_and_naive_forms_agree() {
        let expected = Utc.with_ymd_and_hms(2024, 3, 14, 9, 30, 0).unwrap();

        assert_eq!(parse_flexible("2024-03-14T09:30:00+00:00"), Some(expected));
        assert_eq!(parse_flexible("2024-03-14T09:30:00Z"), Some(expected));
        assert_eq!(parse_flexible("2024-03-14T09:30:00"), Some(expected));
        assert_eq!(parse_flexible("2024-03-14T09:30"), Some(expected));
        assert_eq!(
            parse_flexible("2024-03-14T09:30:00.000123"),
            Some(expected + chrono::Duration::microseconds(123))
        );
    }

    #[test]
    fn test_offset_is_normalised_to_utc() {
        let parsed = parse_flexible("2024-03-14T09:30:00-03:00").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2024, 3, 14, 12, 30, 0).unwrap());
    }

    #[test]
    fn test_garbage_is_rejected() {
        assert!(parse_flexible("tomorrow").is_none());
        assert!(parse_flexible("2024-03-14").is_none());
    }
}
