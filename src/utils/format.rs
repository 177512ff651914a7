use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};

/// Formats a price as US dollars, e.g. `25.0` → `"$25.00"`, `1234.5` → `"$1,234.50"`.
pub fn format_price(price: f64) -> String {
    let cents = (price.abs() * 100.0).round() as u64;
    let whole = (cents / 100).to_string();
    let frac = cents % 100;

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, c) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    let sign = if price < 0.0 && cents > 0 { "-" } else { "" };
    format!("{sign}${grouped}.{frac:02}")
}

/// Row label for an hour in the calendar grid, e.g. `9` → `"9:00"`.
pub fn format_hour(hour: u32) -> String {
    format!("{hour}:00")
}

/// Local wall-clock time of an instant, e.g. `"09:30 AM"`.
pub fn format_time_in<Tz: TimeZone>(instant: &DateTime<Utc>, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    instant.with_timezone(tz).format("%I:%M %p").to_string()
}

pub fn format_time(instant: &DateTime<Utc>) -> String {
    format_time_in(instant, &Local)
}

/// `"Thursday, March 14"`
pub fn format_long_date(date: NaiveDate) -> String {
    date.format("%A, %B %-d").to_string()
}

/// `"Thu, Mar 14"`
pub fn format_short_date_in<Tz: TimeZone>(instant: &DateTime<Utc>, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    instant.with_timezone(tz).format("%a, %b %-d").to_string()
}

/// `"March 2024"`
pub fn format_month(date: NaiveDate) -> String {
    date.format("%B %Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(25.0), "$25.00");
        assert_eq!(format_price(0.0), "$0.00");
        assert_eq!(format_price(9.999), "$10.00");
        assert_eq!(format_price(1234.5), "$1,234.50");
        assert_eq!(format_price(1_000_000.0), "$1,000,000.00");
        assert_eq!(format_price(-3.5), "-$3.50");
    }

    #[test]
    fn test_format_hour() {
        assert_eq!(format_hour(8), "8:00");
        assert_eq!(format_hour(19), "19:00");
    }

    #[test]
    fn test_time_uses_target_zone() {
        let instant = Utc.with_ymd_and_hms(2024, 3, 14, 12, 5, 0).unwrap();
        let brt = FixedOffset::west_opt(3 * 3600).unwrap();
        assert_eq!(format_time_in(&instant, &brt), "09:05 AM");
        assert_eq!(format_short_date_in(&instant, &brt), "Thu, Mar 14");
    }

    #[test]
    fn test_dates() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 14).unwrap();
        assert_eq!(format_long_date(date), "Thursday, March 14");
        assert_eq!(format_month(date), "March 2024");
    }
}
