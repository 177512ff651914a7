use chrono::{Datelike, Months, NaiveDate};

/// Returns the first day of the month containing `date`.
pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Shifts a month anchor by `delta` months, always landing on the 1st.
pub fn add_months(month: NaiveDate, delta: i32) -> NaiveDate {
    let first = first_of_month(month);
    let shifted = if delta >= 0 {
        first.checked_add_months(Months::new(delta.unsigned_abs()))
    } else {
        first.checked_sub_months(Months::new(delta.unsigned_abs()))
    };
    shifted.unwrap_or(first)
}

/// Builds the date-picker grid for the month containing `month`.
///
/// The grid is laid out in 7 columns starting on Sunday: it begins with one
/// `None` per weekday before the 1st, followed by every day of the month.
pub fn month_grid(month: NaiveDate) -> Vec<Option<NaiveDate>> {
    let first = first_of_month(month);
    let leading = first.weekday().num_days_from_sunday() as usize;
    let next_month = add_months(first, 1);

    let mut cells = vec![None; leading];
    cells.extend(first.iter_days().take_while(|d| *d < next_month).map(Some));
    cells
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_leading_blanks_match_first_weekday() {
        // March 2024 starts on a Friday
        let grid = month_grid(ymd(2024, 3, 14));
        assert_eq!(grid.iter().take_while(|c| c.is_none()).count(), 5);
        assert_eq!(grid[5], Some(ymd(2024, 3, 1)));
        assert_eq!(grid.last().copied().flatten(), Some(ymd(2024, 3, 31)));
        assert_eq!(grid.len(), 5 + 31);
    }

    #[test]
    fn test_month_starting_on_sunday_has_no_blanks() {
        // September 2024 starts on a Sunday
        let grid = month_grid(ymd(2024, 9, 1));
        assert_eq!(grid[0], Some(ymd(2024, 9, 1)));
        assert_eq!(grid.len(), 30);
    }

    #[test]
    fn test_leap_february() {
        let grid = month_grid(ymd(2024, 2, 10));
        assert_eq!(grid.iter().flatten().count(), 29);
    }

    #[test]
    fn test_add_months_crosses_years() {
        assert_eq!(add_months(ymd(2024, 12, 31), 1), ymd(2025, 1, 1));
        assert_eq!(add_months(ymd(2024, 1, 15), -1), ymd(2023, 12, 1));
        assert_eq!(add_months(ymd(2024, 5, 20), 0), ymd(2024, 5, 1));
    }
}
