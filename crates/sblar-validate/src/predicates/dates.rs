//! Date range and date-relation checks.
//!
//! Unparseable dates are owned by the date format rule and pass here.

use chrono::NaiveDate;

use super::{failing_pairs, failing_rows, parse_date};

/// Dates outside `start..=end`.
pub fn is_date_in_range(column: &[String], start: NaiveDate, end: NaiveDate) -> Vec<usize> {
    failing_rows(column, |value| {
        parse_date(value).is_none_or(|date| (start..=end).contains(&date))
    })
}

/// Rows whose date falls before the related date.
pub fn is_date_after(field: &[String], related: &[String]) -> Vec<usize> {
    failing_pairs(field, related, |value, other| {
        match (parse_date(value), parse_date(other)) {
            (Some(date), Some(earlier)) => earlier <= date,
            _ => true,
        }
    })
}

/// Rows where the field date is `days` or more days after the related date.
pub fn is_date_before_in_days(field: &[String], related: &[String], days: i64) -> Vec<usize> {
    failing_pairs(field, related, |value, other| {
        match (parse_date(value), parse_date(other)) {
            (Some(date), Some(start)) => (date - start).num_days() < days,
            _ => true,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::predicates::column;

    #[test]
    fn range_is_inclusive() {
        let start = NaiveDate::from_ymd_opt(2024, 10, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
        let values = column(&["20240930", "20241001", "20241231", "20250101", "bad"]);
        assert_eq!(is_date_in_range(&values, start, end), vec![0, 3]);
    }

    #[test]
    fn after_allows_same_day() {
        let app = column(&["20241001", "20241005", "20241001"]);
        let action = column(&["20241001", "20241004", ""]);
        assert_eq!(is_date_after(&action, &app), vec![1]);
    }

    #[test]
    fn before_in_days() {
        let app = column(&["20221003", "20221001", "20240101"]);
        let action = column(&["20241001", "20241001", "20241001"]);
        // 730 days after 2022-10-01 is 2024-09-30
        assert_eq!(is_date_before_in_days(&action, &app, 730), vec![1]);
    }
}
