//! Shape checks on a single value: dates, numbers, patterns, lengths.

use regex::Regex;

use super::{failing_rows, is_blank, is_whole_number, parse_date, parse_number};

/// Values that are not an 8-digit `YYYYMMDD` calendar date.
pub fn is_date(column: &[String], accept_blank: bool) -> Vec<usize> {
    failing_rows(column, |value| {
        (accept_blank && is_blank(value)) || parse_date(value).is_some()
    })
}

/// Values that are not a number. `whole` additionally rejects decimals.
pub fn is_number(column: &[String], accept_blank: bool, whole: bool) -> Vec<usize> {
    failing_rows(column, |value| {
        if is_blank(value) {
            return accept_blank;
        }
        if whole {
            is_whole_number(value)
        } else {
            parse_number(value).is_some()
        }
    })
}

/// Values that do not match `pattern`.
pub fn has_valid_format(column: &[String], pattern: &Regex, accept_blank: bool) -> Vec<usize> {
    failing_rows(column, |value| {
        (accept_blank && is_blank(value)) || pattern.is_match(value)
    })
}

/// Values whose character count differs from `length`.
pub fn has_correct_length(column: &[String], length: usize, accept_blank: bool) -> Vec<usize> {
    failing_rows(column, |value| {
        if is_blank(value) {
            return accept_blank;
        }
        value.chars().count() == length
    })
}

/// Values whose character count falls outside `min..=max`.
///
/// Blank values are measured like any other (an empty value has length 0).
pub fn has_valid_text_length(column: &[String], min: usize, max: usize) -> Vec<usize> {
    failing_rows(column, |value| {
        let length = value.chars().count();
        (min..=max).contains(&length)
    })
}
