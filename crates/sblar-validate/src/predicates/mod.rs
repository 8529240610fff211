//! Batch validation predicates.
//!
//! Every predicate receives whole columns (plus its parameters) and returns
//! the ascending indices of the rows that violate it. Predicates never fail:
//! a value they cannot interpret is either a violation or, for predicates
//! that assume a companion format rule already ran, silently skipped.
//!
//! # Conventions
//!
//! - A value is *blank* when it is empty after trimming whitespace.
//! - Multi-value fields are separated by [`SEPARATOR`] and sub-values are
//!   compared verbatim unless stated otherwise.
//! - Whether blank passes is always an explicit `accept_blank` parameter.

pub mod compare;
pub mod conditional;
pub mod count;
pub mod cross_record;
pub mod dates;
pub mod enums;
pub mod format;
pub mod reference;
pub mod text;

use chrono::NaiveDate;

/// Sub-value separator for multi-value fields.
pub const SEPARATOR: char = ';';

#[inline]
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Split a multi-value field. An empty value yields one empty sub-value.
#[inline]
pub fn split_values(value: &str) -> std::str::Split<'_, char> {
    value.split(SEPARATOR)
}

/// Parse a decimal number.
///
/// Accepts an optional sign, digits and at most one decimal point. Rejects
/// whitespace, exponents, thousands separators, `inf` and `nan`.
pub fn parse_number(value: &str) -> Option<f64> {
    let unsigned = value
        .strip_prefix('-')
        .or_else(|| value.strip_prefix('+'))
        .unwrap_or(value);
    let (whole, fraction) = match unsigned.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (unsigned, None),
    };
    let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
    let digit_count = whole.len() + fraction.map_or(0, str::len);
    if digit_count == 0 || !all_digits(whole) || !fraction.is_none_or(all_digits) {
        return None;
    }
    value.parse::<f64>().ok()
}

/// Whether `value` is a whole number: an optional sign followed by digits.
///
/// Purely grammatical, so arbitrarily long digit runs are accepted.
pub fn is_whole_number(value: &str) -> bool {
    let unsigned = value
        .strip_prefix('-')
        .or_else(|| value.strip_prefix('+'))
        .unwrap_or(value);
    !unsigned.is_empty() && unsigned.bytes().all(|b| b.is_ascii_digit())
}

/// Parse an 8-digit `YYYYMMDD` calendar date.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    if value.len() != 8 || !value.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let year = value[0..4].parse::<i32>().ok()?;
    let month = value[4..6].parse::<u32>().ok()?;
    let day = value[6..8].parse::<u32>().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Indices of the values for which `passes` is false.
pub(crate) fn failing_rows(column: &[String], mut passes: impl FnMut(&str) -> bool) -> Vec<usize> {
    column
        .iter()
        .enumerate()
        .filter(|(_, value)| !passes(value))
        .map(|(idx, _)| idx)
        .collect()
}

/// Indices of the row pairs for which `passes` is false.
pub(crate) fn failing_pairs(
    field: &[String],
    related: &[String],
    mut passes: impl FnMut(&str, &str) -> bool,
) -> Vec<usize> {
    field
        .iter()
        .zip(related)
        .enumerate()
        .filter(|(_, (value, other))| !passes(value, other))
        .map(|(idx, _)| idx)
        .collect()
}

#[cfg(test)]
pub(crate) fn column(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| (*value).to_string()).collect()
}
