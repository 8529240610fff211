//! Enumerated-code checks over single- and multi-value fields.

use std::collections::BTreeSet;

use super::{failing_rows, is_blank, split_values};

/// Values outside `accepted`.
///
/// A single-value field compares the whole value, so `1;2` is illegal there.
/// A multi-value field checks each sub-value, and the whole value is reported
/// once however many sub-values are illegal.
pub fn is_valid_enum(
    column: &[String],
    accepted: &BTreeSet<String>,
    accept_blank: bool,
    multi_value: bool,
) -> Vec<usize> {
    failing_rows(column, |value| {
        if accept_blank && is_blank(value) {
            return true;
        }
        if multi_value {
            split_values(value).all(|code| accepted.contains(code))
        } else {
            accepted.contains(value)
        }
    })
}

/// Values that mix a "stand-alone" code with anything else.
///
/// A value passes when it contains none of `single_values`, or when its only
/// distinct sub-value is one of them.
pub fn meets_multi_value_field_restriction(
    column: &[String],
    single_values: &BTreeSet<String>,
) -> Vec<usize> {
    failing_rows(column, |value| {
        let codes: BTreeSet<&str> = split_values(value).collect();
        let has_single = codes.iter().any(|code| single_values.contains(*code));
        !has_single || codes.len() == 1
    })
}

/// Values that repeat a sub-value.
pub fn is_unique_in_field(column: &[String]) -> Vec<usize> {
    failing_rows(column, |value| {
        let mut seen = BTreeSet::new();
        split_values(value).all(|code| seen.insert(code))
    })
}
