//! Cross-field conditions within a single record.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::{failing_pairs, failing_rows, is_blank, split_values};

/// Rows where the field is blank exactly when it should be filled, or filled
/// when it should be blank.
///
/// The field must be non-blank iff the related field contains one of
/// `condition` among its sub-values.
pub fn has_no_conditional_field_conflict(
    field: &[String],
    related: &[String],
    condition: &BTreeSet<String>,
) -> Vec<usize> {
    failing_pairs(field, related, |value, other| {
        let triggered = split_values(other).any(|code| condition.contains(code));
        triggered != is_blank(value)
    })
}

/// One clause of an enum-pair rule.
///
/// When the (trimmed) related value is (`when_equal = true`) or is not
/// (`when_equal = false`) one of `codes`, the field's sub-values must
/// (`must_contain = true`) or must not contain `target`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumCondition {
    pub codes: BTreeSet<String>,
    pub when_equal: bool,
    pub target: String,
    pub must_contain: bool,
}

impl EnumCondition {
    pub fn new(codes: &[&str], when_equal: bool, target: &str, must_contain: bool) -> Self {
        Self {
            codes: codes.iter().map(|code| (*code).to_string()).collect(),
            when_equal,
            target: target.to_string(),
            must_contain,
        }
    }

    fn holds(&self, value: &str, related: &str) -> bool {
        if self.codes.contains(related.trim()) != self.when_equal {
            return true;
        }
        split_values(value).any(|code| code == self.target) == self.must_contain
    }
}

/// Rows that break any clause of an enum-pair rule.
pub fn has_valid_enum_pair(
    field: &[String],
    related: &[String],
    conditions: &[EnumCondition],
) -> Vec<usize> {
    failing_pairs(field, related, |value, other| {
        conditions.iter().all(|condition| condition.holds(value, other))
    })
}

/// A dependent column of a fieldset rule and the value it must (not) hold.
#[derive(Debug, Clone, Copy)]
pub struct FieldsetColumn<'a> {
    pub values: &'a [String],
    pub must_equal: bool,
    pub target: &'a str,
}

/// Rows where the field holds one of `condition` and any dependent column
/// fails its equality requirement.
pub fn has_valid_fieldset_pair(
    field: &[String],
    condition: &BTreeSet<String>,
    fieldset: &[FieldsetColumn<'_>],
) -> Vec<usize> {
    let mut row = 0;
    failing_rows(field, |value| {
        let idx = row;
        row += 1;
        if !condition.contains(value) {
            return true;
        }
        fieldset.iter().all(|column| {
            let current = column.values.get(idx).map_or("", String::as_str);
            (current == column.target) == column.must_equal
        })
    })
}
