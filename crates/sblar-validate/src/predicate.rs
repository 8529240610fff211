//! Parameterised predicate selection.
//!
//! A [`Predicate`] names one function of the [`predicates`](crate::predicates)
//! library together with its parameters. Checks hold a `Predicate`, and the
//! engine dispatches on it when a check runs.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use regex::Regex;

use sblar_model::{Dataset, FieldSpec, ReferenceData, Scope, ValidationContext};

use crate::predicates::compare::{Comparison, compare};
use crate::predicates::conditional::{
    EnumCondition, FieldsetColumn, has_no_conditional_field_conflict, has_valid_enum_pair,
    has_valid_fieldset_pair,
};
use crate::predicates::count::{has_valid_multi_field_value_count, has_valid_value_count};
use crate::predicates::cross_record::is_unique_column;
use crate::predicates::dates::{is_date_after, is_date_before_in_days, is_date_in_range};
use crate::predicates::enums::{is_unique_in_field, is_valid_enum, meets_multi_value_field_restriction};
use crate::predicates::format::{
    has_correct_length, has_valid_format, has_valid_text_length, is_date, is_number,
};
use crate::predicates::reference::is_valid_code;
use crate::predicates::text::string_contains;

/// A dependent field of a fieldset rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldsetTarget {
    pub field: String,
    pub must_equal: bool,
    pub target: String,
}

impl FieldsetTarget {
    pub fn must_equal(field: &str, target: &str) -> Self {
        Self {
            field: field.to_string(),
            must_equal: true,
            target: target.to_string(),
        }
    }

    pub fn must_not_equal(field: &str, target: &str) -> Self {
        Self {
            field: field.to_string(),
            must_equal: false,
            target: target.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub enum Predicate {
    /// Character count within `min..=max`.
    TextLength { min: usize, max: usize },
    /// Full match against a regular expression.
    Pattern { pattern: Regex, accept_blank: bool },
    /// `YYYYMMDD` calendar date.
    Date { accept_blank: bool },
    Number { accept_blank: bool, whole: bool },
    /// The value is one of `codes`. On a multi-value field every
    /// `;`-separated sub-value must be.
    Enum {
        codes: BTreeSet<String>,
        accept_blank: bool,
        multi_value: bool,
    },
    ExactLength { length: usize, accept_blank: bool },
    ValueCount { min: usize, max: Option<usize> },
    UniqueInField,
    MultiValueRestriction { single: BTreeSet<String> },
    MultiFieldValueCount {
        related: String,
        ignored: BTreeSet<String>,
        max: usize,
    },
    ConditionalFieldConflict {
        related: String,
        condition: BTreeSet<String>,
    },
    EnumPair {
        related: String,
        conditions: Vec<EnumCondition>,
    },
    FieldsetPair {
        condition: BTreeSet<String>,
        fieldset: Vec<FieldsetTarget>,
    },
    Compare {
        op: Comparison,
        limit: f64,
        accept_blank: bool,
    },
    DateInRange { start: NaiveDate, end: NaiveDate },
    /// Field date is on or after the related date.
    DateOnOrAfter { related: String },
    /// Field date is less than `days` after the related date.
    DateWithinDays { related: String, days: i64 },
    ReferenceCode { set: String, accept_blank: bool },
    /// The first `prefix_len` characters equal the context parameter `key`.
    ContextPrefix { key: String, prefix_len: usize },
    /// No value repeats across records.
    UniqueColumn,
}

impl Predicate {
    /// Short machine name, used when describing the catalog.
    pub fn kind(&self) -> &'static str {
        match self {
            Predicate::TextLength { .. } => "text_length",
            Predicate::Pattern { .. } => "pattern",
            Predicate::Date { .. } => "date",
            Predicate::Number { .. } => "number",
            Predicate::Enum { .. } => "enum",
            Predicate::ExactLength { .. } => "exact_length",
            Predicate::ValueCount { .. } => "value_count",
            Predicate::UniqueInField => "unique_in_field",
            Predicate::MultiValueRestriction { .. } => "multi_value_restriction",
            Predicate::MultiFieldValueCount { .. } => "multi_field_value_count",
            Predicate::ConditionalFieldConflict { .. } => "conditional_field_conflict",
            Predicate::EnumPair { .. } => "enum_pair",
            Predicate::FieldsetPair { .. } => "fieldset_pair",
            Predicate::Compare { .. } => "compare",
            Predicate::DateInRange { .. } => "date_in_range",
            Predicate::DateOnOrAfter { .. } => "date_on_or_after",
            Predicate::DateWithinDays { .. } => "date_within_days",
            Predicate::ReferenceCode { .. } => "reference_code",
            Predicate::ContextPrefix { .. } => "context_prefix",
            Predicate::UniqueColumn => "unique_column",
        }
    }

    /// Fields other than the check's own field that the predicate reads.
    pub fn related_fields(&self) -> Vec<&str> {
        match self {
            Predicate::MultiFieldValueCount { related, .. }
            | Predicate::ConditionalFieldConflict { related, .. }
            | Predicate::EnumPair { related, .. }
            | Predicate::DateOnOrAfter { related }
            | Predicate::DateWithinDays { related, .. } => vec![related.as_str()],
            Predicate::FieldsetPair { fieldset, .. } => {
                fieldset.iter().map(|target| target.field.as_str()).collect()
            }
            _ => Vec::new(),
        }
    }

    /// Take field-level properties from the check's own field definition.
    pub(crate) fn bind_field(&mut self, spec: &FieldSpec) {
        if let Predicate::Enum { multi_value, .. } = self {
            *multi_value = spec.multi_value;
        }
    }

    pub fn scope(&self) -> Scope {
        match self {
            Predicate::UniqueColumn => Scope::Register,
            _ if self.related_fields().is_empty() => Scope::SingleField,
            _ => Scope::MultiField,
        }
    }

    /// Rows of `field` that violate the predicate.
    ///
    /// Every column the predicate reads must be present in `columns`.
    pub(crate) fn violations(&self, field: &str, columns: &ColumnSet<'_>, env: &PredicateEnv<'_>) -> Vec<usize> {
        let values = columns.get(field);
        match self {
            Predicate::TextLength { min, max } => has_valid_text_length(values, *min, *max),
            Predicate::Pattern {
                pattern,
                accept_blank,
            } => has_valid_format(values, pattern, *accept_blank),
            Predicate::Date { accept_blank } => is_date(values, *accept_blank),
            Predicate::Number {
                accept_blank,
                whole,
            } => is_number(values, *accept_blank, *whole),
            Predicate::Enum {
                codes,
                accept_blank,
                multi_value,
            } => is_valid_enum(values, codes, *accept_blank, *multi_value),
            Predicate::ExactLength {
                length,
                accept_blank,
            } => has_correct_length(values, *length, *accept_blank),
            Predicate::ValueCount { min, max } => has_valid_value_count(values, *min, *max),
            Predicate::UniqueInField => is_unique_in_field(values),
            Predicate::MultiValueRestriction { single } => {
                meets_multi_value_field_restriction(values, single)
            }
            Predicate::MultiFieldValueCount {
                related,
                ignored,
                max,
            } => has_valid_multi_field_value_count(values, columns.get(related), ignored, *max),
            Predicate::ConditionalFieldConflict { related, condition } => {
                has_no_conditional_field_conflict(values, columns.get(related), condition)
            }
            Predicate::EnumPair {
                related,
                conditions,
            } => has_valid_enum_pair(values, columns.get(related), conditions),
            Predicate::FieldsetPair {
                condition,
                fieldset,
            } => {
                let fieldset: Vec<FieldsetColumn<'_>> = fieldset
                    .iter()
                    .map(|target| FieldsetColumn {
                        values: columns.get(&target.field),
                        must_equal: target.must_equal,
                        target: &target.target,
                    })
                    .collect();
                has_valid_fieldset_pair(values, condition, &fieldset)
            }
            Predicate::Compare {
                op,
                limit,
                accept_blank,
            } => compare(values, *op, *limit, *accept_blank),
            Predicate::DateInRange { start, end } => is_date_in_range(values, *start, *end),
            Predicate::DateOnOrAfter { related } => is_date_after(values, columns.get(related)),
            Predicate::DateWithinDays { related, days } => {
                is_date_before_in_days(values, columns.get(related), *days)
            }
            Predicate::ReferenceCode { set, accept_blank } => {
                is_valid_code(values, env.reference, set, *accept_blank)
            }
            Predicate::ContextPrefix { key, prefix_len } => {
                string_contains(values, env.context.get(key), *prefix_len)
            }
            Predicate::UniqueColumn => is_unique_column(values),
        }
    }
}

/// Run-scoped collaborators handed to every predicate.
#[derive(Clone, Copy)]
pub(crate) struct PredicateEnv<'a> {
    pub context: &'a ValidationContext,
    pub reference: &'a dyn ReferenceData,
}

/// Columns resolved from a dataset for one check.
pub(crate) struct ColumnSet<'a> {
    columns: BTreeMap<&'a str, &'a [String]>,
}

impl<'a> ColumnSet<'a> {
    /// Resolve `names` against `dataset`, returning the first missing name on
    /// failure.
    pub fn resolve(dataset: &'a Dataset, names: &[&'a str]) -> Result<Self, &'a str> {
        let mut columns = BTreeMap::new();
        for name in names {
            let column = dataset.column(name).ok_or(*name)?;
            columns.insert(*name, column);
        }
        Ok(Self { columns })
    }

    /// A resolved column. Unresolved names read as an empty column.
    pub fn get(&self, name: &str) -> &'a [String] {
        self.columns.get(name).copied().unwrap_or(&[])
    }
}
