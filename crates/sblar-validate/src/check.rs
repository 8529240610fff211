use sblar_model::{
    Dataset, FieldValue, Finding, FindingRecord, Phase, ReferenceData, Scope, Severity,
    ValidationContext,
};

use crate::error::CheckError;
use crate::predicate::{ColumnSet, Predicate, PredicateEnv};

/// Column whose value identifies a record in findings.
pub const UID_FIELD: &str = "uid";

/// Everything a check may read while it runs.
#[derive(Clone, Copy)]
pub struct CheckInput<'a> {
    pub dataset: &'a Dataset,
    pub context: &'a ValidationContext,
    pub reference: &'a dyn ReferenceData,
}

/// A validation rule: identity and metadata bound to a predicate.
#[derive(Debug, Clone)]
pub struct Check {
    pub rule_id: String,
    pub name: String,
    pub description: String,
    pub severity: Severity,
    /// Primary field the rule is filed under.
    pub field: String,
    pub fig_anchor: Option<String>,
    pub predicate: Predicate,
}

impl Check {
    pub fn new(
        rule_id: impl Into<String>,
        name: impl Into<String>,
        severity: Severity,
        field: impl Into<String>,
        predicate: Predicate,
    ) -> Self {
        Self {
            rule_id: rule_id.into(),
            name: name.into(),
            description: String::new(),
            severity,
            field: field.into(),
            fig_anchor: None,
            predicate,
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[must_use]
    pub fn with_fig_anchor(mut self, anchor: impl Into<String>) -> Self {
        self.fig_anchor = Some(anchor.into());
        self
    }

    pub fn scope(&self) -> Scope {
        self.predicate.scope()
    }

    /// The primary field followed by every related field, without repeats.
    pub fn target_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.field.as_str()];
        for related in self.predicate.related_fields() {
            if !fields.contains(&related) {
                fields.push(related);
            }
        }
        fields
    }

    /// Run the check. `Ok(None)` means every record passed.
    ///
    /// Fails only when the check cannot be evaluated against this dataset;
    /// invalid data is always reported as a finding.
    pub fn evaluate(&self, phase: Phase, input: &CheckInput<'_>) -> Result<Option<Finding>, CheckError> {
        if self.rule_id.trim().is_empty() {
            return Err(CheckError::MissingRuleId {
                name: self.name.clone(),
            });
        }
        let fields = self.target_fields();
        let columns = ColumnSet::resolve(input.dataset, &fields).map_err(|column| {
            CheckError::MissingColumn {
                rule_id: self.rule_id.clone(),
                column: column.to_string(),
            }
        })?;
        let env = PredicateEnv {
            context: input.context,
            reference: input.reference,
        };
        let violations = self.predicate.violations(&self.field, &columns, &env);
        if violations.is_empty() {
            return Ok(None);
        }

        let uids = input.dataset.column(UID_FIELD);
        let records: Vec<FindingRecord> = violations
            .into_iter()
            .map(|row| FindingRecord {
                record_index: row,
                uid: uids
                    .and_then(|column| column.get(row))
                    .cloned()
                    .unwrap_or_default(),
                fields: fields
                    .iter()
                    .map(|name| FieldValue {
                        name: (*name).to_string(),
                        value: columns.get(name).get(row).cloned().unwrap_or_default(),
                    })
                    .collect(),
            })
            .collect();

        Ok(Some(Finding {
            rule_id: self.rule_id.clone(),
            name: self.name.clone(),
            description: self.description.clone(),
            severity: self.severity,
            scope: self.scope(),
            phase,
            fig_anchor: self.fig_anchor.clone(),
            fields: fields.iter().map(|name| (*name).to_string()).collect(),
            total_records: records.len(),
            records,
        }))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use sblar_model::EmptyReferenceData;

    use super::*;

    fn enum_check() -> Check {
        Check::new(
            "E0300",
            "action_taken.invalid_enum_value",
            Severity::Error,
            "action_taken",
            Predicate::Enum {
                codes: ["1", "2", "3"].iter().map(|c| (*c).to_string()).collect::<BTreeSet<_>>(),
                accept_blank: false,
                multi_value: false,
            },
        )
        .with_fig_anchor("4.2.1")
    }

    #[test]
    fn finding_cites_full_value() {
        let dataset = Dataset::from_records(vec![
            vec![("uid", "A1"), ("action_taken", "1;2;9001")],
            vec![("uid", "A2"), ("action_taken", "2")],
        ]);
        let context = ValidationContext::new();
        let input = CheckInput {
            dataset: &dataset,
            context: &context,
            reference: &EmptyReferenceData,
        };
        let finding = enum_check()
            .evaluate(Phase::Syntactical, &input)
            .expect("evaluate")
            .expect("finding");
        assert_eq!(finding.records.len(), 1);
        assert_eq!(finding.records[0].record_index, 0);
        assert_eq!(finding.records[0].uid, "A1");
        assert_eq!(finding.records[0].value_of("action_taken"), Some("1;2;9001"));
        assert_eq!(finding.scope, Scope::SingleField);
        assert_eq!(finding.total_records, 1);
    }

    #[test]
    fn missing_column_is_a_check_error() {
        let dataset = Dataset::from_records(vec![vec![("uid", "A1")]]);
        let context = ValidationContext::new();
        let input = CheckInput {
            dataset: &dataset,
            context: &context,
            reference: &EmptyReferenceData,
        };
        let err = enum_check().evaluate(Phase::Syntactical, &input).unwrap_err();
        assert_eq!(
            err,
            CheckError::MissingColumn {
                rule_id: "E0300".to_string(),
                column: "action_taken".to_string()
            }
        );
    }

    #[test]
    fn empty_rule_id_is_rejected() {
        let mut check = enum_check();
        check.rule_id = String::new();
        let dataset = Dataset::from_records(vec![vec![("action_taken", "1")]]);
        let context = ValidationContext::new();
        let input = CheckInput {
            dataset: &dataset,
            context: &context,
            reference: &EmptyReferenceData,
        };
        assert!(matches!(
            check.evaluate(Phase::Syntactical, &input),
            Err(CheckError::MissingRuleId { .. })
        ));
    }
}
