pub mod context;
pub mod dataset;
pub mod error;
pub mod field;
pub mod finding;
pub mod reference;
pub mod result;

pub use context::{LEI_KEY, ValidationContext};
pub use dataset::Dataset;
pub use error::{DatasetError, Result};
pub use field::{BlankPolicy, FieldSpec};
pub use finding::{FIG_BASE_URL, FieldValue, Finding, FindingRecord, Phase, Scope, Severity};
pub use reference::{CENSUS_GEOIDS, EmptyReferenceData, NAICS_CODES, ReferenceData, StaticReferenceData};
pub use result::{ConfigDiagnostic, Counts, RunState, ValidationResult};

#[cfg(test)]
mod tests {
    use super::*;

    fn finding(rule_id: &str, severity: Severity, scope: Scope, records: usize) -> Finding {
        Finding {
            rule_id: rule_id.to_string(),
            name: format!("{rule_id}.name"),
            description: String::new(),
            severity,
            scope,
            phase: Phase::Syntactical,
            fig_anchor: Some("4.1.1".to_string()),
            fields: vec!["uid".to_string()],
            records: (0..records)
                .map(|idx| FindingRecord {
                    record_index: idx,
                    uid: format!("UID{idx}"),
                    fields: vec![FieldValue {
                        name: "uid".to_string(),
                        value: String::new(),
                    }],
                })
                .collect(),
            total_records: records,
        }
    }

    #[test]
    fn validation_result_counts() {
        let result = ValidationResult::new(
            vec![
                finding("E0001", Severity::Error, Scope::SingleField, 2),
                finding("E2000", Severity::Error, Scope::MultiField, 1),
                finding("W0003", Severity::Warning, Scope::SingleField, 3),
            ],
            Vec::new(),
            vec![Phase::Syntactical],
            RunState::Phase1FailedTerminal,
        );
        assert_eq!(result.error_count(), 2);
        assert_eq!(result.warning_count(), 1);
        assert_eq!(result.error_counts.single_field, 2);
        assert_eq!(result.error_counts.multi_field, 1);
        assert_eq!(result.error_counts.total, 3);
        assert_eq!(result.warning_counts.total, 3);
        assert_eq!(result.highest_severity(), Some(Severity::Error));
        assert!(result.has_errors());
        assert!(!result.is_valid());
        assert!(!result.truncated);
        assert_eq!(result.stopped_at(), Some(Phase::Syntactical));
    }

    #[test]
    fn fig_link_joins_anchor() {
        let finding = finding("E0001", Severity::Error, Scope::SingleField, 1);
        assert_eq!(
            finding.fig_link().as_deref(),
            Some(
                "https://www.consumerfinance.gov/data-research/small-business-lending/filing-instructions-guide/2024-guide/#4.1.1"
            )
        );
    }

    #[test]
    fn result_serializes() {
        let result = ValidationResult::new(
            vec![finding("W0003", Severity::Warning, Scope::SingleField, 1)],
            Vec::new(),
            vec![Phase::Syntactical, Phase::Logical],
            RunState::Complete,
        );
        let json = serde_json::to_value(&result).expect("serialize result");
        assert_eq!(json["state"], "complete");
        assert_eq!(json["findings"][0]["severity"], "warning");
        assert_eq!(json["findings"][0]["scope"], "single-field");
        let round: ValidationResult = serde_json::from_value(json).expect("deserialize result");
        assert_eq!(round, result);
    }
}
