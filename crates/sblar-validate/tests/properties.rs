//! Property checks over arbitrary action and owner values.

mod common;

use proptest::prelude::*;

use sblar_model::{Phase, RunState, Severity, ValidationContext};
use sblar_validate::{Validator, ValidatorOptions, sblar_catalog};

use common::{LEI, dataset, set, uid, valid_record};

fn field_value() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        Just("1".to_string()),
        Just("966".to_string()),
        Just("988".to_string()),
        Just("1;2".to_string()),
        "[0-9]{1,4}",
        "[0-9;]{0,6}",
        "[ A-Za-z]{0,4}",
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn phase_gating_and_ordering_hold(
        action in field_value(),
        race in field_value(),
        owners in field_value(),
    ) {
        let catalog = sblar_catalog().expect("catalog builds");
        let record = set(valid_record(&uid(1)), "action_taken", &action);
        let record = set(record, "po_1_race", &race);
        let record = set(record, "num_principal_owners", &owners);
        let data = dataset(vec![record, valid_record(&uid(2))]);
        let context = ValidationContext::new().with_lei(LEI);

        let result = Validator::new(&catalog)
            .validate(&data, &context)
            .expect("validation runs");
        let sequential = Validator::new(&catalog)
            .with_options(ValidatorOptions::sequential())
            .validate(&data, &context)
            .expect("validation runs");
        prop_assert_eq!(&result, &sequential);

        let phase_one_errors = result
            .findings
            .iter()
            .any(|finding| finding.phase == Phase::Syntactical && finding.severity == Severity::Error);
        if phase_one_errors {
            prop_assert_eq!(result.state, RunState::Phase1FailedTerminal);
            prop_assert!(result.findings.iter().all(|finding| finding.phase == Phase::Syntactical));
        } else {
            prop_assert_eq!(result.state, RunState::Complete);
        }

        for finding in &result.findings {
            prop_assert!(!finding.records.is_empty());
            prop_assert_eq!(finding.records.len(), finding.total_records);
            let indices = finding.record_indices();
            prop_assert!(indices.windows(2).all(|pair| pair[0] < pair[1]));
            // The second record is always clean.
            prop_assert_eq!(indices, vec![0]);
        }
    }
}
