//! Integrity of the standard SBLAR catalog.

use std::collections::BTreeSet;

use sblar_model::{Phase, Scope, Severity};
use sblar_validate::{Predicate, sblar_catalog};

#[test]
fn test_catalog_counts() {
    let catalog = sblar_catalog().expect("catalog builds");
    assert_eq!(catalog.fields().len(), 81);
    assert_eq!(catalog.len(), 182);
    assert!(!catalog.checks(Phase::Syntactical).is_empty());
    assert!(!catalog.checks(Phase::Logical).is_empty());
}

#[test]
fn test_rule_ids_and_names_are_unique() {
    let catalog = sblar_catalog().expect("catalog builds");
    let mut ids = BTreeSet::new();
    let mut names = BTreeSet::new();
    for (_, check) in catalog.all_checks() {
        assert!(ids.insert(check.rule_id.as_str()), "duplicate id {}", check.rule_id);
        assert!(names.insert(check.name.as_str()), "duplicate name {}", check.name);
    }
}

#[test]
fn test_severity_matches_rule_id_prefix() {
    let catalog = sblar_catalog().expect("catalog builds");
    for (_, check) in catalog.all_checks() {
        let expected = if check.rule_id.starts_with('W') {
            Severity::Warning
        } else {
            Severity::Error
        };
        assert_eq!(check.severity, expected, "{}", check.rule_id);
    }
}

#[test]
fn test_every_check_is_documented_and_linked() {
    let catalog = sblar_catalog().expect("catalog builds");
    for (_, check) in catalog.all_checks() {
        assert!(!check.description.is_empty(), "{} has no description", check.rule_id);
        let anchor = check.fig_anchor.as_deref().unwrap_or_default();
        assert!(anchor.starts_with("4."), "{} anchor {anchor:?}", check.rule_id);
    }
}

#[test]
fn test_every_field_has_a_syntactical_check() {
    let catalog = sblar_catalog().expect("catalog builds");
    for field in catalog.fields() {
        assert!(
            catalog
                .checks_for_field(&field.name)
                .any(|(phase, _)| phase == Phase::Syntactical),
            "{} has no syntactical check",
            field.name
        );
    }
}

#[test]
fn test_cross_record_checks_only_run_in_logical_phase() {
    let catalog = sblar_catalog().expect("catalog builds");
    let register: Vec<(Phase, &str)> = catalog
        .all_checks()
        .filter(|(_, check)| check.scope() == Scope::Register)
        .map(|(phase, check)| (phase, check.rule_id.as_str()))
        .collect();
    assert_eq!(register, vec![(Phase::Logical, "E3000")]);
}

#[test]
fn test_enum_checks_agree_with_field_codes() {
    let catalog = sblar_catalog().expect("catalog builds");
    for (phase, check) in catalog.all_checks() {
        let Predicate::Enum {
            codes, multi_value, ..
        } = &check.predicate
        else {
            continue;
        };
        assert_eq!(phase, Phase::Syntactical);
        let field = catalog.field(&check.field).expect("declared field");
        let declared: BTreeSet<String> = field.codes.clone().unwrap_or_default().into_iter().collect();
        assert_eq!(&declared, codes, "{}", check.rule_id);
        assert_eq!(*multi_value, field.multi_value, "{}", check.rule_id);
    }
}

#[test]
fn test_single_value_enum_fields_reject_lists() {
    let catalog = sblar_catalog().expect("catalog builds");
    let (_, check) = catalog.check("E0300").expect("declared");
    assert!(matches!(
        check.predicate,
        Predicate::Enum {
            multi_value: false,
            ..
        }
    ));
    let (_, check) = catalog.check("E0340").expect("declared");
    assert!(matches!(check.predicate, Predicate::Enum { multi_value: true, .. }));
}

#[test]
fn test_blank_handling_follows_field_policy() {
    let catalog = sblar_catalog().expect("catalog builds");
    let mut checked = 0;
    for (_, check) in catalog.all_checks() {
        let accept_blank = match &check.predicate {
            Predicate::Pattern { accept_blank, .. }
            | Predicate::Date { accept_blank }
            | Predicate::Number { accept_blank, .. }
            | Predicate::Enum { accept_blank, .. }
            | Predicate::ExactLength { accept_blank, .. }
            | Predicate::Compare { accept_blank, .. }
            | Predicate::ReferenceCode { accept_blank, .. } => *accept_blank,
            _ => continue,
        };
        let field = catalog.field(&check.field).expect("declared field");
        assert_eq!(accept_blank, field.accepts_blank(), "{}", check.rule_id);
        checked += 1;
    }
    assert!(checked > 40, "only {checked} checks carry a blank policy");
}

#[test]
fn test_owner_count_rules_cover_all_demographics() {
    let catalog = sblar_catalog().expect("catalog builds");
    for (count, rule_id) in ["W2035", "W2036", "W2037", "W2038", "W2039"].iter().enumerate() {
        let (phase, check) = catalog.check(rule_id).expect("declared");
        assert_eq!(phase, Phase::Logical);
        assert_eq!(check.field, "num_principal_owners");
        let Predicate::FieldsetPair { fieldset, .. } = &check.predicate else {
            panic!("{rule_id} is not a fieldset rule");
        };
        assert_eq!(fieldset.len(), 12);
        let filled = fieldset.iter().filter(|target| !target.must_equal).count();
        assert_eq!(filled, 3 * count, "{rule_id}");
    }
}
