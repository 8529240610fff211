use sblar_cli::output::{
    MAX_CELL_CHARS, catalog_json, findings_csv, findings_json, findings_table, status_line,
};
use sblar_model::{
    FieldValue, Finding, FindingRecord, Phase, RunState, Scope, Severity, ValidationResult,
};
use sblar_validate::sblar_catalog;

fn record(index: usize, uid: &str, fields: &[(&str, &str)]) -> FindingRecord {
    FindingRecord {
        record_index: index,
        uid: uid.to_string(),
        fields: fields
            .iter()
            .map(|(name, value)| FieldValue {
                name: (*name).to_string(),
                value: (*value).to_string(),
            })
            .collect(),
    }
}

fn finding(
    rule_id: &str,
    name: &str,
    description: &str,
    severity: Severity,
    anchor: &str,
    records: Vec<FindingRecord>,
) -> Finding {
    let fields = records
        .first()
        .map(|record| record.fields.iter().map(|field| field.name.clone()).collect())
        .unwrap_or_default();
    let scope = if records.first().is_some_and(|record| record.fields.len() > 1) {
        Scope::MultiField
    } else {
        Scope::SingleField
    };
    Finding {
        rule_id: rule_id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        severity,
        scope,
        phase: Phase::Logical,
        fig_anchor: Some(anchor.to_string()),
        fields,
        total_records: records.len(),
        records,
    }
}

fn sample_result() -> ValidationResult {
    ValidationResult::new(
        vec![
            finding(
                "E2009",
                "action_taken_date.date_value_conflict",
                "Action taken date must be on or after application date.",
                Severity::Error,
                "4.2.22",
                vec![record(
                    2,
                    "123456789TESTBANK12300003",
                    &[("action_taken_date", "20240101"), ("app_date", "20240301")],
                )],
            ),
            finding(
                "W0003",
                "uid.invalid_uid_lei",
                "The first 20 characters of uid should match the LEI, when provided.",
                Severity::Warning,
                "4.4.1",
                vec![record(0, "OTHERLEI0000000000000001", &[("uid", "OTHERLEI0000000000000001")])],
            ),
        ],
        Vec::new(),
        vec![Phase::Syntactical, Phase::Logical],
        RunState::Complete,
    )
}

#[test]
fn test_findings_csv() {
    let csv = findings_csv(&sample_result()).expect("render csv");
    insta::assert_snapshot!(csv, @r#"
    validation_type,validation_id,validation_name,row,unique_identifier,fig_link,validation_description,field_1,value_1,field_2,value_2
    Error,E2009,action_taken_date.date_value_conflict,3,123456789TESTBANK12300003,https://www.consumerfinance.gov/data-research/small-business-lending/filing-instructions-guide/2024-guide/#4.2.22,Action taken date must be on or after application date.,action_taken_date,20240101,app_date,20240301
    Warning,W0003,uid.invalid_uid_lei,1,OTHERLEI0000000000000001,https://www.consumerfinance.gov/data-research/small-business-lending/filing-instructions-guide/2024-guide/#4.4.1,"The first 20 characters of uid should match the LEI, when provided.",uid,OTHERLEI0000000000000001,,
    "#);
}

#[test]
fn test_findings_json() {
    let json = findings_json(&sample_result()).expect("render json");
    let value: serde_json::Value = serde_json::from_str(&json).expect("parse json");
    insta::assert_json_snapshot!(value[0], @r#"
    {
      "records": [
        {
          "fields": [
            {
              "name": "action_taken_date",
              "value": "20240101"
            },
            {
              "name": "app_date",
              "value": "20240301"
            }
          ],
          "record_no": 3,
          "uid": "123456789TESTBANK12300003"
        }
      ],
      "validation": {
        "description": "Action taken date must be on or after application date.",
        "fig_link": "https://www.consumerfinance.gov/data-research/small-business-lending/filing-instructions-guide/2024-guide/#4.2.22",
        "id": "E2009",
        "name": "action_taken_date.date_value_conflict",
        "scope": "multi-field",
        "severity": "error"
      }
    }
    "#);
    assert_eq!(value.as_array().map(Vec::len), Some(2));
}

#[test]
fn test_empty_result_renders_header_only_csv() {
    let result = ValidationResult::new(Vec::new(), Vec::new(), Vec::new(), RunState::Complete);
    let csv = findings_csv(&result).expect("render csv");
    assert_eq!(
        csv,
        "validation_type,validation_id,validation_name,row,unique_identifier,fig_link,validation_description\n"
    );
    assert_eq!(findings_json(&result).expect("render json"), "[]");
}

#[test]
fn test_table_truncates_long_values() {
    let long = "x".repeat(200);
    let result = ValidationResult::new(
        vec![finding(
            "E0020",
            "uid.invalid_text_length",
            "uid must be between 21 and 45 characters.",
            Severity::Error,
            "4.1.1",
            vec![record(0, "A1", &[("uid", long.as_str())])],
        )],
        Vec::new(),
        vec![Phase::Syntactical],
        RunState::Phase1FailedTerminal,
    );
    let table = findings_table(&result);
    assert!(table.contains("E0020"));
    assert!(table.contains("..."));
    assert!(!table.contains(&"x".repeat(MAX_CELL_CHARS)));
}

#[test]
fn test_table_notes_hidden_records() {
    let mut result = sample_result();
    result.findings[1].total_records = 4;
    let table = findings_table(&result);
    assert!(table.contains("3 more record(s) not shown"));
}

#[test]
fn test_status_line() {
    assert_eq!(status_line(&sample_result()), "status: FAILURE, findings: 2");
    let clean = ValidationResult::new(Vec::new(), Vec::new(), Vec::new(), RunState::Complete);
    assert_eq!(status_line(&clean), "status: SUCCESS, findings: 0");
}

#[test]
fn test_status_line_fails_on_warnings_and_counts_records() {
    let warnings = ValidationResult::new(
        vec![finding(
            "W0003",
            "uid.invalid_uid_lei",
            "The first 20 characters of uid should match the LEI, when provided.",
            Severity::Warning,
            "4.4.1",
            vec![
                record(0, "OTHERLEI0000000000000001", &[("uid", "OTHERLEI0000000000000001")]),
                record(1, "OTHERLEI0000000000000002", &[("uid", "OTHERLEI0000000000000002")]),
                record(4, "OTHERLEI0000000000000005", &[("uid", "OTHERLEI0000000000000005")]),
            ],
        )],
        Vec::new(),
        vec![Phase::Syntactical, Phase::Logical],
        RunState::Complete,
    );
    assert!(!warnings.has_errors());
    assert_eq!(status_line(&warnings), "status: FAILURE, findings: 3");
}

#[test]
fn test_catalog_json_filters_by_phase() {
    let catalog = sblar_catalog().expect("catalog builds");
    let json = catalog_json(&catalog, Some(Phase::Logical)).expect("render catalog");
    let rows: Vec<serde_json::Value> = serde_json::from_str(&json).expect("parse catalog");
    assert_eq!(rows.len(), catalog.checks(Phase::Logical).len());
    assert!(rows.iter().all(|row| row["phase"] == "logical"));
    let uid_unique = rows
        .iter()
        .find(|row| row["id"] == "E3000")
        .expect("E3000 listed");
    assert_eq!(uid_unique["scope"], "register");
    assert_eq!(uid_unique["predicate"], "unique_column");
}
