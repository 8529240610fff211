use sblar_model::{
    CENSUS_GEOIDS, Dataset, EmptyReferenceData, FieldSpec, NAICS_CODES, Phase, ReferenceData,
    Severity, StaticReferenceData, ValidationContext,
};

#[test]
fn severity_parse_and_label() {
    assert_eq!(Severity::parse("Error"), Some(Severity::Error));
    assert_eq!(Severity::parse(" warning "), Some(Severity::Warning));
    assert_eq!(Severity::parse("fatal"), None);
    assert_eq!(Severity::Warning.label(), "Warning");
    assert!(Severity::Error.rank() > Severity::Warning.rank());
}

#[test]
fn phase_parse() {
    assert_eq!(Phase::parse("syntactical"), Some(Phase::Syntactical));
    assert_eq!(Phase::parse("2"), Some(Phase::Logical));
    assert_eq!(Phase::parse("3"), None);
    assert_eq!(Phase::Logical.number(), 2);
}

#[test]
fn context_lookup() {
    let context = ValidationContext::new().with_lei("123456789TESTBANK123");
    assert_eq!(context.lei(), Some("123456789TESTBANK123"));
    assert_eq!(context.get("other"), None);

    let collected: ValidationContext = vec![("lei", "X"), ("period", "2024")].into_iter().collect();
    assert_eq!(collected.get("period"), Some("2024"));
    assert_eq!(collected.iter().count(), 2);
}

#[test]
fn static_reference_membership() {
    let reference = StaticReferenceData::new()
        .with_set(NAICS_CODES, ["111", "112"])
        .with_set(CENSUS_GEOIDS, ["01001020100"]);
    assert!(reference.is_member(NAICS_CODES, "111"));
    assert!(!reference.is_member(NAICS_CODES, "999"));
    assert!(!reference.is_member("unknown", "111"));
    assert_eq!(reference.len(CENSUS_GEOIDS), 1);
    assert_eq!(reference.all_codes(NAICS_CODES).len(), 2);

    assert!(!EmptyReferenceData.is_member(NAICS_CODES, "111"));
}

#[test]
fn field_spec_title() {
    let spec = FieldSpec::new("uid", 1, "Unique identifier");
    assert_eq!(spec.display_title(), "Field 1: Unique identifier");
    assert!(!spec.accepts_blank());
    assert!(spec.clone().optional().accepts_blank());
}

#[test]
fn dataset_from_columns_requires_equal_lengths() {
    let ok = Dataset::from_columns(vec![("uid", vec!["A", "B"]), ("app_date", vec!["1", "2"])])
        .expect("equal columns");
    assert_eq!(ok.height(), 2);
    assert_eq!(ok.width(), 2);

    let err = Dataset::from_columns(vec![("uid", vec!["A", "B"]), ("app_date", vec!["1"])]);
    assert!(err.is_err());
}
