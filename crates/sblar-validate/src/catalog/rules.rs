//! Rule declarations for the SBLAR register.
//!
//! Rules are grouped by the part of the register they cover. Within a group
//! each field's syntactical rules come before its logical ones. Principal
//! owner rules repeat for owners 1 through 4 with ids, anchors and wording
//! derived from the owner number.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use regex::Regex;

use sblar_model::{CENSUS_GEOIDS, LEI_KEY, NAICS_CODES, Severity};

use super::CatalogBuilder;
use super::fields::{
    ACTION_TAKEN_CODES, APP_METHOD_CODES, APP_RECIPIENT_CODES, BUSINESS_OWNERSHIP_STATUS_CODES,
    CENSUS_TRACT_ADR_TYPE_CODES, CREDIT_PURPOSE_CODES, CT_CREDIT_PRODUCT_CODES, CT_GUARANTEE_CODES,
    DENIAL_REASONS_CODES, MAX_PRINCIPAL_OWNERS, NA_NP_FLAG_CODES, NP_FLAG_CODES,
    NUM_PRINCIPAL_OWNERS_CODES, NUMBER_OF_WORKERS_CODES, OWNER_ETHNICITY_CODES,
    OWNER_GENDER_FLAG_CODES, OWNER_RACE_CODES, PREPAYMENT_PENALTY_CODES,
    PRICING_ADJ_INDEX_NAME_CODES, PRICING_INTEREST_RATE_TYPE_CODES, PRICING_MCA_ADDCOST_FLAG_CODES,
    TIME_IN_BUSINESS_TYPE_CODES,
};
use crate::check::Check;
use crate::error::CatalogError;
use crate::predicate::{FieldsetTarget, Predicate};
use crate::predicates::compare::Comparison;
use crate::predicates::conditional::EnumCondition;
use crate::predicates::parse_date;

const UID_PATTERN: &str = r"^[A-Z0-9]+$";

/// Declare every SBLAR rule on `b`.
pub(super) fn declare(b: &mut CatalogBuilder) -> Result<(), CatalogError> {
    unique_identifier(b)?;
    application(b);
    credit_terms(b);
    amounts_and_action(b)?;
    pricing(b);
    census_and_business(b);
    principal_owner_count(b);
    owner_demographics(b);
    for owner in 1..=MAX_PRINCIPAL_OWNERS {
        principal_owner(b, owner);
    }
    Ok(())
}

// ============================================================================
// Check constructors
// ============================================================================

fn error(rule_id: &str, name: &str, field: &str, predicate: Predicate) -> Check {
    Check::new(rule_id, name, Severity::Error, field, predicate)
}

fn warning(rule_id: &str, name: &str, field: &str, predicate: Predicate) -> Check {
    Check::new(rule_id, name, Severity::Warning, field, predicate)
}

fn codes(values: &[&str]) -> BTreeSet<String> {
    values.iter().map(|value| (*value).to_string()).collect()
}

fn text_length(min: usize, max: usize) -> Predicate {
    Predicate::TextLength { min, max }
}

fn pattern(rule_id: &str, pattern: &str, accept_blank: bool) -> Result<Predicate, CatalogError> {
    let pattern = Regex::new(pattern).map_err(|err| CatalogError::InvalidParameter {
        rule_id: rule_id.to_string(),
        message: err.to_string(),
    })?;
    Ok(Predicate::Pattern {
        pattern,
        accept_blank,
    })
}

fn date() -> Predicate {
    Predicate::Date {
        accept_blank: false,
    }
}

fn number(accept_blank: bool) -> Predicate {
    Predicate::Number {
        accept_blank,
        whole: false,
    }
}

fn whole_number(accept_blank: bool) -> Predicate {
    Predicate::Number {
        accept_blank,
        whole: true,
    }
}

fn one_of(values: &[&str]) -> Predicate {
    Predicate::Enum {
        codes: codes(values),
        accept_blank: false,
        multi_value: false,
    }
}

fn optional_one_of(values: &[&str]) -> Predicate {
    Predicate::Enum {
        codes: codes(values),
        accept_blank: true,
        multi_value: false,
    }
}

fn exact_length(length: usize, accept_blank: bool) -> Predicate {
    Predicate::ExactLength {
        length,
        accept_blank,
    }
}

fn value_count(min: usize, max: Option<usize>) -> Predicate {
    Predicate::ValueCount { min, max }
}

fn unique_in_field() -> Predicate {
    Predicate::UniqueInField
}

fn single_value(values: &[&str]) -> Predicate {
    Predicate::MultiValueRestriction {
        single: codes(values),
    }
}

fn multi_field_count(related: &str, ignored: &[&str], max: usize) -> Predicate {
    Predicate::MultiFieldValueCount {
        related: related.to_string(),
        ignored: codes(ignored),
        max,
    }
}

fn conflict(related: &str, condition: &[&str]) -> Predicate {
    Predicate::ConditionalFieldConflict {
        related: related.to_string(),
        condition: codes(condition),
    }
}

fn enum_pair(related: &str, conditions: Vec<EnumCondition>) -> Predicate {
    Predicate::EnumPair {
        related: related.to_string(),
        conditions,
    }
}

fn fieldset(condition: &[&str], fieldset: Vec<FieldsetTarget>) -> Predicate {
    Predicate::FieldsetPair {
        condition: codes(condition),
        fieldset,
    }
}

fn at_least(limit: f64, accept_blank: bool) -> Predicate {
    Predicate::Compare {
        op: Comparison::GreaterThanOrEqual,
        limit,
        accept_blank,
    }
}

fn greater_than(limit: f64, accept_blank: bool) -> Predicate {
    Predicate::Compare {
        op: Comparison::GreaterThan,
        limit,
        accept_blank,
    }
}

fn less_than(limit: f64, accept_blank: bool) -> Predicate {
    Predicate::Compare {
        op: Comparison::LessThan,
        limit,
        accept_blank,
    }
}

fn date_range(rule_id: &str, start: &str, end: &str) -> Result<Predicate, CatalogError> {
    let bound = |value: &str| {
        parse_date(value).ok_or_else(|| CatalogError::InvalidParameter {
            rule_id: rule_id.to_string(),
            message: format!("'{value}' is not a YYYYMMDD date"),
        })
    };
    let (start, end): (NaiveDate, NaiveDate) = (bound(start)?, bound(end)?);
    Ok(Predicate::DateInRange { start, end })
}

fn on_or_after(related: &str) -> Predicate {
    Predicate::DateOnOrAfter {
        related: related.to_string(),
    }
}

fn within_days(related: &str, days: i64) -> Predicate {
    Predicate::DateWithinDays {
        related: related.to_string(),
        days,
    }
}

fn reference_code(set: &str, accept_blank: bool) -> Predicate {
    Predicate::ReferenceCode {
        set: set.to_string(),
        accept_blank,
    }
}

fn context_prefix(key: &str, prefix_len: usize) -> Predicate {
    Predicate::ContextPrefix {
        key: key.to_string(),
        prefix_len,
    }
}

fn unique_column() -> Predicate {
    Predicate::UniqueColumn
}

// ============================================================================
// Register fields 1-45
// ============================================================================

/// Unique identifier (field 1).
fn unique_identifier(b: &mut CatalogBuilder) -> Result<(), CatalogError> {
    b.syntactical(
        error("E0001", "uid.invalid_text_length", "uid", text_length(21, 45))
            .with_fig_anchor("4.1.1")
            .with_description("'Unique identifier' must be at least 21 characters in length and at most 45 characters in length."),
    );

    b.syntactical(
        error("E0002", "uid.invalid_text_pattern", "uid", pattern("E0002", UID_PATTERN, false)?)
            .with_fig_anchor("4.1.2")
            .with_description("'Unique identifier' may contain any combination of numbers and/or uppercase letters (i.e., 0-9 and A-Z), and must not contain any other characters."),
    );

    b.logical(
        error("E3000", "uid.duplicates_in_dataset", "uid", unique_column())
            .with_fig_anchor("4.3.1")
            .with_description("Any 'unique identifier' may not be used in more than one record within a small business lending application register."),
    );

    b.logical(
        warning("W0003", "uid.invalid_uid_lei", "uid", context_prefix(LEI_KEY, 20))
            .with_fig_anchor("4.4.1")
            .with_description("The first 20 characters of the 'unique identifier' should match the Legal Entity Identifier (LEI) for the financial institution."),
    );
    Ok(())
}

/// Application date, method and recipient (fields 2-4).
fn application(b: &mut CatalogBuilder) {
    b.syntactical(
        error("E0020", "app_date.invalid_date_format", "app_date", date())
            .with_fig_anchor("4.1.3")
            .with_description("'Application date' must be a real calendar date using YYYYMMDD format."),
    );

    b.syntactical(
        error("E0040", "app_method.invalid_enum_value", "app_method", one_of(APP_METHOD_CODES))
            .with_fig_anchor("4.1.4")
            .with_description("'Application method' must equal 1, 2, 3, or 4."),
    );

    b.syntactical(
        error(
            "E0060",
            "app_recipient.invalid_enum_value",
            "app_recipient",
            one_of(APP_RECIPIENT_CODES),
        )
        .with_fig_anchor("4.1.5")
        .with_description("'Application recipient' must equal 1 or 2."),
    );
}

/// Credit product, guarantees, loan term and purpose (fields 5-12).
fn credit_terms(b: &mut CatalogBuilder) {
    b.syntactical(
        error(
            "E0080",
            "ct_credit_product.invalid_enum_value",
            "ct_credit_product",
            one_of(CT_CREDIT_PRODUCT_CODES),
        )
        .with_fig_anchor("4.1.6")
        .with_description("'Credit product' must equal 1, 2, 3, 4, 5, 6, 7, 8, 977, or 988."),
    );

    b.syntactical(
        error(
            "E0100",
            "ct_credit_product_ff.invalid_text_length",
            "ct_credit_product_ff",
            text_length(0, 300),
        )
        .with_fig_anchor("4.1.7")
        .with_description("'Free-form text field for other credit products' must not exceed 300 characters in length."),
    );

    b.logical(
        error(
            "E2000",
            "ct_credit_product_ff.conditional_field_conflict",
            "ct_credit_product_ff",
            conflict("ct_credit_product", &["977"]),
        )
        .with_fig_anchor("4.2.1")
        .with_description("When 'credit product' does not equal 977 (other), 'free-form text field for other credit products' must be blank.\nWhen 'credit product' equals 977, 'free-form text field for other credit products' must not be blank."),
    );

    b.syntactical(
        error(
            "E0120",
            "ct_guarantee.invalid_enum_value",
            "ct_guarantee",
            one_of(CT_GUARANTEE_CODES),
        )
        .with_fig_anchor("4.1.8")
        .with_description("Each value in 'type of guarantee' (separated by semicolons) must equal 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 977, or 999."),
    );

    b.logical(
        error(
            "E0121",
            "ct_guarantee.invalid_number_of_values",
            "ct_guarantee",
            value_count(1, Some(5)),
        )
        .with_fig_anchor("4.1.9")
        .with_description("'Type of guarantee' must contain at least one and at most five values, separated by semicolons."),
    );

    b.logical(
        warning("W0123", "ct_guarantee.duplicates_in_field", "ct_guarantee", unique_in_field())
            .with_fig_anchor("4.4.3")
            .with_description("'Type of guarantee' should not contain duplicated values."),
    );

    b.logical(
        warning(
            "W0122",
            "ct_guarantee.multi_value_field_restriction",
            "ct_guarantee",
            single_value(&["999"]),
        )
        .with_fig_anchor("4.4.2")
        .with_description("When 'type of guarantee' contains 999 (no guarantee), 'type of guarantee' should not contain more than one value."),
    );

    b.syntactical(
        error(
            "E0140",
            "ct_guarantee_ff.invalid_text_length",
            "ct_guarantee_ff",
            text_length(0, 300),
        )
        .with_fig_anchor("4.1.10")
        .with_description("'Free-form text field for other guarantee' must not exceed 300 characters in length."),
    );

    b.logical(
        error(
            "E2001",
            "ct_guarantee_ff.conditional_field_conflict",
            "ct_guarantee_ff",
            conflict("ct_guarantee", &["977"]),
        )
        .with_fig_anchor("4.2.2")
        .with_description("When 'type of guarantee' does not contain 977 (other), 'free-form text field for other guarantee' must be blank.\nWhen 'type of guarantee' contains 977, 'free-form text field for other guarantee' must not be blank."),
    );

    b.logical(
        warning(
            "W2002",
            "ct_guarantee_ff.multi_invalid_number_of_values",
            "ct_guarantee_ff",
            multi_field_count("ct_guarantee", &["977"], 5),
        )
        .with_fig_anchor("4.5.1")
        .with_description("'Type of guarantee' and 'free-form text field for other guarantee' combined should not contain more than five values. Code 977 (other), within 'type of guarantee', does not count toward the maximum number of values for the purpose of this validation check."),
    );

    b.syntactical(
        error(
            "E0160",
            "ct_loan_term_flag.invalid_enum_value",
            "ct_loan_term_flag",
            one_of(NA_NP_FLAG_CODES),
        )
        .with_fig_anchor("4.1.11")
        .with_description("'Loan term: NA/NP flag' must equal 900, 988, or 999."),
    );

    b.logical(
        error(
            "E2003",
            "ct_loan_term_flag.enum_value_conflict",
            "ct_loan_term_flag",
            enum_pair(
                "ct_credit_product",
                vec![
                    EnumCondition::new(&["1", "2"], true, "999", false),
                    EnumCondition::new(&["988"], true, "999", true),
                ],
            ),
        )
        .with_fig_anchor("4.2.3")
        .with_description("When 'credit product' equals 1 (term loan - unsecured) or 2 (term loan - secured), 'loan term: NA/NP flag' must not equal 999 (not applicable).\nWhen 'credit product' equals 988 (not provided by applicant and otherwise undetermined), 'loan term: NA/NP flag' must equal 999."),
    );

    b.syntactical(
        error("E0180", "ct_loan_term.invalid_numeric_format", "ct_loan_term", whole_number(true))
            .with_fig_anchor("4.1.12")
            .with_description("When present, 'loan term' must be a whole number."),
    );

    b.logical(
        error(
            "E2004",
            "ct_loan_term.conditional_field_conflict",
            "ct_loan_term",
            conflict("ct_loan_term_flag", &["900"]),
        )
        .with_fig_anchor("4.2.4")
        .with_description("When 'loan term: NA/NP flag' does not equal 900 (applicable and reported), 'loan term' must be blank.\nWhen 'loan term: NA/NP flag' equals 900, 'loan term' must not be blank."),
    );

    b.logical(
        error("E0181", "ct_loan_term.invalid_numeric_value", "ct_loan_term", at_least(1.0, true))
            .with_fig_anchor("4.1.13")
            .with_description("When present, 'loan term' must be greater than or equal to 1."),
    );

    b.logical(
        warning(
            "W0182",
            "ct_loan_term.unreasonable_numeric_value",
            "ct_loan_term",
            less_than(1200.0, true),
        )
        .with_fig_anchor("4.4.4")
        .with_description("When present, 'loan term' should be less than 1200 (100 years)."),
    );

    b.syntactical(
        error(
            "E0200",
            "credit_purpose.invalid_enum_value",
            "credit_purpose",
            one_of(CREDIT_PURPOSE_CODES),
        )
        .with_fig_anchor("4.1.14")
        .with_description("Each value in 'credit purpose' (separated by semicolons) must equal 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 977, 988, or 999."),
    );

    b.logical(
        error(
            "E0201",
            "credit_purpose.invalid_number_of_values",
            "credit_purpose",
            value_count(1, Some(3)),
        )
        .with_fig_anchor("4.1.15")
        .with_description("'Credit purpose' must contain at least one and at most three values, separated by semicolons."),
    );

    b.logical(
        warning(
            "W0202",
            "credit_purpose.multi_value_field_restriction",
            "credit_purpose",
            single_value(&["988", "999"]),
        )
        .with_fig_anchor("4.4.5")
        .with_description("When 'credit purpose' contains 988 (not provided by applicant and otherwise undetermined) or 999 (not applicable), 'credit purpose' should not contain more than one value."),
    );

    b.logical(
        warning("W0203", "credit_purpose.duplicates_in_field", "credit_purpose", unique_in_field())
            .with_fig_anchor("4.4.6")
            .with_description("'Credit purpose' should not contain duplicated values."),
    );

    b.syntactical(
        error(
            "E0220",
            "credit_purpose_ff.invalid_text_length",
            "credit_purpose_ff",
            text_length(0, 300),
        )
        .with_fig_anchor("4.1.16")
        .with_description("'Free-form text field for other credit purpose' must not exceed 300 characters in length."),
    );

    b.logical(
        error(
            "E2005",
            "credit_purpose_ff.conditional_field_conflict",
            "credit_purpose_ff",
            conflict("credit_purpose", &["977"]),
        )
        .with_fig_anchor("4.2.5")
        .with_description("When 'credit purpose' does not contain 977 (other), 'free-form text field for other credit purpose' must be blank.\nWhen 'credit purpose' contains 977 (other), 'free-form text field for other credit purpose' must not be blank."),
    );

    b.logical(
        warning(
            "W2006",
            "credit_purpose_ff.multi_invalid_number_of_values",
            "credit_purpose_ff",
            multi_field_count("credit_purpose", &["977"], 3),
        )
        .with_fig_anchor("4.5.2")
        .with_description("'Credit purpose' and 'free-form text field for other credit purpose' combined should not contain more than three values. Code 977 (other), within 'credit purpose', does not count toward the maximum number of values for the purpose of this validation check."),
    );
}

/// Amounts, action taken and denial reasons (fields 13-19).
fn amounts_and_action(b: &mut CatalogBuilder) -> Result<(), CatalogError> {
    b.syntactical(
        error(
            "E0240",
            "amount_applied_for_flag.invalid_enum_value",
            "amount_applied_for_flag",
            one_of(NA_NP_FLAG_CODES),
        )
        .with_fig_anchor("4.1.17")
        .with_description("'Amount applied For: NA/NP flag' must equal 900, 988, or 999."),
    );

    b.syntactical(
        error(
            "E0260",
            "amount_applied_for.invalid_numeric_format",
            "amount_applied_for",
            number(true),
        )
        .with_fig_anchor("4.1.18")
        .with_description("When present, 'amount applied for' must be a numeric value."),
    );

    b.logical(
        error(
            "E2007",
            "amount_applied_for.conditional_field_conflict",
            "amount_applied_for",
            conflict("amount_applied_for_flag", &["900"]),
        )
        .with_fig_anchor("4.2.6")
        .with_description("When 'amount applied for: NA/NP flag' does not equal 900 (applicable and reported), 'amount applied for' must be blank.\nWhen 'amount applied for: NA/NP flag' equals 900, 'amount applied for' must not be blank."),
    );

    b.logical(
        error(
            "E0261",
            "amount_applied_for.invalid_numeric_value",
            "amount_applied_for",
            greater_than(0.0, true),
        )
        .with_fig_anchor("4.1.19")
        .with_description("When present, 'amount applied for' must be greater than 0."),
    );

    b.syntactical(
        error("E0280", "amount_approved.invalid_numeric_format", "amount_approved", number(true))
            .with_fig_anchor("4.1.20")
            .with_description("When present, 'amount approved or originated' must be a numeric value."),
    );

    b.logical(
        error(
            "E0281",
            "amount_approved.invalid_numeric_value",
            "amount_approved",
            greater_than(0.0, true),
        )
        .with_fig_anchor("4.1.21")
        .with_description("When present, 'amount approved or originated' must be greater than 0."),
    );

    b.logical(
        error(
            "E2008",
            "amount_approved.conditional_field_conflict",
            "amount_approved",
            conflict("action_taken", &["1", "2"]),
        )
        .with_fig_anchor("4.2.7")
        .with_description("When 'action taken' does not equal 1 (originated) or 2 (approved but not accepted), 'amount approved or originated' must be blank.\nWhen 'action taken' equals 1 or 2, 'amount approved or originated' must not be blank."),
    );

    b.syntactical(
        error(
            "E0300",
            "action_taken.invalid_enum_value",
            "action_taken",
            one_of(ACTION_TAKEN_CODES),
        )
        .with_fig_anchor("4.1.22")
        .with_description("'Action taken' must equal 1, 2, 3, 4, or 5."),
    );

    b.logical(
        error(
            "E2014",
            "pricing_all.conditional_fieldset_conflict",
            "action_taken",
            fieldset(
                &["3", "4", "5"],
                vec![
                    FieldsetTarget::must_equal("pricing_interest_rate_type", "999"),
                    FieldsetTarget::must_equal("pricing_mca_addcost_flag", "999"),
                    FieldsetTarget::must_equal("pricing_prepenalty_allowed", "999"),
                    FieldsetTarget::must_equal("pricing_prepenalty_exists", "999"),
                    FieldsetTarget::must_equal("pricing_origination_charges", ""),
                    FieldsetTarget::must_equal("pricing_broker_fees", ""),
                    FieldsetTarget::must_equal("pricing_initial_charges", ""),
                ],
            ),
        )
        .with_fig_anchor("4.2.11")
        .with_description("When 'action taken' equals 3 (denied), 4 (withdrawn by applicant), or 5 (incomplete), the following fields must all equal 999 (not applicable):\n'Interest rate type'\n'MCA/sales-based: additional cost for merchant cash advances or other sales-based financing: NA flag'\n'Prepayment penalty could be imposed'\n'Prepayment penalty exists'\nAnd the following fields must all be blank:\n'Total origination charges'\n'Amount of total broker fees'\n'Initial annual charges'"),
    );

    b.logical(
        error(
            "E2015",
            "pricing_charges.conditional_fieldset_conflict",
            "action_taken",
            fieldset(
                &["1", "2"],
                vec![
                    FieldsetTarget::must_not_equal("pricing_origination_charges", ""),
                    FieldsetTarget::must_not_equal("pricing_broker_fees", ""),
                    FieldsetTarget::must_not_equal("pricing_initial_charges", ""),
                    FieldsetTarget::must_not_equal("pricing_prepenalty_allowed", "999"),
                    FieldsetTarget::must_not_equal("pricing_prepenalty_exists", "999"),
                ],
            ),
        )
        .with_fig_anchor("4.2.12")
        .with_description("When 'action taken' equals 1 (originated) or 2 (approved but not accepted), the following fields all must not be blank:\n'Total origination charges'\n'Amount of total broker fees'\n'Initial annual charges'\nAnd the following fields must not equal 999 (not applicable):\n'Prepayment penalty could be imposed'\n'Prepayment penalty exists'"),
    );

    b.syntactical(
        error("E0320", "action_taken_date.invalid_date_format", "action_taken_date", date())
            .with_fig_anchor("4.1.23")
            .with_description("'Action taken date' must be a real calendar date using YYYYMMDD format."),
    );

    b.logical(
        error(
            "E0321",
            "action_taken_date.invalid_date_value",
            "action_taken_date",
            date_range("E0321", "20241001", "20241231")?,
        )
        .with_fig_anchor("4.1.24")
        .with_description("The date indicated by 'action taken date' must occur within the current reporting period: October 1, 2024 to December 31, 2024."),
    );

    b.logical(
        error(
            "E2009",
            "action_taken_date.date_value_conflict",
            "action_taken_date",
            on_or_after("app_date"),
        )
        .with_fig_anchor("4.2.8")
        .with_description("The date indicated by 'action taken date' must occur on or after 'application date'."),
    );

    b.logical(
        warning(
            "W2010",
            "action_taken_date.unreasonable_date_value",
            "action_taken_date",
            within_days("app_date", 730),
        )
        .with_fig_anchor("4.5.3")
        .with_description("The date indicated by 'application date' should generally be less than two years (730 days) before 'action taken date'."),
    );

    b.syntactical(
        error(
            "E0340",
            "denial_reasons.invalid_enum_value",
            "denial_reasons",
            one_of(DENIAL_REASONS_CODES),
        )
        .with_fig_anchor("4.1.25")
        .with_description("Each value in 'denial reason(s)' (separated by semicolons) must equal 1, 2, 3, 4, 5, 6, 7, 8, 9, 977, or 999."),
    );

    b.logical(
        error(
            "E0341",
            "denial_reasons.invalid_number_of_values",
            "denial_reasons",
            value_count(1, Some(4)),
        )
        .with_fig_anchor("4.1.26")
        .with_description("'Denial reason(s)' must contain at least one and at most four values, separated by semicolons."),
    );

    b.logical(
        error(
            "E2011",
            "denial_reasons.enum_value_conflict",
            "denial_reasons",
            enum_pair(
                "action_taken",
                vec![
                    EnumCondition::new(&["3"], true, "999", false),
                    EnumCondition::new(&["3"], false, "999", true),
                ],
            ),
        )
        .with_fig_anchor("4.2.9")
        .with_description("When 'action taken' equals 3, 'denial reason(s)' must not contain 999.\nWhen 'action taken' does not equal 3 (denied), 'denial reason(s)' must equal 999 (not applicable)."),
    );

    b.logical(
        warning(
            "W0340",
            "denial_reasons.multi_value_field_restriction",
            "denial_reasons",
            single_value(&["999"]),
        )
        .with_fig_anchor("4.4.7")
        .with_description("When 'denial reason(s)' contains 999 (not applicable), 'denial reason(s)' should not contain more than one value."),
    );

    b.logical(
        warning("W0341", "denial_reasons.duplicates_in_field", "denial_reasons", unique_in_field())
            .with_fig_anchor("4.4.8")
            .with_description("'Denial reason(s)' should not contain duplicated values."),
    );

    b.syntactical(
        error(
            "E0360",
            "denial_reasons_ff.invalid_text_length",
            "denial_reasons_ff",
            text_length(0, 300),
        )
        .with_fig_anchor("4.1.27")
        .with_description("'Free-form text field for other denial reason(s)' must not exceed 300 characters in length."),
    );

    b.logical(
        error(
            "E2012",
            "denial_reasons_ff.conditional_field_conflict",
            "denial_reasons_ff",
            conflict("denial_reasons", &["977"]),
        )
        .with_fig_anchor("4.2.10")
        .with_description("When 'denial reason(s)' does not contain 977 (other), field 'free-form text field for other denial reason(s)' must be blank.\nWhen 'denial reason(s)' contains 977, 'free-form text field for other denial reason(s)' must not be blank."),
    );

    b.logical(
        warning(
            "W2013",
            "denial_reasons_ff.multi_invalid_number_of_values",
            "denial_reasons_ff",
            multi_field_count("denial_reasons", &["977"], 4),
        )
        .with_fig_anchor("4.5.4")
        .with_description("'Denial reason(s)' and 'free-form text field for other denial reason(s)' combined should not contain more than four values. Code 977 (other), within 'Denial reason(s)', does not count toward the maximum number of values for the purpose of this validation check."),
    );
    Ok(())
}

fn pricing(b: &mut CatalogBuilder) {
    b.syntactical(
        error(
            "E0380",
            "pricing_interest_rate_type.invalid_enum_value",
            "pricing_interest_rate_type",
            one_of(PRICING_INTEREST_RATE_TYPE_CODES),
        )
        .with_fig_anchor("4.1.28")
        .with_description("'Interest rate type' must equal 1, 2, 3, 4, 5, 6, or 999."),
    );

    b.syntactical(
        error(
            "E0400",
            "pricing_init_rate_period.invalid_numeric_format",
            "pricing_init_rate_period",
            whole_number(true),
        )
        .with_fig_anchor("4.1.29")
        .with_description("When present, 'adjustable rate transaction: initial rate period' must be a whole number."),
    );

    b.logical(
        error(
            "E2016",
            "pricing_init_rate_period.conditional_field_conflict",
            "pricing_init_rate_period",
            conflict("pricing_interest_rate_type", &["3", "4", "5", "6"]),
        )
        .with_fig_anchor("4.2.13")
        .with_description("When 'interest rate type' does not equal 3 (initial rate period > 12 months, adjustable interest), 4 (initial rate period > 12 months, fixed interest), 5 (initial rate period <= 12 months, adjustable interest), or 6 (initial rate period <= 12 months, fixed interest), 'initial rate period' must be blank.\nWhen 'interest rate type' equals 3, 4, 5, or 6, 'initial rate period' must not be blank."),
    );

    b.logical(
        error(
            "E0401",
            "pricing_init_rate_period.invalid_numeric_value",
            "pricing_init_rate_period",
            greater_than(0.0, true),
        )
        .with_fig_anchor("4.1.30")
        .with_description("When present, 'adjustable rate transaction: initial rate period' must be greater than 0."),
    );

    b.syntactical(
        error(
            "E0420",
            "pricing_fixed_rate.invalid_numeric_format",
            "pricing_fixed_rate",
            number(true),
        )
        .with_fig_anchor("4.1.31")
        .with_description("When present, 'fixed rate: interest rate' must be a numeric value."),
    );

    b.logical(
        error(
            "E2017",
            "pricing_fixed_rate.conditional_field_conflict",
            "pricing_fixed_rate",
            conflict("pricing_interest_rate_type", &["2", "4", "6"]),
        )
        .with_fig_anchor("4.2.14")
        .with_description("When 'interest rate type' does not equal 2 (fixed interest rate, no initial rate period), 4 (initial rate period > 12 months, fixed interest rate), or 6 (initial rate period <= 12 months, fixed interest rate), 'fixed rate: interest rate' must be blank.\nWhen 'interest rate type' equals 2, 4, or 6, 'fixed rate: interest rate' must not be blank."),
    );

    b.logical(
        warning(
            "W0420",
            "pricing_fixed_rate.unreasonable_numeric_value",
            "pricing_fixed_rate",
            greater_than(0.1, true),
        )
        .with_fig_anchor("4.4.9")
        .with_description("When present, 'fixed rate: interest rate' should generally be greater than 0.1."),
    );

    b.syntactical(
        error(
            "E0440",
            "pricing_adj_margin.invalid_numeric_format",
            "pricing_adj_margin",
            number(true),
        )
        .with_fig_anchor("4.1.32")
        .with_description("When present, 'adjustable rate transaction: margin' must be a numeric value."),
    );

    b.logical(
        error(
            "E2018",
            "pricing_adj_margin.conditional_field_conflict",
            "pricing_adj_margin",
            conflict("pricing_interest_rate_type", &["1", "3", "5"]),
        )
        .with_fig_anchor("4.2.15")
        .with_description("When 'interest rate type' does not equal 1 (adjustable interest rate, no initial rate period), 3 (initial rate period > 12 months, adjustable interest rate), or 5 (initial rate period <= 12 months, adjustable interest rate), 'adjustable rate transaction: margin' must be blank.\nWhen 'interest rate type' equals 1, 3, or 5, 'adjustable rate transaction: margin' must not be blank."),
    );

    b.logical(
        warning(
            "W0441",
            "pricing_adj_margin.unreasonable_numeric_value",
            "pricing_adj_margin",
            greater_than(0.1, true),
        )
        .with_fig_anchor("4.4.10")
        .with_description("When present, 'adjustable rate transaction: margin' should generally be greater than 0.1."),
    );

    b.syntactical(
        error(
            "E0460",
            "pricing_adj_index_name.invalid_enum_value",
            "pricing_adj_index_name",
            one_of(PRICING_ADJ_INDEX_NAME_CODES),
        )
        .with_fig_anchor("4.1.33")
        .with_description("'Adjustable rate transaction: index name' must equal 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 977, or 999."),
    );

    b.logical(
        error(
            "E2019",
            "pricing_adj_index_name.enum_value_conflict",
            "pricing_adj_index_name",
            enum_pair(
                "pricing_interest_rate_type",
                vec![
                    EnumCondition::new(&["1", "3", "5"], false, "999", true),
                    EnumCondition::new(&["1", "3", "5"], true, "999", false),
                ],
            ),
        )
        .with_fig_anchor("4.2.16")
        .with_description("When 'interest rate type' does not equal 1 (adjustable interest rate, no initial rate period), 3 (initial rate period > 12 months, adjustable interest rate), or 5 (initial rate period <= 12 months, adjustable interest rate), 'adjustable rate transaction: index name' must equal 999.\nWhen 'interest rate type' equals 1, 3, or 5, 'adjustable rate transaction: index name' must not equal 999."),
    );

    b.syntactical(
        error(
            "E0480",
            "pricing_adj_index_name_ff.invalid_text_length",
            "pricing_adj_index_name_ff",
            text_length(0, 300),
        )
        .with_fig_anchor("4.1.34")
        .with_description("'Adjustable rate transaction: index name: other' must not exceed 300 characters in length."),
    );

    b.logical(
        error(
            "E2020",
            "pricing_adj_index_name_ff.conditional_field_conflict",
            "pricing_adj_index_name_ff",
            conflict("pricing_adj_index_name", &["977"]),
        )
        .with_fig_anchor("4.2.17")
        .with_description("When 'adjustable rate transaction: index name' does not equal 977 (other), 'adjustable rate transaction: index name: other' must be blank.\nWhen 'adjustable rate transaction: index name' equals 977, 'adjustable rate transaction: index name: other' must not be blank."),
    );

    b.syntactical(
        error(
            "E0500",
            "pricing_adj_index_value.invalid_numeric_format",
            "pricing_adj_index_value",
            number(true),
        )
        .with_fig_anchor("4.1.35")
        .with_description("When present, 'adjustable rate transaction: index value' must be a numeric value."),
    );

    b.logical(
        error(
            "E2021",
            "pricing_adj_index_value.conditional_field_conflict",
            "pricing_adj_index_value",
            conflict("pricing_interest_rate_type", &["1", "3"]),
        )
        .with_fig_anchor("4.2.18")
        .with_description("When 'interest rate type' does not equal 1 (adjustable interest rate, no initial rate period), or 3 (initial rate period > 12 months, adjustable interest rate), 'adjustable rate transaction: index value' must be blank.\nWhen 'interest rate type' equals 1 or 3, 'adjustable rate transaction: index value' must not be blank."),
    );

    b.syntactical(
        error(
            "E0520",
            "pricing_origination_charges.invalid_numeric_format",
            "pricing_origination_charges",
            number(true),
        )
        .with_fig_anchor("4.1.36")
        .with_description("When present, 'total origination charges' must be a numeric value."),
    );

    b.syntactical(
        error(
            "E0540",
            "pricing_broker_fees.invalid_numeric_format",
            "pricing_broker_fees",
            number(true),
        )
        .with_fig_anchor("4.1.37")
        .with_description("When present, 'amount of total broker fees' must be a numeric value."),
    );

    b.syntactical(
        error(
            "E0560",
            "pricing_initial_charges.invalid_numeric_format",
            "pricing_initial_charges",
            number(true),
        )
        .with_fig_anchor("4.1.38")
        .with_description("When present, 'initial annual charges' must be a numeric value."),
    );

    b.syntactical(
        error(
            "E0580",
            "pricing_mca_addcost_flag.invalid_enum_value",
            "pricing_mca_addcost_flag",
            one_of(PRICING_MCA_ADDCOST_FLAG_CODES),
        )
        .with_fig_anchor("4.1.39")
        .with_description("'MCA/sales-based: additional cost for merchant cash advances or other sales-based financing: NA flag' must equal 900 or 999."),
    );

    b.logical(
        error(
            "E2022",
            "pricing_mca_addcost_flag.enum_value_conflict",
            "pricing_mca_addcost_flag",
            enum_pair(
                "ct_credit_product",
                vec![
                    EnumCondition::new(&["7", "8", "977"], false, "999", true),
                ],
            ),
        )
        .with_fig_anchor("4.2.19")
        .with_description("When 'credit product' does not equal 7 (merchant cash advance), 8 (other sales-based financing transaction) or 977 (other), 'MCA/sales-based: additional cost for merchant cash advances or other sales-based financing: NA flag' must be 999 (not applicable)."),
    );

    b.syntactical(
        error(
            "E0600",
            "pricing_mca_addcost.invalid_numeric_format",
            "pricing_mca_addcost",
            number(true),
        )
        .with_fig_anchor("4.1.40")
        .with_description("When present, 'MCA/sales-based: additional cost for merchant cash advances or other sales-based financing' must be a numeric value."),
    );

    b.logical(
        error(
            "E2023",
            "pricing_mca_addcost.conditional_field_conflict",
            "pricing_mca_addcost",
            conflict("pricing_mca_addcost_flag", &["900"]),
        )
        .with_fig_anchor("4.2.20")
        .with_description("When 'MCA/sales-based: additional cost for merchant cash advances or other sales-based financing: NA flag' does not equal 900 (applicable), 'MCA/sales-based: additional cost for merchant cash advances or other sales-based financing' must be blank.\nWhen 'MCA/sales-based: additional cost for merchant cash advances or other sales-based financing: NA flag' equals 900, 'MCA/sales-based: additional cost for merchant cash advances or other sales-based financing' must not be blank."),
    );

    b.syntactical(
        error(
            "E0620",
            "pricing_prepenalty_allowed.invalid_enum_value",
            "pricing_prepenalty_allowed",
            one_of(PREPAYMENT_PENALTY_CODES),
        )
        .with_fig_anchor("4.1.41")
        .with_description("Prepayment penalty could be imposed' must equal 1, 2, or 999."),
    );

    b.syntactical(
        error(
            "E0640",
            "pricing_prepenalty_exists.invalid_enum_value",
            "pricing_prepenalty_exists",
            one_of(PREPAYMENT_PENALTY_CODES),
        )
        .with_fig_anchor("4.1.42")
        .with_description("'Prepayment penalty exists' must equal 1, 2, or 999."),
    );
}

/// Census tract, revenue, NAICS and business characteristics (fields 34-43).
fn census_and_business(b: &mut CatalogBuilder) {
    b.syntactical(
        error(
            "E0660",
            "census_tract_adr_type.invalid_enum_value",
            "census_tract_adr_type",
            one_of(CENSUS_TRACT_ADR_TYPE_CODES),
        )
        .with_fig_anchor("4.1.43")
        .with_description("'Census tract: type of address' must equal 1, 2, 3, or 988."),
    );

    b.syntactical(
        error(
            "E0680",
            "census_tract_number.invalid_text_length",
            "census_tract_number",
            exact_length(11, true),
        )
        .with_fig_anchor("4.1.44")
        .with_description("When present, 'census tract: tract number' must be a GEOID with exactly 11 digits."),
    );

    b.logical(
        error(
            "E2024",
            "census_tract_number.conditional_field_conflict",
            "census_tract_number",
            enum_pair(
                "census_tract_adr_type",
                vec![
                    EnumCondition::new(&["1", "2", "3"], true, "", false),
                    EnumCondition::new(&["988"], true, "", true),
                ],
            ),
        )
        .with_fig_anchor("4.2.21")
        .with_description("When 'census tract: type of address' equals 988 (not provided by applicant and otherwise undetermined), 'census tract: tract number' must be blank.\nWhen 'census tract: type of address' equals 1 (address or location where the loan proceeds will principally be applied), 2 (address or location of borrower's main office or headquarters), or 3 (another address or location associated with the applicant), 'census tract: tract number' must not be blank."),
    );

    b.logical(
        warning(
            "W0680",
            "census_tract_number.invalid_geoid",
            "census_tract_number",
            reference_code(CENSUS_GEOIDS, true),
        )
        .with_fig_anchor("4.4.11")
        .with_description("When present, 'census tract: tract number' should be a valid census tract GEOID as defined by the U.S. Census Bureau."),
    );

    b.syntactical(
        error(
            "E0700",
            "gross_annual_revenue_flag.invalid_enum_value",
            "gross_annual_revenue_flag",
            one_of(NP_FLAG_CODES),
        )
        .with_fig_anchor("4.1.45")
        .with_description("'Gross annual revenue: NP flag' must equal 900 or 988."),
    );

    b.syntactical(
        error(
            "E0720",
            "gross_annual_revenue.invalid_numeric_format",
            "gross_annual_revenue",
            number(true),
        )
        .with_fig_anchor("4.1.46")
        .with_description("When present, 'gross annual revenue' must be a numeric value."),
    );

    b.logical(
        error(
            "E2025",
            "gross_annual_revenue.conditional_field_conflict",
            "gross_annual_revenue",
            conflict("gross_annual_revenue_flag", &["900"]),
        )
        .with_fig_anchor("4.2.22")
        .with_description("When 'gross annual revenue: NP flag' does not equal 900 (reported), 'gross annual revenue' must be blank.\nWhen 'gross annual revenue: NP flag' equals 900, 'gross annual revenue' must not be blank."),
    );

    b.syntactical(
        error(
            "E0740",
            "naics_code_flag.invalid_enum_value",
            "naics_code_flag",
            one_of(NP_FLAG_CODES),
        )
        .with_fig_anchor("4.1.47")
        .with_description("'North American Industry Classification System (NAICS) code: NP flag' must equal 900 or 988."),
    );

    b.syntactical(
        error("E0761", "naics_code.invalid_naics_format", "naics_code", number(true))
            .with_fig_anchor("4.1.49")
            .with_description("'North American Industry Classification System (NAICS) code' may only contain numeric characters."),
    );

    b.logical(
        error("E0760", "naics_code.invalid_text_length", "naics_code", exact_length(3, true))
            .with_fig_anchor("4.1.48")
            .with_description("When present, 'North American Industry Classification System (NAICS) code' must be three digits in length."),
    );

    b.logical(
        warning(
            "W0762",
            "naics_code.invalid_naics_value",
            "naics_code",
            reference_code(NAICS_CODES, true),
        )
        .with_fig_anchor("4.4.12")
        .with_description("When present, 'North American Industry Classification System (NAICS) code' should be a valid NAICS code."),
    );

    b.logical(
        error(
            "E2026",
            "naics_code.conditional_field_conflict",
            "naics_code",
            conflict("naics_code_flag", &["900"]),
        )
        .with_fig_anchor("4.2.23")
        .with_description("When 'North American Industry Classification System (NAICS) code: NP flag' does not equal 900 (reported), 'North American Industry Classification System (NAICS) code' must be blank.\nWhen 'North American Industry Classification System (NAICS) code: NP flag' equals 900, 'North American Industry Classification System (NAICS) code' must not be blank."),
    );

    b.syntactical(
        error(
            "E0780",
            "number_of_workers.invalid_enum_value",
            "number_of_workers",
            one_of(NUMBER_OF_WORKERS_CODES),
        )
        .with_fig_anchor("4.1.50")
        .with_description("'Number of workers' must equal 1, 2, 3, 4, 5, 6, 7, 8, 9, or 988."),
    );

    b.syntactical(
        error(
            "E0800",
            "time_in_business_type.invalid_enum_value",
            "time_in_business_type",
            one_of(TIME_IN_BUSINESS_TYPE_CODES),
        )
        .with_fig_anchor("4.1.51")
        .with_description("'Time in business: type of response' must equal 1, 2, 3, or 988."),
    );

    b.syntactical(
        error(
            "E0820",
            "time_in_business.invalid_numeric_format",
            "time_in_business",
            whole_number(true),
        )
        .with_fig_anchor("4.1.52")
        .with_description("When present, 'time in business' must be a whole number."),
    );

    b.logical(
        error(
            "E0821",
            "time_in_business.invalid_numeric_value",
            "time_in_business",
            at_least(0.0, true),
        )
        .with_fig_anchor("4.1.53")
        .with_description("When present, 'time in business' must be greater than or equal to 0."),
    );

    b.logical(
        error(
            "E2027",
            "time_in_business.conditional_field_conflict",
            "time_in_business",
            conflict("time_in_business_type", &["1"]),
        )
        .with_fig_anchor("4.2.24")
        .with_description("When 'time in business: type of response' does not equal 1 (the number of years an applicant has been in business is collected or obtained by the financial institution), 'time in business' must be blank.\nWhen 'time in business: type of response' equals 1, 'time in business' must not be blank."),
    );

    b.syntactical(
        error(
            "E0840",
            "business_ownership_status.invalid_enum_value",
            "business_ownership_status",
            one_of(BUSINESS_OWNERSHIP_STATUS_CODES),
        )
        .with_fig_anchor("4.1.54")
        .with_description("Each value in 'business ownership status' (separated by semicolons) must equal 1, 2, 3, 955, 966, or 988."),
    );

    b.logical(
        error(
            "E0841",
            "business_ownership_status.invalid_number_of_values",
            "business_ownership_status",
            value_count(1, None),
        )
        .with_fig_anchor("4.1.55")
        .with_description("'Business ownership status' must contain at least one value."),
    );

    b.logical(
        warning(
            "W0842",
            "business_ownership_status.duplicates_in_field",
            "business_ownership_status",
            unique_in_field(),
        )
        .with_fig_anchor("4.4.13")
        .with_description("'Business ownership status' should not contain duplicated values."),
    );

    b.logical(
        warning(
            "W0843",
            "business_ownership_status.multi_value_field_restriction",
            "business_ownership_status",
            single_value(&["966", "988"]),
        )
        .with_fig_anchor("4.4.14")
        .with_description("When 'business ownership status' contains 966 (the applicant responded that they did not wish to provide this information) or 988 (not provided by applicant), 'business ownership status' should not contain more than one value."),
    );
}

fn principal_owner_count(b: &mut CatalogBuilder) {
    b.syntactical(
        error(
            "E0860",
            "num_principal_owners_flag.invalid_enum_value",
            "num_principal_owners_flag",
            one_of(NP_FLAG_CODES),
        )
        .with_fig_anchor("4.1.56")
        .with_description("'Number of principal owners: NP flag' must equal 900 or 988."),
    );

    b.syntactical(
        error(
            "E0880",
            "num_principal_owners.invalid_enum_value",
            "num_principal_owners",
            optional_one_of(NUM_PRINCIPAL_OWNERS_CODES),
        )
        .with_fig_anchor("4.1.57")
        .with_description("When present, 'number of principal owners' must equal 0, 1, 2, 3, or 4."),
    );

    b.logical(
        error(
            "E2028",
            "num_principal_owners.conditional_field_conflict",
            "num_principal_owners",
            conflict("num_principal_owners_flag", &["900"]),
        )
        .with_fig_anchor("4.2.25")
        .with_description("When 'number of principal owners: NP flag' does not equal 900 (reported), 'number of principal owners' must be blank.\nWhen 'number of principal owners: NP flag' equals 900, 'number of principal owners' must not be blank."),
    );
}

// ============================================================================
// Principal owner demographics (fields 46-81)
// ============================================================================

/// Demographic fields that must be filled in for each reported owner.
const OWNER_DEMOGRAPHICS: [&str; 3] = ["ethnicity", "race", "gender_flag"];

const OWNER_COUNTS: [&str; 5] = ["0", "1", "2", "3", "4"];

/// W2035-W2039: owner demographics must line up with the number of owners.
fn owner_demographics(b: &mut CatalogBuilder) {
    for owners in 0..=MAX_PRINCIPAL_OWNERS {
        let condition: &[&str] = if owners == 0 {
            &["0", ""]
        } else {
            &OWNER_COUNTS[usize::from(owners)..=usize::from(owners)]
        };
        let targets = (1..=MAX_PRINCIPAL_OWNERS)
            .flat_map(|owner| {
                OWNER_DEMOGRAPHICS.map(|suffix| {
                    let field = format!("po_{owner}_{suffix}");
                    if owner <= owners {
                        FieldsetTarget::must_not_equal(&field, "")
                    } else {
                        FieldsetTarget::must_equal(&field, "")
                    }
                })
            })
            .collect();
        b.logical(
            warning(
                &rule_id('W', 2035 + owners),
                &format!("po_demographics_{owners}.conditional_fieldset_conflict"),
                "num_principal_owners",
                fieldset(condition, targets),
            )
            .with_fig_anchor(format!("4.5.{}", 5 + owners))
            .with_description(owner_count_description(owners)),
        );
    }
}

fn owner_count_description(owners: u16) -> String {
    if owners == 0 {
        return "When 'number of principal owners' equals 0 or is blank, demographic fields for \
                principal owners 1, 2, 3, and 4 should be blank."
            .to_string();
    }
    let reported = owner_list(1..=owners);
    let mut description = format!(
        "When 'number of principal owners' equals {owners}, 'ethnicity of principal owner {reported}', \
         'race of principal owner {reported}', and 'sex/gender of principal owner {reported}: NP flag' \
         should not be blank."
    );
    if owners < MAX_PRINCIPAL_OWNERS {
        let noun = if owners + 1 == MAX_PRINCIPAL_OWNERS { "owner" } else { "owners" };
        description.push_str(&format!(
            "\nDemographic fields for principal {noun} {} should be blank.",
            owner_list(owners + 1..=MAX_PRINCIPAL_OWNERS)
        ));
    }
    description
}

/// A free-form text field and the code of its companion field that requires it.
struct FreeFormText {
    suffix: &'static str,
    /// Companion field suffix.
    trigger: &'static str,
    code: &'static str,
    meaning: &'static str,
    title: &'static str,
    /// Base ids of the length and conflict rules for owner 1.
    length_id: u16,
    conflict_id: u16,
    /// Position among the owner's fields in section 4.1.
    length_slot: u16,
    /// Position among the owner's conflict rules in section 4.2.
    conflict_slot: u16,
}

const FREE_FORM_TEXT: [FreeFormText; 6] = [
    FreeFormText {
        suffix: "ethnicity_ff",
        trigger: "ethnicity",
        code: "977",
        meaning: "the applicant responded in the free-form text field",
        title: "free-form text field for other Hispanic or Latino",
        length_id: 920,
        conflict_id: 2040,
        length_slot: 1,
        conflict_slot: 0,
    },
    FreeFormText {
        suffix: "race_anai_ff",
        trigger: "race",
        code: "971",
        meaning: "the applicant responded in the free-form text field for American Indian or \
                  Alaska Native Enrolled or Principal Tribe",
        title: "free-form text field for American Indian or Alaska Native Enrolled or Principal Tribe",
        length_id: 960,
        conflict_id: 2060,
        length_slot: 3,
        conflict_slot: 1,
    },
    FreeFormText {
        suffix: "race_asian_ff",
        trigger: "race",
        code: "972",
        meaning: "the applicant responded in the free-form text field for other Asian race",
        title: "free-form text field for other Asian",
        length_id: 980,
        conflict_id: 2080,
        length_slot: 4,
        conflict_slot: 2,
    },
    FreeFormText {
        suffix: "race_baa_ff",
        trigger: "race",
        code: "973",
        meaning: "the applicant responded in the free-form text field for other Black or African race",
        title: "free-form text field for other Black or African American",
        length_id: 1000,
        conflict_id: 2100,
        length_slot: 5,
        conflict_slot: 3,
    },
    FreeFormText {
        suffix: "race_pi_ff",
        trigger: "race",
        code: "974",
        meaning: "the applicant responded in the free-form text field for other Pacific Islander race",
        title: "free-form text field for other Pacific Islander race",
        length_id: 1020,
        conflict_id: 2120,
        length_slot: 6,
        conflict_slot: 4,
    },
    FreeFormText {
        suffix: "gender_ff",
        trigger: "gender_flag",
        code: "1",
        meaning: "the applicant responded in the free-form text field",
        title: "free-form text field for self-identified sex/gender",
        length_id: 1060,
        conflict_id: 2140,
        length_slot: 8,
        conflict_slot: 5,
    },
];

/// Rule ids advance by 180 per owner for field rules and by 1 for conflicts.
const OWNER_ID_STRIDE: u16 = 180;

fn principal_owner(b: &mut CatalogBuilder, owner: u16) {
    let k = owner - 1;
    let field = |suffix: &str| format!("po_{owner}_{suffix}");
    let field_anchor = |slot: u16| format!("4.1.{}", 58 + slot + 9 * k);
    let warning_anchor = |slot: u16| format!("4.4.{}", 15 + slot + 4 * k);
    let subject = |suffix: &str| match suffix {
        "ethnicity" => format!("ethnicity of principal owner {owner}"),
        "race" => format!("race of principal owner {owner}"),
        _ => format!("sex/gender of principal owner {owner}: NP flag"),
    };

    for (suffix, codes, base, slot, warning_base, warning_slot) in [
        ("ethnicity", OWNER_ETHNICITY_CODES, 900, 0, 901, 0),
        ("race", OWNER_RACE_CODES, 940, 2, 941, 2),
    ] {
        let name = field(suffix);
        let label = subject(suffix);
        b.syntactical(
            error(
                &rule_id('E', base + OWNER_ID_STRIDE * k),
                &format!("{name}.invalid_enum_value"),
                &name,
                optional_one_of(codes),
            )
            .with_fig_anchor(field_anchor(slot))
            .with_description(format!(
                "When present, each value in '{label}' (separated by semicolons) must equal {}.",
                join_list(codes, "or")
            )),
        );
        b.logical(
            warning(
                &rule_id('W', warning_base + OWNER_ID_STRIDE * k),
                &format!("{name}.duplicates_in_field"),
                &name,
                unique_in_field(),
            )
            .with_fig_anchor(warning_anchor(warning_slot))
            .with_description(format!("'{}' should not contain duplicated values.", capitalize(&label))),
        );
        b.logical(
            warning(
                &rule_id('W', warning_base + 1 + OWNER_ID_STRIDE * k),
                &format!("{name}.multi_value_field_restriction"),
                &name,
                single_value(&["966", "988"]),
            )
            .with_fig_anchor(warning_anchor(warning_slot + 1))
            .with_description(format!(
                "When '{label}' contains 966 (the applicant responded that they did not wish to \
                 provide this information) or 988 (not provided by applicant), '{label}' should not \
                 contain more than one value."
            )),
        );
    }

    let gender_flag = field("gender_flag");
    b.syntactical(
        error(
            &rule_id('E', 1040 + OWNER_ID_STRIDE * k),
            &format!("{gender_flag}.invalid_enum_value"),
            &gender_flag,
            optional_one_of(OWNER_GENDER_FLAG_CODES),
        )
        .with_fig_anchor(field_anchor(7))
        .with_description(format!(
            "When present, '{}' must equal {}.",
            subject("gender_flag"),
            join_list(OWNER_GENDER_FLAG_CODES, "or")
        )),
    );

    for text in &FREE_FORM_TEXT {
        let name = field(text.suffix);
        let trigger = subject(text.trigger);
        let described = match text.trigger {
            "gender_flag" => format!("sex/gender of principal owner {owner}: {}", text.title),
            _ => format!("{trigger}: {}", text.title),
        };
        let (absent, present) = if text.trigger == "gender_flag" {
            ("does not equal", "equals")
        } else {
            ("does not contain", "contains")
        };
        b.syntactical(
            error(
                &rule_id('E', text.length_id + OWNER_ID_STRIDE * k),
                &format!("{name}.invalid_text_length"),
                &name,
                text_length(0, 300),
            )
            .with_fig_anchor(field_anchor(text.length_slot))
            .with_description(format!(
                "'{}' must not exceed 300 characters in length.",
                capitalize(&described)
            )),
        );
        b.logical(
            error(
                &rule_id('E', text.conflict_id + k),
                &format!("{name}.conditional_field_conflict"),
                &name,
                conflict(&field(text.trigger), &[text.code]),
            )
            .with_fig_anchor(format!("4.2.{}", 26 + 4 * text.conflict_slot + k))
            .with_description(format!(
                "When '{trigger}' {absent} {code} ({meaning}), '{described}' must be blank.\n\
                 When '{trigger}' {present} {code}, '{described}' must not be blank.",
                code = text.code,
                meaning = text.meaning,
            )),
        );
    }
}

// ============================================================================
// Helpers
// ============================================================================

fn rule_id(prefix: char, number: u16) -> String {
    format!("{prefix}{number:04}")
}

/// "a", "a and b", "a, b, and c".
fn join_list(items: &[&str], conjunction: &str) -> String {
    match items {
        [] => String::new(),
        [only] => (*only).to_string(),
        [first, second] => format!("{first} {conjunction} {second}"),
        [head @ .., last] => format!("{}, {conjunction} {last}", head.join(", ")),
    }
}

/// Owner numbers `range` as an English list.
fn owner_list(range: std::ops::RangeInclusive<u16>) -> String {
    let numbers: Vec<String> = range.map(|owner| owner.to_string()).collect();
    let numbers: Vec<&str> = numbers.iter().map(String::as_str).collect();
    join_list(&numbers, "and")
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
