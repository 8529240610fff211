//! Shared fixtures for the engine tests.
#![allow(dead_code)]

use sblar_model::Dataset;

pub const LEI: &str = "123456789TESTBANK123";

/// Fields 1-45 of a record that passes every check.
const BASE_RECORD: [(&str, &str); 45] = [
    ("uid", ""),
    ("app_date", "20241001"),
    ("app_method", "1"),
    ("app_recipient", "1"),
    ("ct_credit_product", "1"),
    ("ct_credit_product_ff", ""),
    ("ct_guarantee", "1"),
    ("ct_guarantee_ff", ""),
    ("ct_loan_term_flag", "900"),
    ("ct_loan_term", "12"),
    ("credit_purpose", "1"),
    ("credit_purpose_ff", ""),
    ("amount_applied_for_flag", "900"),
    ("amount_applied_for", "10000"),
    ("amount_approved", "10000"),
    ("action_taken", "1"),
    ("action_taken_date", "20241015"),
    ("denial_reasons", "999"),
    ("denial_reasons_ff", ""),
    ("pricing_interest_rate_type", "2"),
    ("pricing_init_rate_period", ""),
    ("pricing_fixed_rate", "5.5"),
    ("pricing_adj_margin", ""),
    ("pricing_adj_index_name", "999"),
    ("pricing_adj_index_name_ff", ""),
    ("pricing_adj_index_value", ""),
    ("pricing_origination_charges", "100"),
    ("pricing_broker_fees", "0"),
    ("pricing_initial_charges", "0"),
    ("pricing_mca_addcost_flag", "999"),
    ("pricing_mca_addcost", ""),
    ("pricing_prepenalty_allowed", "2"),
    ("pricing_prepenalty_exists", "2"),
    ("census_tract_adr_type", "988"),
    ("census_tract_number", ""),
    ("gross_annual_revenue_flag", "900"),
    ("gross_annual_revenue", "1000000"),
    ("naics_code_flag", "988"),
    ("naics_code", ""),
    ("number_of_workers", "1"),
    ("time_in_business_type", "1"),
    ("time_in_business", "5"),
    ("business_ownership_status", "1"),
    ("num_principal_owners_flag", "900"),
    ("num_principal_owners", "1"),
];

const OWNER_SUFFIXES: [&str; 9] = [
    "ethnicity",
    "ethnicity_ff",
    "race",
    "race_anai_ff",
    "race_asian_ff",
    "race_baa_ff",
    "race_pi_ff",
    "gender_flag",
    "gender_ff",
];

pub type Record = Vec<(String, String)>;

/// Unique identifier `n` for the test institution.
pub fn uid(n: u32) -> String {
    format!("{LEI}{n:05}")
}

/// A complete record with one principal owner that passes every check.
pub fn valid_record(uid: &str) -> Record {
    let mut record: Record = BASE_RECORD
        .iter()
        .map(|(field, value)| ((*field).to_string(), (*value).to_string()))
        .collect();
    record[0].1 = uid.to_string();
    for owner in 1..=4 {
        for suffix in OWNER_SUFFIXES {
            let value = match (owner, suffix) {
                (1, "ethnicity" | "race") => "1",
                (1, "gender_flag") => "966",
                _ => "",
            };
            record.push((format!("po_{owner}_{suffix}"), value.to_string()));
        }
    }
    record
}

/// Replace the value of `field` in `record`.
pub fn set(mut record: Record, field: &str, value: &str) -> Record {
    let slot = record
        .iter_mut()
        .find(|(name, _)| name == field)
        .unwrap_or_else(|| panic!("fixture has no field {field}"));
    slot.1 = value.to_string();
    record
}

/// Drop `field` from `record`.
pub fn without(mut record: Record, field: &str) -> Record {
    record.retain(|(name, _)| name != field);
    record
}

pub fn dataset(records: Vec<Record>) -> Dataset {
    Dataset::from_records(records)
}

/// `n` valid records with distinct identifiers.
pub fn valid_dataset(n: u32) -> Dataset {
    dataset((1..=n).map(|i| valid_record(&uid(i))).collect())
}
