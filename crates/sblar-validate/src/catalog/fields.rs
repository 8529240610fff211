//! Column definitions of the small business lending application register.

use sblar_model::FieldSpec;

pub(super) const APP_METHOD_CODES: &[&str] = &["1", "2", "3", "4"];
pub(super) const APP_RECIPIENT_CODES: &[&str] = &["1", "2"];
pub(super) const CT_CREDIT_PRODUCT_CODES: &[&str] = &[
    "1", "2", "3", "4", "5", "6", "7", "8", "977", "988",
];
pub(super) const CT_GUARANTEE_CODES: &[&str] = &[
    "1", "2", "3", "4", "5", "6", "7", "8", "9", "10", "11", "977", "999",
];
pub(super) const NA_NP_FLAG_CODES: &[&str] = &["900", "988", "999"];
pub(super) const CREDIT_PURPOSE_CODES: &[&str] = &[
    "1", "2", "3", "4", "5", "6", "7", "8", "9", "10", "11", "977", "988", "999",
];
pub(super) const ACTION_TAKEN_CODES: &[&str] = &["1", "2", "3", "4", "5"];
pub(super) const DENIAL_REASONS_CODES: &[&str] = &[
    "1", "2", "3", "4", "5", "6", "7", "8", "9", "977", "999",
];
pub(super) const PRICING_INTEREST_RATE_TYPE_CODES: &[&str] = &["1", "2", "3", "4", "5", "6", "999"];
pub(super) const PRICING_ADJ_INDEX_NAME_CODES: &[&str] = &[
    "1", "2", "3", "4", "5", "6", "7", "8", "9", "10", "977", "999",
];
pub(super) const PRICING_MCA_ADDCOST_FLAG_CODES: &[&str] = &["900", "999"];
pub(super) const PREPAYMENT_PENALTY_CODES: &[&str] = &["1", "2", "999"];
pub(super) const CENSUS_TRACT_ADR_TYPE_CODES: &[&str] = &["1", "2", "3", "988"];
pub(super) const NP_FLAG_CODES: &[&str] = &["900", "988"];
pub(super) const NUMBER_OF_WORKERS_CODES: &[&str] = &[
    "1", "2", "3", "4", "5", "6", "7", "8", "9", "988",
];
pub(super) const TIME_IN_BUSINESS_TYPE_CODES: &[&str] = &["1", "2", "3", "988"];
pub(super) const BUSINESS_OWNERSHIP_STATUS_CODES: &[&str] = &["1", "2", "3", "955", "966", "988"];
pub(super) const NUM_PRINCIPAL_OWNERS_CODES: &[&str] = &["0", "1", "2", "3", "4"];

pub(super) const OWNER_ETHNICITY_CODES: &[&str] = &[
    "1", "11", "12", "13", "14", "2", "966", "977", "988",
];
pub(super) const OWNER_RACE_CODES: &[&str] = &[
    "1", "2", "21", "22", "23", "24", "25", "26", "27", "3", "31", "32", "33", "34", "35", "36", "37", "4",
    "41", "42", "43", "44", "5", "966", "971", "972", "973", "974", "988",
];
pub(super) const OWNER_GENDER_FLAG_CODES: &[&str] = &["1", "966", "988"];

/// Number of principal owners the register can describe.
pub(super) const MAX_PRINCIPAL_OWNERS: u16 = 4;

/// Every register column in filing order.
pub(super) fn register_fields() -> Vec<FieldSpec> {
    let mut fields = vec![
        FieldSpec::new("uid", 1, "Unique identifier"),
        FieldSpec::new("app_date", 2, "Application date"),
        FieldSpec::new("app_method", 3, "Application method").with_codes(APP_METHOD_CODES),
        FieldSpec::new("app_recipient", 4, "Application recipient").with_codes(APP_RECIPIENT_CODES),
        FieldSpec::new("ct_credit_product", 5, "Credit product")
            .with_codes(CT_CREDIT_PRODUCT_CODES),
        FieldSpec::new("ct_credit_product_ff", 6, "Free-form text field for other credit products")
            .optional(),
        FieldSpec::new("ct_guarantee", 7, "Type of guarantee")
            .with_codes(CT_GUARANTEE_CODES)
            .multi_value(),
        FieldSpec::new("ct_guarantee_ff", 8, "Free-form text field for other guarantee").optional(),
        FieldSpec::new("ct_loan_term_flag", 9, "Loan term: NA/NP flag")
            .with_codes(NA_NP_FLAG_CODES),
        FieldSpec::new("ct_loan_term", 10, "Loan term").optional(),
        FieldSpec::new("credit_purpose", 11, "Credit purpose")
            .with_codes(CREDIT_PURPOSE_CODES)
            .multi_value(),
        FieldSpec::new("credit_purpose_ff", 12, "Free-form text field for other credit purpose")
            .optional(),
        FieldSpec::new("amount_applied_for_flag", 13, "Amount applied for: NA/NP flag")
            .with_codes(NA_NP_FLAG_CODES),
        FieldSpec::new("amount_applied_for", 14, "Amount applied for").optional(),
        FieldSpec::new("amount_approved", 15, "Amount approved or originated").optional(),
        FieldSpec::new("action_taken", 16, "Action taken").with_codes(ACTION_TAKEN_CODES),
        FieldSpec::new("action_taken_date", 17, "Action taken date"),
        FieldSpec::new("denial_reasons", 18, "Denial reason(s)")
            .with_codes(DENIAL_REASONS_CODES)
            .multi_value(),
        FieldSpec::new("denial_reasons_ff", 19, "Free-form text field for other denial reason(s)")
            .optional(),
        FieldSpec::new("pricing_interest_rate_type", 20, "Interest rate type")
            .with_codes(PRICING_INTEREST_RATE_TYPE_CODES),
        FieldSpec::new("pricing_init_rate_period", 21, "Initial rate period").optional(),
        FieldSpec::new("pricing_fixed_rate", 22, "Fixed rate: interest rate").optional(),
        FieldSpec::new("pricing_adj_margin", 23, "Adjustable rate transaction: margin").optional(),
        FieldSpec::new("pricing_adj_index_name", 24, "Adjustable rate transaction: index name")
            .with_codes(PRICING_ADJ_INDEX_NAME_CODES),
        FieldSpec::new("pricing_adj_index_name_ff", 25, "Adjustable rate transaction: index name: other")
            .optional(),
        FieldSpec::new("pricing_adj_index_value", 26, "Adjustable rate transaction: index value")
            .optional(),
        FieldSpec::new("pricing_origination_charges", 27, "Total origination charges").optional(),
        FieldSpec::new("pricing_broker_fees", 28, "Amount of total broker fees").optional(),
        FieldSpec::new("pricing_initial_charges", 29, "Initial annual charges").optional(),
        FieldSpec::new("pricing_mca_addcost_flag", 30, "MCA/sales-based: additional cost for merchant cash advances or other sales-based financing: NA flag")
            .with_codes(PRICING_MCA_ADDCOST_FLAG_CODES),
        FieldSpec::new("pricing_mca_addcost", 31, "MCA/sales-based: additional cost for merchant cash advances or other sales-based financing")
            .optional(),
        FieldSpec::new("pricing_prepenalty_allowed", 32, "Prepayment penalty could be imposed")
            .with_codes(PREPAYMENT_PENALTY_CODES),
        FieldSpec::new("pricing_prepenalty_exists", 33, "Prepayment penalty exists")
            .with_codes(PREPAYMENT_PENALTY_CODES),
        FieldSpec::new("census_tract_adr_type", 34, "Type of address")
            .with_codes(CENSUS_TRACT_ADR_TYPE_CODES),
        FieldSpec::new("census_tract_number", 35, "Tract number").optional(),
        FieldSpec::new("gross_annual_revenue_flag", 36, "Gross annual revenue: NP flag")
            .with_codes(NP_FLAG_CODES),
        FieldSpec::new("gross_annual_revenue", 37, "Gross annual revenue").optional(),
        FieldSpec::new("naics_code_flag", 38, "North American Industry Classification System (NAICS) code: NP flag")
            .with_codes(NP_FLAG_CODES),
        FieldSpec::new("naics_code", 39, "North American Industry Classification System (NAICS) code")
            .optional(),
        FieldSpec::new("number_of_workers", 40, "Number of workers")
            .with_codes(NUMBER_OF_WORKERS_CODES),
        FieldSpec::new("time_in_business_type", 41, "Type of response")
            .with_codes(TIME_IN_BUSINESS_TYPE_CODES),
        FieldSpec::new("time_in_business", 42, "Time in business").optional(),
        FieldSpec::new("business_ownership_status", 43, "Business ownership status")
            .with_codes(BUSINESS_OWNERSHIP_STATUS_CODES)
            .multi_value(),
        FieldSpec::new("num_principal_owners_flag", 44, "Number of principal owners: NP flag")
            .with_codes(NP_FLAG_CODES),
        FieldSpec::new("num_principal_owners", 45, "Number of principal owners")
            .optional()
            .with_codes(NUM_PRINCIPAL_OWNERS_CODES),
    ];
    for owner in 1..=MAX_PRINCIPAL_OWNERS {
        fields.extend(principal_owner_fields(owner));
    }
    fields
}

/// The nine demographic columns of one principal owner, numbered from field 46.
fn principal_owner_fields(owner: u16) -> Vec<FieldSpec> {
    let first = 46 + (owner - 1) * 9;
    let spec = |offset: u16, suffix: &str, title: String| {
        FieldSpec::new(format!("po_{owner}_{suffix}"), first + offset, title).optional()
    };
    let race = format!("Race of principal owner {owner}");
    vec![
        spec(0, "ethnicity", format!("Ethnicity of principal owner {owner}"))
            .with_codes(OWNER_ETHNICITY_CODES)
            .multi_value(),
        spec(
            1,
            "ethnicity_ff",
            format!(
                "Ethnicity of principal owner {owner}: free-form text field for other Hispanic or Latino ethnicity"
            ),
        ),
        spec(2, "race", race.clone()).with_codes(OWNER_RACE_CODES).multi_value(),
        spec(
            3,
            "race_anai_ff",
            format!(
                "{race}: free-form text field for American Indian or Alaska Native Enrolled or Principal Tribe"
            ),
        ),
        spec(4, "race_asian_ff", format!("{race}: free-form text field for other Asian race")),
        spec(
            5,
            "race_baa_ff",
            format!("{race}: free-form text field for other Black or African American race"),
        ),
        spec(
            6,
            "race_pi_ff",
            format!("{race}: free-form text field for other Pacific Islander race"),
        ),
        spec(7, "gender_flag", format!("Sex/gender of principal owner {owner}: NP flag"))
            .with_codes(OWNER_GENDER_FLAG_CODES),
        spec(
            8,
            "gender_ff",
            format!(
                "Sex/gender of principal owner {owner}: free-form text field for self-identified sex/gender"
            ),
        ),
    ]
}
