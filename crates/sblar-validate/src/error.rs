//! Error types for catalog construction and validation runs.
//!
//! Data problems are never errors: they are reported as findings. The types
//! here cover a catalog that cannot be built, a check that cannot be
//! evaluated against a dataset, and a run that cannot produce a result.

use thiserror::Error;

use sblar_model::ConfigDiagnostic;

/// Problems detected while building a [`Catalog`](crate::Catalog).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CatalogError {
    /// A check was declared without a rule id.
    #[error("check '{name}' has no rule id")]
    EmptyRuleId { name: String },

    /// Two checks share a rule id.
    #[error("duplicate rule id '{rule_id}'")]
    DuplicateRuleId { rule_id: String },

    /// Two checks share a name.
    #[error("duplicate check name '{name}'")]
    DuplicateName { name: String },

    /// A field was declared twice.
    #[error("duplicate field '{name}'")]
    DuplicateField { name: String },

    /// A check targets a field the catalog does not declare.
    #[error("check '{rule_id}' references unknown field '{field}'")]
    UnknownField { rule_id: String, field: String },

    /// A check parameter is unusable (e.g. a regex that does not compile).
    #[error("check '{rule_id}' is misconfigured: {message}")]
    InvalidParameter { rule_id: String, message: String },
}

/// Problems that stop a single check from being evaluated.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CheckError {
    #[error("check '{name}' has no rule id")]
    MissingRuleId { name: String },

    #[error("check '{rule_id}' needs column '{column}', which the dataset does not have")]
    MissingColumn { rule_id: String, column: String },
}

impl CheckError {
    pub fn rule_id(&self) -> &str {
        match self {
            CheckError::MissingRuleId { .. } => "",
            CheckError::MissingColumn { rule_id, .. } => rule_id,
        }
    }
}

/// Fatal outcomes of a validation run. A run yields either a result or one of
/// these, never a partial result.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidateError {
    /// The dataset cannot be validated at all.
    #[error("malformed dataset: {reason}")]
    MalformedDataset { reason: String },

    /// The caller cancelled the run.
    #[error("validation cancelled before check '{next_rule_id}'")]
    Cancelled { next_rule_id: String },

    /// Checks could not be evaluated and the run was configured to abort.
    #[error("{} check(s) could not be evaluated; first: {}", .diagnostics.len(), first_message(.diagnostics))]
    Configuration { diagnostics: Vec<ConfigDiagnostic> },
}

impl ValidateError {
    /// Whether re-running with different input could succeed.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, ValidateError::Cancelled { .. })
    }
}

fn first_message(diagnostics: &[ConfigDiagnostic]) -> &str {
    diagnostics
        .first()
        .map_or("none", |diagnostic| diagnostic.message.as_str())
}

pub type Result<T> = std::result::Result<T, ValidateError>;
