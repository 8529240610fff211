//! Validation engine for small business lending application registers.
//!
//! The crate is layered bottom-up:
//!
//! - [`predicates`]: pure batch functions over columns of strings.
//! - [`Predicate`] and [`Check`]: a rule's identity bound to one predicate.
//! - [`Catalog`]: the fixed, two-phase rule set ([`sblar_catalog`]).
//! - [`Validator`]: runs a catalog against a [`Dataset`](sblar_model::Dataset).

mod catalog;
mod check;
mod engine;
mod error;
mod predicate;
pub mod predicates;

pub use catalog::{CATALOG_VERSION, Catalog, CatalogBuilder, sblar_catalog};
pub use check::{Check, CheckInput, UID_FIELD};
pub use engine::{CancellationToken, ConfigErrorPolicy, Validator, ValidatorOptions};
pub use error::{CatalogError, CheckError, Result, ValidateError};
pub use predicate::{FieldsetTarget, Predicate};
pub use predicates::compare::Comparison;
pub use predicates::conditional::EnumCondition;
