//! Reference code sets consulted by membership checks.
//!
//! The validation engine only ever asks "is this code in set X?". Where the
//! codes come from (bundled CSVs, a database, a test fixture) is up to the
//! implementation.

use std::collections::{BTreeMap, BTreeSet};

/// Set name for 3-digit NAICS industry codes.
pub const NAICS_CODES: &str = "naics";
/// Set name for 11-digit census tract GEOIDs.
pub const CENSUS_GEOIDS: &str = "census_geoids";

/// Membership test capability over named code sets.
pub trait ReferenceData: Send + Sync {
    /// Whether `code` belongs to `set`. Unknown sets contain nothing.
    fn is_member(&self, set: &str, code: &str) -> bool;

    /// Every code in `set`.
    fn all_codes(&self, set: &str) -> BTreeSet<String>;
}

/// Reference data with no code sets. Every membership test fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyReferenceData;

impl ReferenceData for EmptyReferenceData {
    fn is_member(&self, _set: &str, _code: &str) -> bool {
        false
    }

    fn all_codes(&self, _set: &str) -> BTreeSet<String> {
        BTreeSet::new()
    }
}

/// In-memory code sets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticReferenceData {
    sets: BTreeMap<String, BTreeSet<String>>,
}

impl StaticReferenceData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or extend) a named code set.
    #[must_use]
    pub fn with_set<I, S>(mut self, set: impl Into<String>, codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.insert_set(set, codes);
        self
    }

    pub fn insert_set<I, S>(&mut self, set: impl Into<String>, codes: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sets
            .entry(set.into())
            .or_default()
            .extend(codes.into_iter().map(Into::into));
    }

    pub fn set_names(&self) -> impl Iterator<Item = &str> {
        self.sets.keys().map(String::as_str)
    }

    pub fn len(&self, set: &str) -> usize {
        self.sets.get(set).map_or(0, BTreeSet::len)
    }
}

impl ReferenceData for StaticReferenceData {
    fn is_member(&self, set: &str, code: &str) -> bool {
        self.sets
            .get(set)
            .is_some_and(|codes| codes.contains(code))
    }

    fn all_codes(&self, set: &str) -> BTreeSet<String> {
        self.sets.get(set).cloned().unwrap_or_default()
    }
}
