use std::fmt;

use serde::{Deserialize, Serialize};

/// Base URL of the filing instructions guide that each check links into.
pub const FIG_BASE_URL: &str =
    "https://www.consumerfinance.gov/data-research/small-business-lending/filing-instructions-guide/2024-guide/";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

impl Severity {
    pub fn label(self) -> &'static str {
        match self {
            Severity::Error => "Error",
            Severity::Warning => "Warning",
        }
    }

    /// Parse a severity label, case-insensitively.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "error" => Some(Severity::Error),
            "warning" | "warn" => Some(Severity::Warning),
            _ => None,
        }
    }

    /// Error outranks warning.
    pub fn rank(self) -> u8 {
        match self {
            Severity::Error => 2,
            Severity::Warning => 1,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// How many fields or records a check looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Scope {
    /// One field of one record.
    SingleField,
    /// Several fields of one record.
    MultiField,
    /// One field across every record in the register.
    Register,
}

impl Scope {
    pub fn label(self) -> &'static str {
        match self {
            Scope::SingleField => "single-field",
            Scope::MultiField => "multi-field",
            Scope::Register => "register",
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Validation phase. Phase 2 only runs when phase 1 raised no errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// Phase 1: per-field syntax.
    Syntactical,
    /// Phase 2: cross-field, cross-record and value checks.
    Logical,
}

impl Phase {
    pub const ALL: [Phase; 2] = [Phase::Syntactical, Phase::Logical];

    pub fn label(self) -> &'static str {
        match self {
            Phase::Syntactical => "Syntactical",
            Phase::Logical => "Logical",
        }
    }

    pub fn number(self) -> u8 {
        match self {
            Phase::Syntactical => 1,
            Phase::Logical => 2,
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "syntactical" | "1" | "phase1" | "phase_1" => Some(Phase::Syntactical),
            "logical" | "2" | "phase2" | "phase_2" => Some(Phase::Logical),
            _ => None,
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A field name and the value it held in a failing record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldValue {
    pub name: String,
    pub value: String,
}

/// One record cited by a finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FindingRecord {
    /// Zero-based position in the dataset.
    pub record_index: usize,
    /// The record's `uid`, empty when the column is absent.
    pub uid: String,
    /// Target field values in the check's field order.
    pub fields: Vec<FieldValue>,
}

impl FindingRecord {
    /// One-based record number, as shown to filers.
    pub fn record_no(&self) -> usize {
        self.record_index + 1
    }

    pub fn value_of(&self, field: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|field_value| field_value.name == field)
            .map(|field_value| field_value.value.as_str())
    }
}

/// A single check that failed for one or more records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    pub rule_id: String,
    pub name: String,
    pub description: String,
    pub severity: Severity,
    pub scope: Scope,
    pub phase: Phase,
    /// Anchor into the filing instructions guide (e.g. `4.1.1`).
    pub fig_anchor: Option<String>,
    /// Target fields, primary field first.
    pub fields: Vec<String>,
    /// Failing records, ascending by record index.
    pub records: Vec<FindingRecord>,
    /// Number of failing records before any truncation.
    pub total_records: usize,
}

impl Finding {
    pub fn fig_link(&self) -> Option<String> {
        self.fig_anchor
            .as_ref()
            .map(|anchor| format!("{FIG_BASE_URL}#{anchor}"))
    }

    pub fn record_indices(&self) -> Vec<usize> {
        self.records.iter().map(|record| record.record_index).collect()
    }

    pub fn is_truncated(&self) -> bool {
        self.records.len() < self.total_records
    }
}
