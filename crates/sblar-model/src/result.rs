//! Aggregated outcome of a validation run.

use serde::{Deserialize, Serialize};

use crate::finding::{Finding, Phase, Scope, Severity};

/// Orchestrator lifecycle.
///
/// `NotStarted -> Phase1Running -> Phase1FailedTerminal`, or
/// `NotStarted -> Phase1Running -> Phase2Running -> Complete`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunState {
    NotStarted,
    Phase1Running,
    Phase1FailedTerminal,
    Phase2Running,
    Complete,
}

impl RunState {
    pub fn is_terminal(self) -> bool {
        matches!(self, RunState::Phase1FailedTerminal | RunState::Complete)
    }
}

/// Finding-record counts broken down by scope.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counts {
    pub single_field: usize,
    pub multi_field: usize,
    pub register: usize,
    pub total: usize,
}

impl Counts {
    /// Count the records of every finding with `severity`.
    pub fn tally(findings: &[Finding], severity: Severity) -> Self {
        let mut counts = Counts::default();
        for finding in findings.iter().filter(|f| f.severity == severity) {
            let n = finding.total_records;
            match finding.scope {
                Scope::SingleField => counts.single_field += n,
                Scope::MultiField => counts.multi_field += n,
                Scope::Register => counts.register += n,
            }
            counts.total += n;
        }
        counts
    }
}

/// A check that could not be evaluated against the dataset.
///
/// Diagnostics describe catalog/dataset mismatches, not data problems, and
/// are reported separately from findings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigDiagnostic {
    pub rule_id: String,
    pub name: String,
    pub phase: Phase,
    pub message: String,
}

/// Everything produced by one validation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    /// Findings in catalog declaration order.
    pub findings: Vec<Finding>,
    pub diagnostics: Vec<ConfigDiagnostic>,
    pub phases_run: Vec<Phase>,
    pub state: RunState,
    pub error_counts: Counts,
    pub warning_counts: Counts,
    /// True when the record cap dropped finding records.
    pub truncated: bool,
}

impl ValidationResult {
    /// Build a result and derive its counts.
    pub fn new(
        findings: Vec<Finding>,
        diagnostics: Vec<ConfigDiagnostic>,
        phases_run: Vec<Phase>,
        state: RunState,
    ) -> Self {
        let error_counts = Counts::tally(&findings, Severity::Error);
        let warning_counts = Counts::tally(&findings, Severity::Warning);
        let truncated = findings.iter().any(Finding::is_truncated);
        Self {
            findings,
            diagnostics,
            phases_run,
            state,
            error_counts,
            warning_counts,
            truncated,
        }
    }

    /// No findings of any severity.
    pub fn is_valid(&self) -> bool {
        self.findings.is_empty()
    }

    pub fn has_errors(&self) -> bool {
        self.findings
            .iter()
            .any(|finding| finding.severity == Severity::Error)
    }

    pub fn highest_severity(&self) -> Option<Severity> {
        self.findings
            .iter()
            .map(|finding| finding.severity)
            .max_by_key(|severity| severity.rank())
    }

    /// The last phase that ran.
    pub fn stopped_at(&self) -> Option<Phase> {
        self.phases_run.last().copied()
    }

    pub fn error_count(&self) -> usize {
        self.findings
            .iter()
            .filter(|finding| finding.severity == Severity::Error)
            .count()
    }

    pub fn warning_count(&self) -> usize {
        self.findings
            .iter()
            .filter(|finding| finding.severity == Severity::Warning)
            .count()
    }

    pub fn finding(&self, rule_id: &str) -> Option<&Finding> {
        self.findings
            .iter()
            .find(|finding| finding.rule_id == rule_id)
    }

    pub fn rule_ids(&self) -> Vec<&str> {
        self.findings
            .iter()
            .map(|finding| finding.rule_id.as_str())
            .collect()
    }
}
