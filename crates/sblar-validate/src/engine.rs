//! Two-phase validation orchestrator.
//!
//! Phase 1 (syntactical) checks always run. Phase 2 (logical) checks run only
//! when phase 1 produced no error-severity finding; phase 1 warnings do not
//! block it. Checks inside a phase are independent and may run on the rayon
//! pool. Findings keep catalog declaration order either way.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use rayon::prelude::*;
use tracing::{debug, info, info_span, warn};

use sblar_model::{
    ConfigDiagnostic, Dataset, EmptyReferenceData, Finding, Phase, ReferenceData, RunState,
    Severity, ValidationContext, ValidationResult,
};

use crate::catalog::Catalog;
use crate::check::{Check, CheckInput};
use crate::error::{CheckError, Result, ValidateError};

/// What to do with checks that cannot be evaluated against the dataset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConfigErrorPolicy {
    /// Skip the check and report a [`ConfigDiagnostic`] in the result.
    #[default]
    Report,
    /// Fail the whole run with [`ValidateError::Configuration`].
    Abort,
}

/// Run-level switches for a [`Validator`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatorOptions {
    /// Evaluate the checks of a phase concurrently.
    pub parallel: bool,
    /// Keep at most this many records per finding. `total_records` still
    /// carries the full count.
    pub max_records: Option<usize>,
    pub config_errors: ConfigErrorPolicy,
}

impl Default for ValidatorOptions {
    fn default() -> Self {
        Self {
            parallel: true,
            max_records: None,
            config_errors: ConfigErrorPolicy::Report,
        }
    }
}

impl ValidatorOptions {
    pub fn sequential() -> Self {
        Self {
            parallel: false,
            ..Self::default()
        }
    }

    /// Abort instead of reporting checks that cannot run.
    pub fn strict() -> Self {
        Self {
            config_errors: ConfigErrorPolicy::Abort,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    #[must_use]
    pub fn with_max_records(mut self, max_records: Option<usize>) -> Self {
        self.max_records = max_records;
        self
    }

    #[must_use]
    pub fn with_config_errors(mut self, policy: ConfigErrorPolicy) -> Self {
        self.config_errors = policy;
        self
    }
}

/// Cooperative cancellation flag, checked before each check starts.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

static NO_REFERENCE_DATA: EmptyReferenceData = EmptyReferenceData;

/// Runs a [`Catalog`] against datasets.
///
/// A validator borrows its catalog and reference data, so any number of
/// validators (and concurrent runs) can share one catalog.
#[derive(Clone)]
pub struct Validator<'c> {
    catalog: &'c Catalog,
    reference: &'c dyn ReferenceData,
    options: ValidatorOptions,
}

impl<'c> Validator<'c> {
    pub fn new(catalog: &'c Catalog) -> Self {
        Self {
            catalog,
            reference: &NO_REFERENCE_DATA,
            options: ValidatorOptions::default(),
        }
    }

    #[must_use]
    pub fn with_reference(mut self, reference: &'c dyn ReferenceData) -> Self {
        self.reference = reference;
        self
    }

    #[must_use]
    pub fn with_options(mut self, options: ValidatorOptions) -> Self {
        self.options = options;
        self
    }

    pub fn catalog(&self) -> &Catalog {
        self.catalog
    }

    pub fn options(&self) -> &ValidatorOptions {
        &self.options
    }

    /// Validate `dataset` through both phases.
    pub fn validate(&self, dataset: &Dataset, context: &ValidationContext) -> Result<ValidationResult> {
        self.validate_with_cancel(dataset, context, &CancellationToken::new())
    }

    /// Like [`validate`](Self::validate), stopping with
    /// [`ValidateError::Cancelled`] once `cancel` is set.
    pub fn validate_with_cancel(
        &self,
        dataset: &Dataset,
        context: &ValidationContext,
        cancel: &CancellationToken,
    ) -> Result<ValidationResult> {
        let span = info_span!(
            "validate",
            records = dataset.height(),
            columns = dataset.width(),
            catalog = %self.catalog.version()
        );
        let _guard = span.enter();
        ensure_columns(dataset)?;

        let input = CheckInput {
            dataset,
            context,
            reference: self.reference,
        };
        let mut state = RunState::NotStarted;
        debug!(?state, "starting run");

        state = RunState::Phase1Running;
        debug!(?state, "running phase 1");
        let (mut findings, mut diagnostics) = self.run_phase(Phase::Syntactical, &input, cancel)?;
        self.check_config_policy(diagnostics.as_slice())?;
        let mut phases_run = vec![Phase::Syntactical];

        let blocking = findings
            .iter()
            .filter(|finding| finding.severity == Severity::Error)
            .count();
        if blocking > 0 {
            state = RunState::Phase1FailedTerminal;
            info!(
                blocking,
                "syntactical errors found; skipping logical checks"
            );
        } else {
            state = RunState::Phase2Running;
            debug!(?state, "running phase 2");
            let (logical, logical_diagnostics) = self.run_phase(Phase::Logical, &input, cancel)?;
            findings.extend(logical);
            diagnostics.extend(logical_diagnostics);
            phases_run.push(Phase::Logical);
            state = RunState::Complete;
        }

        self.finish(findings, diagnostics, phases_run, state)
    }

    /// Run the checks of a single phase, ignoring phase gating.
    ///
    /// The returned state is `Complete` when the phase ran to the end.
    pub fn validate_phase(
        &self,
        phase: Phase,
        dataset: &Dataset,
        context: &ValidationContext,
    ) -> Result<ValidationResult> {
        let span = info_span!("validate_phase", phase = phase.number(), records = dataset.height());
        let _guard = span.enter();
        ensure_columns(dataset)?;

        let input = CheckInput {
            dataset,
            context,
            reference: self.reference,
        };
        let (findings, diagnostics) = self.run_phase(phase, &input, &CancellationToken::new())?;
        self.finish(findings, diagnostics, vec![phase], RunState::Complete)
    }

    /// Under [`ConfigErrorPolicy::Abort`], stop as soon as a phase leaves
    /// checks unevaluated.
    fn check_config_policy(&self, diagnostics: &[ConfigDiagnostic]) -> Result<()> {
        if self.options.config_errors == ConfigErrorPolicy::Abort && !diagnostics.is_empty() {
            return Err(ValidateError::Configuration {
                diagnostics: diagnostics.to_vec(),
            });
        }
        Ok(())
    }

    fn finish(
        &self,
        findings: Vec<Finding>,
        diagnostics: Vec<ConfigDiagnostic>,
        phases_run: Vec<Phase>,
        state: RunState,
    ) -> Result<ValidationResult> {
        self.check_config_policy(&diagnostics)?;
        let result = ValidationResult::new(findings, diagnostics, phases_run, state);
        info!(
            state = ?result.state,
            findings = result.findings.len(),
            errors = result.error_counts.total,
            warnings = result.warning_counts.total,
            diagnostics = result.diagnostics.len(),
            "validation finished"
        );
        Ok(result)
    }

    fn run_phase(
        &self,
        phase: Phase,
        input: &CheckInput<'_>,
        cancel: &CancellationToken,
    ) -> Result<(Vec<Finding>, Vec<ConfigDiagnostic>)> {
        let checks = self.catalog.checks(phase);
        let evaluate = |check: &Check| {
            if cancel.is_cancelled() {
                return Err(ValidateError::Cancelled {
                    next_rule_id: check.rule_id.clone(),
                });
            }
            Ok(check.evaluate(phase, input))
        };
        let outcomes: Vec<std::result::Result<Option<Finding>, CheckError>> = if self.options.parallel {
            checks.par_iter().map(evaluate).collect::<Result<_>>()?
        } else {
            checks.iter().map(evaluate).collect::<Result<_>>()?
        };

        let mut findings = Vec::new();
        let mut diagnostics = Vec::new();
        for (check, outcome) in checks.iter().zip(outcomes) {
            match outcome {
                Ok(Some(mut finding)) => {
                    if let Some(max) = self.options.max_records {
                        finding.records.truncate(max);
                    }
                    debug!(
                        rule_id = %finding.rule_id,
                        records = finding.total_records,
                        "check failed"
                    );
                    findings.push(finding);
                }
                Ok(None) => {}
                Err(err) => {
                    warn!(rule_id = %check.rule_id, error = %err, "check skipped");
                    diagnostics.push(ConfigDiagnostic {
                        rule_id: check.rule_id.clone(),
                        name: check.name.clone(),
                        phase,
                        message: err.to_string(),
                    });
                }
            }
        }
        debug!(
            phase = phase.number(),
            checks = checks.len(),
            findings = findings.len(),
            "phase finished"
        );
        Ok((findings, diagnostics))
    }
}

fn ensure_columns(dataset: &Dataset) -> Result<()> {
    if dataset.width() == 0 {
        return Err(ValidateError::MalformedDataset {
            reason: "dataset has no columns".to_string(),
        });
    }
    Ok(())
}
