use std::path::Path;

use anyhow::{Context, Result};
use tracing::{info, info_span};

use sblar_ingest::{CsvReferenceData, read_dataset};
use sblar_model::{Phase, ValidationContext, ValidationResult};
use sblar_validate::{ConfigErrorPolicy, Validator, ValidatorOptions, sblar_catalog};
use sblar_cli::output::{
    catalog_json, catalog_table, diagnostics_table, findings_csv, findings_json, findings_table,
    status_line,
};

use crate::cli::{DescribeArgs, DescribeFormatArg, OutputFormatArg, PhaseArg, ValidateArgs};

pub fn run_validate(args: &ValidateArgs) -> Result<ValidationResult> {
    let span = info_span!("run_validate", path = %args.path.display());
    let _guard = span.enter();

    let catalog = sblar_catalog().context("build rule catalog")?;
    let reference = CsvReferenceData::load(args.naics.as_deref(), args.census.as_deref())
        .context("load reference data")?;
    let dataset = read_dataset(&args.path)
        .with_context(|| format!("read register: {}", args.path.display()))?;
    let context = build_context(&args.context);

    let options = ValidatorOptions::default()
        .with_parallel(!args.sequential)
        .with_max_records(args.max_records)
        .with_config_errors(if args.strict_config {
            ConfigErrorPolicy::Abort
        } else {
            ConfigErrorPolicy::Report
        });
    let result = Validator::new(&catalog)
        .with_reference(&reference)
        .with_options(options)
        .validate(&dataset, &context)
        .with_context(|| format!("validate {}", display_name(&args.path)))?;
    info!(
        findings = result.findings.len(),
        errors = result.error_counts.total,
        warnings = result.warning_counts.total,
        "register validated"
    );

    let rendered = match args.output {
        OutputFormatArg::Table => findings_table(&result),
        OutputFormatArg::Csv => findings_csv(&result)?,
        OutputFormatArg::Json => findings_json(&result)?,
    };
    if !result.findings.is_empty() || args.output != OutputFormatArg::Table {
        println!("{rendered}");
    }
    if !result.diagnostics.is_empty() {
        eprintln!("Skipped checks:");
        eprintln!("{}", diagnostics_table(&result.diagnostics));
    }
    Ok(result)
}

pub fn run_describe(args: &DescribeArgs) -> Result<()> {
    let catalog = sblar_catalog().context("build rule catalog")?;
    let phase = args.phase.map(|phase| match phase {
        PhaseArg::Syntactical => Phase::Syntactical,
        PhaseArg::Logical => Phase::Logical,
    });
    let rendered = match args.output {
        DescribeFormatArg::Table => catalog_table(&catalog, phase),
        DescribeFormatArg::Json => catalog_json(&catalog, phase)?,
    };
    println!("{rendered}");
    Ok(())
}

/// Print the status line that closes every validation.
pub fn print_status(result: &ValidationResult) {
    eprintln!("{}", status_line(result));
}

fn build_context(pairs: &[(String, String)]) -> ValidationContext {
    let mut context = ValidationContext::new();
    for (key, value) in pairs {
        context.insert(key.clone(), value.clone());
    }
    context
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map_or_else(|| path.display().to_string(), |name| name.to_string_lossy().into_owned())
}
