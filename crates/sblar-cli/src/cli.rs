//! CLI argument definitions for the SBLAR validator.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "sblar",
    version,
    about = "Validate small business lending application registers",
    long_about = "Validate a small business lending application register (SBLAR) CSV file.\n\n\
                  Syntactical checks run first; logical checks run only when no\n\
                  syntactical check raised an error.\n\n\
                  The closing status line reads FAILURE when any finding was reported,\n\
                  warnings included, and counts one finding per failing record of each\n\
                  check. The exit code is 1 only when an error was reported."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format.
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Validate a register CSV file.
    Validate(ValidateArgs),

    /// List the checks in the rule catalog.
    Describe(DescribeArgs),
}

#[derive(Parser)]
pub struct ValidateArgs {
    /// Register CSV file.
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    /// Context parameter as KEY=VALUE (repeatable), e.g. --context lei=123456789TESTBANK123.
    #[arg(long = "context", value_name = "KEY=VALUE", value_parser = parse_context_pair)]
    pub context: Vec<(String, String)>,

    /// Findings output format.
    #[arg(long = "output", value_enum, default_value = "table")]
    pub output: OutputFormatArg,

    /// CSV of 3-digit NAICS codes (column `code`).
    ///
    /// Without this file every non-blank NAICS code draws warning W0762.
    #[arg(long = "naics", value_name = "FILE")]
    pub naics: Option<PathBuf>,

    /// CSV of census tract GEOIDs (column `geoid`).
    ///
    /// Without this file every non-blank census tract draws warning W0680.
    #[arg(long = "census", value_name = "FILE")]
    pub census: Option<PathBuf>,

    /// Keep at most N records per finding.
    #[arg(long = "max-records", value_name = "N")]
    pub max_records: Option<usize>,

    /// Run checks one at a time instead of in parallel.
    #[arg(long = "sequential")]
    pub sequential: bool,

    /// Fail when a check cannot run against the file (e.g. a missing column).
    ///
    /// By default such checks are skipped and reported as configuration
    /// diagnostics alongside the findings.
    #[arg(long = "strict-config")]
    pub strict_config: bool,
}

#[derive(Parser)]
pub struct DescribeArgs {
    /// Only list checks of this phase.
    #[arg(long = "phase", value_enum)]
    pub phase: Option<PhaseArg>,

    /// Listing format.
    #[arg(long = "output", value_enum, default_value = "table")]
    pub output: DescribeFormatArg,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormatArg {
    Table,
    Csv,
    Json,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum DescribeFormatArg {
    Table,
    Json,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum PhaseArg {
    Syntactical,
    Logical,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

fn parse_context_pair(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{raw}'"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("empty key in '{raw}'"));
    }
    Ok((key.to_string(), value.trim().to_string()))
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn context_pairs_split_on_first_equals() {
        assert_eq!(
            parse_context_pair("lei=ABC=1").expect("pair"),
            ("lei".to_string(), "ABC=1".to_string())
        );
        assert!(parse_context_pair("lei").is_err());
        assert!(parse_context_pair("=x").is_err());
    }

    #[test]
    fn validate_flags_parse() {
        let cli = Cli::try_parse_from([
            "sblar",
            "validate",
            "register.csv",
            "--context",
            "lei=123456789TESTBANK123",
            "--output",
            "json",
            "--max-records",
            "10",
            "--sequential",
            "--strict-config",
        ])
        .expect("parse args");
        let Command::Validate(args) = cli.command else {
            panic!("expected validate");
        };
        assert_eq!(args.path, PathBuf::from("register.csv"));
        assert_eq!(args.context, vec![("lei".to_string(), "123456789TESTBANK123".to_string())]);
        assert_eq!(args.output, OutputFormatArg::Json);
        assert_eq!(args.max_records, Some(10));
        assert!(args.sequential);
        assert!(args.strict_config);
    }

    #[test]
    fn reference_flags_explain_missing_file_warnings() {
        let command = Cli::command();
        let validate = command.find_subcommand("validate").expect("validate subcommand");
        for (flag, rule_id) in [("naics", "W0762"), ("census", "W0680")] {
            let arg = validate
                .get_arguments()
                .find(|arg| arg.get_id() == flag)
                .expect("reference flag");
            let help = arg.get_long_help().map(ToString::to_string).unwrap_or_default();
            assert!(help.contains(rule_id), "--{flag} help: {help}");
        }
    }

    #[test]
    fn long_about_explains_status_line() {
        let about = Cli::command()
            .get_long_about()
            .map(ToString::to_string)
            .unwrap_or_default();
        assert!(about.contains("warnings included"));
    }
}
