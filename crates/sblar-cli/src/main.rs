//! SBLAR validator CLI.

use clap::{ColorChoice, Parser};
use sblar_cli::logging::{LogConfig, LogFormat, init_logging};
use std::io::{self, IsTerminal};
use std::process::ExitCode;
use tracing::level_filters::LevelFilter;

mod cli;
mod commands;

use crate::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use crate::commands::{print_status, run_describe, run_validate};

/// No error-severity findings.
const EXIT_OK: u8 = 0;
/// The register has error-severity findings.
const EXIT_FINDINGS: u8 = 1;
/// No result could be produced.
const EXIT_FATAL: u8 = 2;

fn main() -> ExitCode {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        return ExitCode::from(EXIT_FATAL);
    }
    let code = match &cli.command {
        Command::Validate(args) => match run_validate(args) {
            Ok(result) => {
                print_status(&result);
                if result.has_errors() {
                    EXIT_FINDINGS
                } else {
                    EXIT_OK
                }
            }
            Err(error) => {
                eprintln!("error: {error:#}");
                EXIT_FATAL
            }
        },
        Command::Describe(args) => match run_describe(args) {
            Ok(()) => EXIT_OK,
            Err(error) => {
                eprintln!("error: {error:#}");
                EXIT_FATAL
            }
        },
    };
    ExitCode::from(code)
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.log_file = cli.log_file.clone();
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
