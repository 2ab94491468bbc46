//! MUGEN character checker CLI.

use std::io::{self, IsTerminal};

use anyhow::Result;
use clap::{ColorChoice, Parser};
use mugen_cli::commands::{run_check, run_schema, run_sff};
use mugen_cli::logging::{LogConfig, LogFormat, init_logging};
use mugen_cli::summary::{check_json, print_check, schema_table, sff_table};
use mugen_standards::ResourcePaths;
use tracing::level_filters::LevelFilter;

mod cli;

use crate::cli::{CheckArgs, Cli, Command, LogFormatArg, LogLevelArg};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let resources = ResourcePaths::locate(cli.resources.as_deref());
    let exit_code = match cli.command {
        Command::Check(args) => match check(&args, &resources) {
            Ok(has_errors) => i32::from(has_errors),
            Err(error) => {
                eprintln!("error: {error:#}");
                1
            }
        },
        Command::Sff(args) => match run_sff(&args.file) {
            Ok(sprite) => {
                println!("Sprite file: {}", sprite.path().display());
                println!("{}", sff_table(&sprite));
                0
            }
            Err(error) => {
                eprintln!("error: {error:#}");
                1
            }
        },
        Command::Schema(args) => match run_schema(&resources, args.controller.as_deref()) {
            Ok(listing) => {
                println!("{}", schema_table(&listing));
                0
            }
            Err(error) => {
                eprintln!("error: {error:#}");
                1
            }
        },
    };
    std::process::exit(exit_code);
}

/// Runs `check` and prints the result. Returns whether any ERROR was found.
fn check(args: &CheckArgs, resources: &ResourcePaths) -> Result<bool> {
    let result = run_check(&args.def, resources, args.min_severity.into())?;
    if args.json {
        println!("{}", check_json(&result)?);
    } else {
        print_check(&result);
    }
    Ok(result.has_errors())
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let level_filter = match cli.log_level {
        Some(LogLevelArg::Error) => LevelFilter::ERROR,
        Some(LogLevelArg::Warn) => LevelFilter::WARN,
        Some(LogLevelArg::Info) => LevelFilter::INFO,
        Some(LogLevelArg::Debug) => LevelFilter::DEBUG,
        Some(LogLevelArg::Trace) => LevelFilter::TRACE,
        None => cli.verbosity.tracing_level_filter(),
    };
    let format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    let mut config = LogConfig::default()
        .with_level(level_filter)
        .with_format(format)
        .with_log_file(cli.log_file.clone());
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
