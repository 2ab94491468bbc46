//! CLI argument definitions for the `mugen` checker.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use mugen_model::Severity;

#[derive(Parser)]
#[command(
    name = "mugen",
    version,
    about = "MUGEN character checker - validate definitions and state files",
    long_about = "Resolve a MUGEN character definition (.def), check its state files\n\
                  against the controller schema, and inspect sprite file headers."
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

    /// Log output format (pretty for human, json for machine parsing).
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

    /// Directory holding `schema/` and `common/` (default: $MUGEN_RESOURCES_DIR,
    /// then the bundled resources).
    #[arg(long = "resources", value_name = "DIR", global = true)]
    pub resources: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Resolve a character definition and validate its state files.
    Check(CheckArgs),

    /// Print the header of a sprite (.sff) file.
    Sff(SffArgs),

    /// List controller types, or the parameters of one controller.
    Schema(SchemaArgs),
}

#[derive(Args)]
pub struct CheckArgs {
    /// Path to the character definition file.
    #[arg(value_name = "DEF")]
    pub def: PathBuf,

    /// Hide diagnostics below this severity. Errors still set the exit status.
    #[arg(long = "min-severity", value_enum, default_value = "info")]
    pub min_severity: SeverityArg,

    /// Print the result as JSON instead of tables.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Args)]
pub struct SffArgs {
    #[arg(value_name = "FILE")]
    pub file: PathBuf,
}

#[derive(Args)]
pub struct SchemaArgs {
    /// Controller type to describe, e.g. ChangeState (case-insensitive).
    #[arg(value_name = "CONTROLLER")]
    pub controller: Option<String>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum SeverityArg {
    Debug,
    Info,
    Warning,
    Error,
}

impl From<SeverityArg> for Severity {
    fn from(arg: SeverityArg) -> Self {
        match arg {
            SeverityArg::Debug => Severity::Debug,
            SeverityArg::Info => Severity::Info,
            SeverityArg::Warning => Severity::Warning,
            SeverityArg::Error => Severity::Error,
        }
    }
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
