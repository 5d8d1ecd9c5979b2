//! CLI argument definitions for the transfer mapping planner.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "xfer",
    version,
    about = "Plan how stream fields map onto a target table",
    long_about = "Resolve each column of a target table to an imported stream field,\n\
                  a literal default, or an explicit skip, and report whether the\n\
                  mapping is complete enough to run a transfer."
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
}

#[derive(Subcommand)]
pub enum Command {
    /// Build a mapping plan for one target table.
    Plan(PlanArgs),

    /// List the mapping types and their titles.
    Types,
}

#[derive(Args)]
pub struct PlanArgs {
    /// Target table as a dot-separated path (e.g. PUBLIC.CUSTOMERS).
    #[arg(long = "entity", value_name = "PATH")]
    pub entity: String,

    /// Target columns, in table order. Repeat or separate with commas.
    #[arg(
        long = "target",
        value_name = "COLUMN",
        value_delimiter = ',',
        required = true
    )]
    pub targets: Vec<String>,

    /// Source stream field names, in stream order.
    #[arg(
        long = "source",
        value_name = "FIELD",
        value_delimiter = ',',
        conflicts_with = "source_header"
    )]
    pub sources: Vec<String>,

    /// Delimited file whose header record lists the source fields.
    #[arg(long = "source-header", value_name = "FILE")]
    pub source_header: Option<PathBuf>,

    /// Field delimiter of the header file.
    #[arg(long = "delimiter", value_name = "CHAR", default_value = ",")]
    pub delimiter: char,

    /// Fill a column with a literal (COLUMN=VALUE).
    #[arg(long = "default", value_name = "COLUMN=VALUE")]
    pub defaults: Vec<String>,

    /// Leave a column out of the transfer.
    #[arg(long = "skip", value_name = "COLUMN", value_delimiter = ',')]
    pub skips: Vec<String>,

    /// Only bind source fields whose names match exactly.
    #[arg(long = "exact-case", conflicts_with = "ignore_separators")]
    pub exact_case: bool,

    /// Treat `_`, `-`, `.` and spaces as equal when binding by name.
    #[arg(long = "ignore-separators")]
    pub ignore_separators: bool,

    /// Output format for the plan.
    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: PlanFormatArg,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum PlanFormatArg {
    Table,
    Json,
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
