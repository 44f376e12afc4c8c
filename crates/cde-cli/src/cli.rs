//! CLI argument definitions for the CDE table validator.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "cde-qc",
    version,
    about = "Validate metadata tables against versioned Common Data Elements",
    long_about = "Validate metadata tables against versioned Common Data Elements (CDE).\n\n\
                  Each table is checked column by column for presence, data type and\n\
                  controlled vocabulary. A markdown report, reviewer comments and a\n\
                  sanitized copy of every clean table are written to the output directory."
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
    /// Validate metadata tables and write reports.
    Validate(ValidateArgs),

    /// List the tables expected for a dataset configuration.
    Tables(SelectionArgs),

    /// Write empty table templates with helper rows.
    Template(TemplateArgs),

    /// List the registered CDE versions.
    Versions(StandardsArgs),
}

/// Location of the CDE definitions.
#[derive(Args)]
pub struct StandardsArgs {
    /// Standards directory (default: $CDE_STANDARDS_DIR, else the bundled standards).
    #[arg(long = "standards-dir", value_name = "DIR")]
    pub standards_dir: Option<PathBuf>,
}

/// Dataset configuration selecting the expected tables.
#[derive(Args)]
pub struct SelectionArgs {
    /// Source species, e.g. Human or Mouse.
    #[arg(long)]
    pub species: String,

    /// Tissue or cell source, e.g. Brain or iPSC.
    #[arg(long)]
    pub tissue: String,

    /// Assay modality, e.g. "Bulk RNAseq".
    #[arg(long)]
    pub modality: String,

    /// CDE version (default: newest registered).
    #[arg(long = "cde-version", value_name = "VERSION")]
    pub cde_version: Option<String>,

    #[command(flatten)]
    pub standards: StandardsArgs,
}

#[derive(Args)]
pub struct ValidateArgs {
    /// Table files; the table name is taken from each file name.
    #[arg(value_name = "FILES", required = true)]
    pub files: Vec<PathBuf>,

    #[command(flatten)]
    pub selection: SelectionArgs,

    /// Output directory for reports and sanitized tables (default: ./qc).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Replacement for missing cells, as COLUMN=VALUE or TABLE.COLUMN=VALUE.
    #[arg(long = "fill", value_name = "COLUMN=VALUE")]
    pub fill: Vec<String>,

    /// Reviewer comments file: one [TABLE] section of column = "note" pairs.
    #[arg(long = "comments", value_name = "FILE")]
    pub comments: Option<PathBuf>,

    /// Severity for columns that are not part of the CDE.
    #[arg(long = "unexpected-columns", value_enum, default_value = "warning")]
    pub unexpected_columns: SeverityArg,

    /// Severity for invalid values in optional columns.
    #[arg(long = "optional-invalid", value_enum, default_value = "error")]
    pub optional_invalid: SeverityArg,

    /// Also write a JSON report per table.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Args)]
pub struct TemplateArgs {
    #[command(flatten)]
    pub selection: SelectionArgs,

    /// Directory the templates are written to.
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: PathBuf,
}

/// Policy severities selectable from the command line.
#[derive(Clone, Copy, ValueEnum)]
pub enum SeverityArg {
    Warning,
    Error,
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
