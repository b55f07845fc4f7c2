//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "hsat",
    version,
    about = "Hospital satisfaction survey pipeline",
    long_about = "Clean, recode and aggregate a hospital patient-satisfaction survey export.\n\n\
                  Writes the cleaned dataset, question metadata and per-hospital scores as\n\
                  tables, plus DDL for a readable view over the dataset."
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

    /// Explicit log level (overrides -v/-q flags and RUST_LOG).
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

    /// Directory holding value_mappings.toml, question_texts.csv and hospitals.csv
    /// (default: $HSAT_REFERENCE_DIR, then the bundled reference data).
    #[arg(long = "reference-dir", value_name = "DIR", global = true)]
    pub reference_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the full pipeline over a survey export.
    Run(RunArgs),

    /// List the question-text reference table.
    Questions,

    /// List the hospital directory.
    Hospitals,
}

#[derive(Parser)]
pub struct RunArgs {
    /// Survey export (CSV), or a folder containing exactly one.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Output directory for tables and view DDL (default: <INPUT dir>/output).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// TOML file with pipeline options.
    #[arg(long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Hospital code column, after header normalization (overrides --config).
    #[arg(long = "hospital-column", value_name = "NAME")]
    pub hospital_column: Option<String>,

    /// Run every stage and report without writing output files.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
