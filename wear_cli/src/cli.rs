//! CLI argument definitions and shared statics.

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;
use std::sync::OnceLock;

pub static FILE_GUARD: OnceLock<tracing_appender::non_blocking::WorkerGuard> = OnceLock::new();
/// Whether the user asked for JSON output (controls structured error output).
pub static JSON_MODE: OnceLock<bool> = OnceLock::new();

/// Used when `--config` is not given; built-in defaults apply if it is absent.
pub const DEFAULT_CONFIG: &str = "etc/wear_config.toml";

#[derive(Parser, Debug)]
#[command(name = "wear", version, about = "Belt/liner wear tracking CLI")]
pub struct Cli {
    /// Path to config TOML (typed) [default: etc/wear_config.toml]
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Emit JSON lines (results, logs and errors) instead of text
    #[arg(long, action = ArgAction::SetTrue)]
    pub json: bool,

    /// Console log level (error|warn|info|debug|trace); overrides [logging].level
    #[arg(long = "log-level", value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Command to execute
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build the replacement/measurement ledger and prediction per equipment
    Analyze {
        /// Inspection CSV (equipment id, inspection date, min thickness)
        #[arg(long, value_name = "CSV")]
        input: PathBuf,
        /// Restrict to these equipment ids (repeatable); overrides [equipment].ids
        #[arg(long = "equipment", value_name = "ID")]
        equipment: Vec<String>,
        /// Override the safety floor in millimeters
        #[arg(long = "min-safe-mm", value_name = "MM")]
        min_safe_mm: Option<f64>,
        /// Also write the ledger to this CSV file
        #[arg(long, value_name = "CSV")]
        output: Option<PathBuf>,
    },
    /// Print only the per-equipment wear summary and predicted date
    Predict {
        #[arg(long, value_name = "CSV")]
        input: PathBuf,
        #[arg(long = "equipment", value_name = "ID")]
        equipment: Vec<String>,
    },
    /// Validate config and input headers; report row and equipment counts
    Check {
        #[arg(long, value_name = "CSV")]
        input: PathBuf,
    },
}
