mod analyze;
mod cli;
mod error_fmt;
mod export;
mod logging;

use std::path::Path;

use clap::Parser;
use eyre::Result;
use wear_config::Config;
use wear_core::WearError;

use crate::cli::{Cli, Commands, DEFAULT_CONFIG, JSON_MODE};
use crate::error_fmt::{exit_code_for_error, format_error_json, humanize};

fn main() {
    let _ = color_eyre::install();
    let cli = Cli::parse();
    let _ = JSON_MODE.set(cli.json);

    if let Err(e) = run(cli) {
        tracing::error!(error = %e, "command failed");
        if JSON_MODE.get().copied().unwrap_or(false) {
            println!("{}", format_error_json(&e));
        } else {
            eprintln!("{}", humanize(&e));
        }
        std::process::exit(exit_code_for_error(&e));
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut cfg = load_config(cli.config.as_deref())?;

    let level = cli
        .log_level
        .clone()
        .or_else(|| cfg.logging.level.clone())
        .unwrap_or_else(|| "info".to_string());
    logging::init(cli.json, &level, &cfg.logging)?;

    match cli.cmd {
        Commands::Analyze {
            input,
            equipment,
            min_safe_mm,
            output,
        } => {
            apply_equipment(&mut cfg, equipment);
            if let Some(mm) = min_safe_mm {
                cfg.safety.min_safe_thickness_mm = mm;
            }
            analyze::run_analyze(&cfg, &input, output.as_deref(), cli.json)
        }
        Commands::Predict { input, equipment } => {
            apply_equipment(&mut cfg, equipment);
            analyze::run_predict(&cfg, &input, cli.json)
        }
        Commands::Check { input } => analyze::run_check(&cfg, &input, cli.json),
    }
}

/// `--equipment` flags replace `[equipment].ids` when given.
fn apply_equipment(cfg: &mut Config, ids: Vec<String>) {
    if !ids.is_empty() {
        cfg.equipment.ids = ids;
    }
}

/// Read and validate the config. A missing default file means built-in
/// defaults; a missing explicit `--config` is an error.
fn load_config(path: Option<&Path>) -> Result<Config> {
    let path = match path {
        Some(p) => p,
        None if Path::new(DEFAULT_CONFIG).exists() => Path::new(DEFAULT_CONFIG),
        None => return Ok(Config::default()),
    };
    let text = std::fs::read_to_string(path)
        .map_err(|e| WearError::Config(format!("read config {}: {e}", path.display())))?;
    let cfg = wear_config::load_toml(&text)
        .map_err(|e| WearError::Config(format!("parse config {}: {e}", path.display())))?;
    cfg.validate()
        .map_err(|e| WearError::Config(e.to_string()))?;
    Ok(cfg)
}
