//! Tracing subscriber setup: console (pretty or JSON, on stderr) plus an
//! optional JSON-lines file with rotation.

use std::path::Path;

use tracing_appender::non_blocking::NonBlocking;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};
use wear_core::WearError;

use crate::cli::FILE_GUARD;

/// Install the global subscriber. `RUST_LOG` wins over `level`.
///
/// An unusable `[logging].file` location is a config error.
pub fn init(json: bool, level: &str, cfg: &wear_config::Logging) -> eyre::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let file_writer = cfg
        .file
        .as_deref()
        .map(|f| file_writer(f, cfg.rotation.as_deref()))
        .transpose()?;

    let registry = tracing_subscriber::registry().with(filter);
    let result = if json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .with(file_writer.map(|w| fmt::layer().json().with_ansi(false).with_writer(w)))
            .try_init()
    } else {
        registry
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .with(file_writer.map(|w| fmt::layer().json().with_ansi(false).with_writer(w)))
            .try_init()
    };
    // A subscriber may already be installed (tests); that is not fatal.
    if let Err(e) = result {
        tracing::debug!(error = %e, "tracing subscriber already set");
    }
    Ok(())
}

fn file_writer(file: &str, rotation: Option<&str>) -> Result<NonBlocking, WearError> {
    let path = Path::new(file);
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let name = path
        .file_name()
        .map_or_else(|| "wear.log".into(), |n| n.to_string_lossy().into_owned());
    let rotation = match rotation {
        Some("daily") => Rotation::DAILY,
        Some("hourly") => Rotation::HOURLY,
        _ => Rotation::NEVER,
    };
    let appender = RollingFileAppender::builder()
        .rotation(rotation)
        .filename_prefix(name)
        .build(dir)
        .map_err(|e| WearError::Config(format!("logging.file {file:?}: {e}")))?;
    let (writer, guard) = tracing_appender::non_blocking(appender);
    let _ = FILE_GUARD.set(guard);
    Ok(writer)
}
