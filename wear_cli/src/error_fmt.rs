//! Human-readable error descriptions, structured JSON errors and exit codes.

use wear_core::error::{BuildError, WearError};

/// Exit code for an ordering violation in the tracker.
pub const EXIT_ORDERING: i32 = 3;
/// Exit code for unreadable input or unwritable output.
pub const EXIT_INPUT: i32 = 4;
/// Exit code for an invalid config file or override.
pub const EXIT_CONFIG: i32 = 5;

/// Map an eyre::Report to a human-readable explanation with likely causes and fix hints.
pub fn humanize(err: &eyre::Report) -> String {
    // Typed matches first
    if let Some(BuildError::InvalidConfig(msg)) = err.downcast_ref::<BuildError>() {
        return format!(
            "What happened: Invalid configuration ({msg}).\nLikely causes: Out-of-range [bands]/[safety] values in the TOML, or a --min-safe-mm override above the measurement band.\nHow to fix: Edit the config file or the override, then rerun."
        );
    }

    if let Some(we) = err.downcast_ref::<WearError>() {
        return match we {
            WearError::OrderingViolation {
                equipment_id,
                previous,
                current,
            } => format!(
                "What happened: Readings for {equipment_id} reached the tracker out of date order ({current} after {previous}).\nLikely causes: Internal normalization fault; input order alone never causes this.\nHow to fix: Re-run with --log-level=debug and report the input that triggers it."
            ),
            WearError::Config(msg) => format!(
                "What happened: Configuration is invalid ({msg}).\nLikely causes: Typo in a key, wrong value type, or out-of-range values.\nHow to fix: Edit the TOML config and try again."
            ),
            WearError::Source(msg) if msg.contains("must have headers") => format!(
                "Invalid headers in inspection CSV. {msg}\nHow to fix: Rename the columns or set [input] equipment_column/date_column/thickness_column."
            ),
            WearError::Source(msg) => format!(
                "What happened: Could not read the inspection data ({msg}).\nLikely causes: Wrong --input path, wrong [input].delimiter, or a malformed CSV.\nHow to fix: Check the file and the [input] section, then rerun."
            ),
            WearError::Sink(msg) => format!(
                "What happened: Could not write the ledger ({msg}).\nLikely causes: Missing output directory or insufficient permissions.\nHow to fix: Check the --output path."
            ),
        };
    }

    // Generic fallback
    let msg = err.to_string();
    let mut cause = String::new();
    if let Some(src) = err.source() {
        cause = format!(" Cause: {src}");
    }
    format!(
        "Something went wrong.{cause}\nHow to fix: Re-run with --log-level=debug for details. Original: {msg}"
    )
}

/// Stable exit codes: 3 ordering violation, 4 input/output, 5 config, 1 otherwise.
pub fn exit_code_for_error(err: &eyre::Report) -> i32 {
    if err.downcast_ref::<BuildError>().is_some() {
        return EXIT_CONFIG;
    }
    match err.downcast_ref::<WearError>() {
        Some(WearError::OrderingViolation { .. }) => EXIT_ORDERING,
        Some(WearError::Source(_) | WearError::Sink(_)) => EXIT_INPUT,
        Some(WearError::Config(_)) => EXIT_CONFIG,
        None => 1,
    }
}

fn reason_name(err: &eyre::Report) -> &'static str {
    if err.downcast_ref::<BuildError>().is_some() {
        return "Config";
    }
    match err.downcast_ref::<WearError>() {
        Some(WearError::OrderingViolation { .. }) => "OrderingViolation",
        Some(WearError::Config(_)) => "Config",
        Some(WearError::Source(_)) => "Input",
        Some(WearError::Sink(_)) => "Output",
        None => "Error",
    }
}

/// Structured JSON for errors when --json is enabled.
pub fn format_error_json(err: &eyre::Report) -> String {
    use serde_json::json;

    if let Some(WearError::OrderingViolation {
        equipment_id,
        previous,
        current,
    }) = err.downcast_ref::<WearError>()
    {
        return json!({
            "reason": reason_name(err),
            "details": {
                "equipment_id": equipment_id,
                "previous": previous.to_string(),
                "current": current.to_string(),
            },
            "message": humanize(err),
        })
        .to_string();
    }

    json!({ "reason": reason_name(err), "message": humanize(err) }).to_string()
}
