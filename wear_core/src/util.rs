//! Cell parsing, day arithmetic and number/date formatting helpers.

use chrono::NaiveDate;
use chrono::format::StrftimeItems;
use std::fmt::Write as _;

pub use wear_config::is_valid_date_format;

/// Fallback used when a configured output format cannot render a date.
pub const ISO_DATE: &str = "%Y-%m-%d";

/// Parse an inspection date cell trying each chrono format in order.
///
/// Spreadsheet exports often carry a time part ("01/06/2023 00:00:00" or
/// "2023-06-01T00:00:00"); when the whole cell does not parse, the leading
/// date token is tried as well. Returns `None` for empty or unparseable cells.
pub fn parse_date(cell: &str, formats: &[String]) -> Option<NaiveDate> {
    let cell = cell.trim();
    if cell.is_empty() {
        return None;
    }
    let head = cell.split([' ', 'T']).next().unwrap_or(cell);
    formats.iter().find_map(|fmt| {
        NaiveDate::parse_from_str(cell, fmt)
            .or_else(|_| NaiveDate::parse_from_str(head, fmt))
            .ok()
    })
}

/// Parse a thickness cell in millimeters.
///
/// Accepts a decimal comma when no decimal point is present ("9,5").
/// Empty, non-numeric, non-finite and negative values yield `None`.
pub fn parse_thickness(cell: &str) -> Option<f64> {
    let cell = cell.trim();
    if cell.is_empty() {
        return None;
    }
    let v = if cell.contains('.') {
        cell.parse::<f64>().ok()?
    } else {
        cell.replacen(',', ".", 1).parse::<f64>().ok()?
    };
    (v.is_finite() && v >= 0.0).then_some(v)
}

/// Whole days from `from` to `to`; `None` when `to` precedes `from`.
#[inline]
pub fn days_between(from: NaiveDate, to: NaiveDate) -> Option<u32> {
    u32::try_from(to.signed_duration_since(from).num_days()).ok()
}

/// `wear / days`, or 0 when no time has elapsed.
#[inline]
pub fn daily_rate(wear_mm: f64, days: u32) -> f64 {
    if days > 0 {
        wear_mm / f64::from(days)
    } else {
        0.0
    }
}

/// Round half away from zero to `places` decimals.
#[inline]
pub fn round_to(x: f64, places: i32) -> f64 {
    let k = 10f64.powi(places);
    (x * k).round() / k
}

/// Render a millimeter value the way spreadsheets show it: always at least one
/// decimal ("15.0"), otherwise the shortest exact representation ("0.046").
pub fn fmt_mm(v: f64) -> String {
    if v.is_finite() && v.fract() == 0.0 {
        format!("{v:.1}")
    } else {
        format!("{v}")
    }
}

/// Format a date, falling back to ISO 8601 if `fmt` cannot render it.
pub fn format_date(date: NaiveDate, fmt: &str) -> String {
    let mut out = String::new();
    if is_valid_date_format(fmt)
        && write!(out, "{}", date.format_with_items(StrftimeItems::new(fmt))).is_ok()
    {
        return out;
    }
    date.format(ISO_DATE).to_string()
}
