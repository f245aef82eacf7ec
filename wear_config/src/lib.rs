#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(
    all(not(debug_assertions), not(test)),
    deny(clippy::all, clippy::pedantic, clippy::nursery)
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]
//! Config schema and inspection CSV loading for the wear tracker.
//!
//! - `Config` and sub-structs are deserialized from TOML and validated.
//! - The inspection CSV loader enforces the required headers but keeps every
//!   data row verbatim; malformed cells are the engine's business.
use serde::Deserialize;
use serde::de::Deserializer;
use wear_traits::{InspectionRow, InspectionSource};

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct EquipmentCfg {
    /// Equipment ids to analyse. Accepts a single string or an array.
    /// Empty selects every id found in the input.
    #[serde(deserialize_with = "de_one_or_many")]
    pub ids: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Bands {
    /// Lower inclusive edge of the "freshly installed" band (mm)
    pub replacement_min_mm: f64,
    /// Upper inclusive edge of the "freshly installed" band (mm)
    pub replacement_max_mm: f64,
    /// Readings strictly below this are wear measurements (mm)
    pub measurement_below_mm: f64,
}

impl Default for Bands {
    fn default() -> Self {
        Self {
            replacement_min_mm: 10.0,
            replacement_max_mm: 18.0,
            measurement_below_mm: 10.0,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Safety {
    /// Thickness at which the part must be replaced (mm)
    pub min_safe_thickness_mm: f64,
}

impl Default for Safety {
    fn default() -> Self {
        Self {
            min_safe_thickness_mm: 2.0,
        }
    }
}

#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SameThicknessReplacement {
    /// A replacement-band reading equal to the previous replacement is a repeat.
    #[default]
    Suppress,
    /// Every replacement-band reading after the first closes out a wear period.
    Emit,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct Policy {
    pub same_thickness_replacement: SameThicknessReplacement,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct Input {
    pub equipment_column: String,
    pub date_column: String,
    pub thickness_column: String,
    /// chrono format strings tried in order. Accepts a single string or an array.
    #[serde(deserialize_with = "de_one_or_many")]
    pub date_formats: Vec<String>,
    pub delimiter: String,
}

impl Default for Input {
    fn default() -> Self {
        Self {
            equipment_column: "EQUIPMENT_ID".to_string(),
            date_column: "INSPECTION_DATE".to_string(),
            thickness_column: "MIN_THICKNESS_MM".to_string(),
            date_formats: vec!["%d/%m/%Y".to_string(), "%Y-%m-%d".to_string()],
            delimiter: ",".to_string(),
        }
    }
}

impl Input {
    /// Single-byte CSV delimiter; falls back to ',' when not validated.
    pub fn delimiter_byte(&self) -> u8 {
        match self.delimiter.as_bytes() {
            [b] => *b,
            _ => b',',
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Output {
    /// chrono format used for every date cell in the ledger
    pub date_format: String,
}

impl Default for Output {
    fn default() -> Self {
        Self {
            date_format: "%d/%m/%Y".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct RunnerCfg {
    /// Worker threads for multi-equipment runs (0 = one per available CPU)
    pub workers: usize,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct Logging {
    pub file: Option<String>,  // path to .log (JSON lines)
    pub level: Option<String>, // "info","debug"
    /// Log rotation policy: "never" | "daily" | "hourly" (default: never)
    pub rotation: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub equipment: EquipmentCfg,
    pub bands: Bands,
    pub safety: Safety,
    pub policy: Policy,
    pub input: Input,
    pub output: Output,
    pub runner: RunnerCfg,
    pub logging: Logging,
}

pub fn load_toml(s: &str) -> Result<Config, toml::de::Error> {
    toml::from_str::<Config>(s)
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

fn de_one_or_many<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt: Option<OneOrMany> = Option::deserialize(deserializer)?;
    Ok(match opt {
        Some(OneOrMany::One(s)) => vec![s],
        Some(OneOrMany::Many(v)) => v,
        None => Vec::new(),
    })
}

/// Load every inspection row from a CSV file.
///
/// The three configured columns must be present (extra columns are ignored).
/// Short rows yield empty cells rather than errors.
pub fn load_inspections_csv(
    path: &std::path::Path,
    input: &Input,
) -> eyre::Result<Vec<InspectionRow>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .delimiter(input.delimiter_byte())
        .from_path(path)
        .map_err(|e| eyre::eyre!("open inspection CSV {:?}: {}", path, e))?;

    let headers = rdr
        .headers()
        .map_err(|e| eyre::eyre!("read CSV headers {:?}: {}", path, e))?
        .clone();
    let find = |name: &str| headers.iter().position(|h| h == name);
    let (Some(eq_idx), Some(date_idx), Some(thick_idx)) = (
        find(&input.equipment_column),
        find(&input.date_column),
        find(&input.thickness_column),
    ) else {
        eyre::bail!(
            "inspection CSV must have headers '{},{},{}', got: {}",
            input.equipment_column,
            input.date_column,
            input.thickness_column,
            headers.iter().collect::<Vec<_>>().join(",")
        );
    };

    let mut rows = Vec::new();
    for (idx, rec) in rdr.records().enumerate() {
        let rec = rec.map_err(|e| eyre::eyre!("invalid CSV row {}: {}", idx + 2, e))?;
        let cell = |i: usize| rec.get(i).unwrap_or("").to_string();
        rows.push(InspectionRow {
            equipment_id: cell(eq_idx),
            inspection_date: cell(date_idx),
            min_thickness_mm: cell(thick_idx),
        });
    }
    Ok(rows)
}

/// `InspectionSource` backed by a CSV file on disk.
#[derive(Debug, Clone)]
pub struct CsvInspections {
    path: std::path::PathBuf,
    input: Input,
}

impl CsvInspections {
    pub fn new(path: impl Into<std::path::PathBuf>, input: Input) -> Self {
        Self {
            path: path.into(),
            input,
        }
    }
}

impl InspectionSource for CsvInspections {
    fn rows(&mut self) -> Result<Vec<InspectionRow>, Box<dyn std::error::Error + Send + Sync>> {
        load_inspections_csv(&self.path, &self.input).map_err(Into::into)
    }
}

/// True when `fmt` is a non-empty chrono format without unknown specifiers.
pub fn is_valid_date_format(fmt: &str) -> bool {
    use chrono::format::{Item, StrftimeItems};
    !fmt.is_empty() && !StrftimeItems::new(fmt).any(|i| matches!(i, Item::Error))
}

fn finite_non_negative(v: f64) -> bool {
    v.is_finite() && v >= 0.0
}

impl Config {
    pub fn validate(&self) -> eyre::Result<()> {
        // Bands
        let b = &self.bands;
        if !finite_non_negative(b.replacement_min_mm) {
            eyre::bail!("bands.replacement_min_mm must be a finite value >= 0");
        }
        if !finite_non_negative(b.replacement_max_mm) {
            eyre::bail!("bands.replacement_max_mm must be a finite value >= 0");
        }
        if !finite_non_negative(b.measurement_below_mm) {
            eyre::bail!("bands.measurement_below_mm must be a finite value >= 0");
        }
        if b.replacement_min_mm > b.replacement_max_mm {
            eyre::bail!("bands.replacement_min_mm must be <= bands.replacement_max_mm");
        }
        if b.measurement_below_mm > b.replacement_min_mm {
            eyre::bail!("bands.measurement_below_mm must be <= bands.replacement_min_mm");
        }

        // Safety
        let floor = self.safety.min_safe_thickness_mm;
        if !finite_non_negative(floor) {
            eyre::bail!("safety.min_safe_thickness_mm must be a finite value >= 0");
        }
        if floor >= b.measurement_below_mm {
            eyre::bail!("safety.min_safe_thickness_mm must be < bands.measurement_below_mm");
        }

        // Equipment
        if self.equipment.ids.iter().any(|id| id.trim().is_empty()) {
            eyre::bail!("equipment.ids must not contain empty ids");
        }

        // Input
        if self.input.equipment_column.is_empty()
            || self.input.date_column.is_empty()
            || self.input.thickness_column.is_empty()
        {
            eyre::bail!("input column names must not be empty");
        }
        if self.input.date_formats.is_empty() {
            eyre::bail!("input.date_formats must list at least one format");
        }
        if let Some(bad) = self.input.date_formats.iter().find(|f| !is_valid_date_format(f)) {
            eyre::bail!("input.date_formats contains an invalid format: {bad:?}");
        }
        if self.input.delimiter.len() != 1 {
            eyre::bail!("input.delimiter must be a single ASCII character");
        }

        // Output
        if !is_valid_date_format(&self.output.date_format) {
            eyre::bail!("output.date_format must be a non-empty, valid chrono format");
        }

        // Logging
        if let Some(rot) = self.logging.rotation.as_deref()
            && !matches!(rot, "never" | "daily" | "hourly")
        {
            eyre::bail!("logging.rotation must be one of never|daily|hourly");
        }

        Ok(())
    }
}
