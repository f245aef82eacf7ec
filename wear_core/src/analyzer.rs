//! Per-equipment pipeline: parse → normalize → track → extrapolate → assemble.

use wear_traits::{InspectionRow, LedgerRow};

use crate::builder::AnalyzerBuilder;
use crate::config::{SafetyCfg, TrackerCfg};
use crate::error::WearError;
use crate::extrapolate::extrapolate;
use crate::normalize::{NormalizeStats, normalize_with_stats};
use crate::report::{Ledger, Outlook, assemble};
use crate::tracker::track;
use crate::types::Reading;

/// Validated, immutable pipeline settings. Cheap to share across workers.
#[derive(Debug, Clone)]
pub struct Analyzer {
    pub(crate) tracker: TrackerCfg,
    pub(crate) safety: SafetyCfg,
    pub(crate) date_formats: Vec<String>,
    pub(crate) output_date_format: String,
}

/// Result of analysing one equipment.
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    pub ledger: Ledger,
    pub stats: NormalizeStats,
}

impl Analyzer {
    /// Start building an Analyzer.
    pub fn builder() -> AnalyzerBuilder {
        AnalyzerBuilder::default()
    }

    /// Build from a validated TOML config.
    pub fn from_config(cfg: &wear_config::Config) -> crate::error::Result<Self> {
        Self::builder()
            .with_tracker(cfg.into())
            .with_safety((&cfg.safety).into())
            .with_date_formats(cfg.input.date_formats.clone())
            .with_output_date_format(cfg.output.date_format.clone())
            .build()
    }

    pub fn tracker_cfg(&self) -> &TrackerCfg {
        &self.tracker
    }

    pub fn safety_cfg(&self) -> &SafetyCfg {
        &self.safety
    }

    pub fn output_date_format(&self) -> &str {
        &self.output_date_format
    }

    /// Parse tabular rows. Bad cells never fail here; they are dropped later.
    pub fn parse_rows(&self, rows: &[InspectionRow]) -> Vec<Reading> {
        rows.iter()
            .map(|r| Reading::from_row(r, &self.date_formats))
            .collect()
    }

    /// Run the full pipeline for one equipment.
    ///
    /// Only `OrderingViolation` can fail, and only if the normalizer contract
    /// is broken; missing data yields an empty ledger or no prediction.
    pub fn analyze(&self, equipment_id: &str, readings: &[Reading]) -> Result<Analysis, WearError> {
        let span = tracing::info_span!("analyze", equipment_id);
        let _enter = span.enter();

        let (normalized, stats) = normalize_with_stats(readings, equipment_id);
        let events = track(equipment_id, &normalized, &self.tracker)?;
        let prediction = extrapolate(&events, &self.safety);
        let ledger = assemble(equipment_id, events, prediction);

        let summary = ledger.summary();
        match summary.outlook {
            Outlook::NoPrediction => {
                tracing::info!(
                    days = stats.days,
                    events = ledger.entries.len(),
                    "no prediction available"
                );
            }
            Outlook::Never => {
                tracing::warn!(
                    avg_daily_wear_mm = summary.average_daily_wear_mm,
                    "wear rate is not positive; floor is never reached"
                );
            }
            Outlook::BeyondCalendar => {
                tracing::warn!("projected crossing is beyond the representable calendar");
            }
            Outlook::Due {
                date,
                days_remaining,
            } => {
                tracing::info!(
                    days = stats.days,
                    replacements = summary.replacements,
                    measurements = summary.measurements,
                    %date,
                    days_remaining,
                    "replacement predicted"
                );
            }
        }

        Ok(Analysis { ledger, stats })
    }

    /// Format an analysis with the configured output date format.
    pub fn rows(&self, analysis: &Analysis) -> Vec<LedgerRow> {
        analysis.ledger.to_rows(&self.output_date_format)
    }
}
