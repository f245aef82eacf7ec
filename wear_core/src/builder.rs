//! Builder for `Analyzer`. All fields are validated on `build()`.

use crate::analyzer::Analyzer;
use crate::config::{BandCfg, ReplacementPolicy, SafetyCfg, TrackerCfg};
use crate::error::{BuildError, Result};
use crate::util::is_valid_date_format;

#[derive(Debug, Default)]
pub struct AnalyzerBuilder {
    bands: Option<BandCfg>,
    policy: Option<ReplacementPolicy>,
    safety: Option<SafetyCfg>,
    date_formats: Option<Vec<String>>,
    output_date_format: Option<String>,
}

impl AnalyzerBuilder {
    pub fn with_tracker(mut self, t: TrackerCfg) -> Self {
        self.bands = Some(t.bands);
        self.policy = Some(t.policy);
        self
    }

    pub fn with_bands(mut self, b: BandCfg) -> Self {
        self.bands = Some(b);
        self
    }

    pub fn with_policy(mut self, p: ReplacementPolicy) -> Self {
        self.policy = Some(p);
        self
    }

    pub fn with_safety(mut self, s: SafetyCfg) -> Self {
        self.safety = Some(s);
        self
    }

    /// Override only the safety floor (mm).
    pub fn with_min_safe_thickness_mm(mut self, mm: f64) -> Self {
        self.safety = Some(SafetyCfg {
            min_safe_thickness_mm: mm,
        });
        self
    }

    /// chrono formats tried in order when parsing inspection dates.
    pub fn with_date_formats(mut self, formats: Vec<String>) -> Self {
        self.date_formats = Some(formats);
        self
    }

    pub fn with_output_date_format(mut self, fmt: impl Into<String>) -> Self {
        self.output_date_format = Some(fmt.into());
        self
    }

    pub fn build(self) -> Result<Analyzer> {
        let bands = self.bands.unwrap_or_default();
        let safety = self.safety.unwrap_or_default();
        let invalid = |msg| Err(eyre::Report::new(BuildError::InvalidConfig(msg)));

        let edges = [
            bands.replacement_min_mm,
            bands.replacement_max_mm,
            bands.measurement_below_mm,
        ];
        if edges.iter().any(|v| !v.is_finite() || *v < 0.0) {
            return invalid("band edges must be finite and >= 0");
        }
        if bands.replacement_min_mm > bands.replacement_max_mm {
            return invalid("replacement band is inverted");
        }
        if bands.measurement_below_mm > bands.replacement_min_mm {
            return invalid("measurement band overlaps the replacement band");
        }
        let floor = safety.min_safe_thickness_mm;
        if !floor.is_finite() || floor < 0.0 {
            return invalid("min_safe_thickness_mm must be finite and >= 0");
        }
        if floor >= bands.measurement_below_mm {
            return invalid("min_safe_thickness_mm must be below the measurement band");
        }

        let date_formats = self
            .date_formats
            .unwrap_or_else(|| vec!["%d/%m/%Y".to_string(), "%Y-%m-%d".to_string()]);
        if date_formats.is_empty() || !date_formats.iter().all(|f| is_valid_date_format(f)) {
            return invalid("date formats must be non-empty and valid");
        }
        let output_date_format = self
            .output_date_format
            .unwrap_or_else(|| "%d/%m/%Y".to_string());
        if !is_valid_date_format(&output_date_format) {
            return invalid("output date format is not valid");
        }

        Ok(Analyzer {
            tracker: TrackerCfg {
                bands,
                policy: self.policy.unwrap_or_default(),
            },
            safety,
            date_formats,
            output_date_format,
        })
    }
}
