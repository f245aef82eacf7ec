//! Configuration types for the wear engine.
//!
//! These are the runtime configuration structs used by the tracker and the
//! extrapolator. They are separate from the TOML-deserialized config in `wear_config`.

/// Which band a thickness reading falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Band {
    /// Freshly installed part.
    Replacement,
    /// In-service wear reading.
    Measurement,
    /// Neither; the reading is ignored.
    Dead,
}

/// Thickness bands used to classify readings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandCfg {
    /// Inclusive lower edge of the replacement band (mm).
    pub replacement_min_mm: f64,
    /// Inclusive upper edge of the replacement band (mm).
    pub replacement_max_mm: f64,
    /// Readings strictly below this are wear measurements (mm).
    pub measurement_below_mm: f64,
}

impl Default for BandCfg {
    fn default() -> Self {
        Self {
            replacement_min_mm: 10.0,
            replacement_max_mm: 18.0,
            measurement_below_mm: 10.0,
        }
    }
}

impl BandCfg {
    /// Classify a thickness. The replacement band wins on its edges; NaN is dead.
    pub fn classify(&self, thickness_mm: f64) -> Band {
        if (self.replacement_min_mm..=self.replacement_max_mm).contains(&thickness_mm) {
            Band::Replacement
        } else if thickness_mm < self.measurement_below_mm {
            Band::Measurement
        } else {
            Band::Dead
        }
    }
}

/// What to do with a replacement-band reading equal to the previous replacement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReplacementPolicy {
    /// Treat it as a repeated reading of the same installed part: no Event.
    #[default]
    SuppressRepeatedThickness,
    /// Treat it as a new installation (e.g. standardized spare thickness).
    AlwaysEmit,
}

/// Tracker configuration.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TrackerCfg {
    pub bands: BandCfg,
    pub policy: ReplacementPolicy,
}

/// Safety floor used by the extrapolator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SafetyCfg {
    /// Thickness at which the part must be replaced (mm). Default: 2.0.
    pub min_safe_thickness_mm: f64,
}

impl Default for SafetyCfg {
    fn default() -> Self {
        Self {
            min_safe_thickness_mm: 2.0,
        }
    }
}
