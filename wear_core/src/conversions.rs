//! `From` implementations bridging `wear_config` types to `wear_core` types.

use crate::config::{BandCfg, ReplacementPolicy, SafetyCfg, TrackerCfg};

// ── BandCfg ──────────────────────────────────────────────────────────────────

impl From<&wear_config::Bands> for BandCfg {
    fn from(c: &wear_config::Bands) -> Self {
        Self {
            replacement_min_mm: c.replacement_min_mm,
            replacement_max_mm: c.replacement_max_mm,
            measurement_below_mm: c.measurement_below_mm,
        }
    }
}

// ── ReplacementPolicy ────────────────────────────────────────────────────────

impl From<wear_config::SameThicknessReplacement> for ReplacementPolicy {
    fn from(c: wear_config::SameThicknessReplacement) -> Self {
        match c {
            wear_config::SameThicknessReplacement::Suppress => {
                ReplacementPolicy::SuppressRepeatedThickness
            }
            wear_config::SameThicknessReplacement::Emit => ReplacementPolicy::AlwaysEmit,
        }
    }
}

// ── TrackerCfg ───────────────────────────────────────────────────────────────

impl From<&wear_config::Config> for TrackerCfg {
    fn from(c: &wear_config::Config) -> Self {
        Self {
            bands: (&c.bands).into(),
            policy: c.policy.same_thickness_replacement.into(),
        }
    }
}

// ── SafetyCfg ────────────────────────────────────────────────────────────────

impl From<&wear_config::Safety> for SafetyCfg {
    fn from(c: &wear_config::Safety) -> Self {
        Self {
            min_safe_thickness_mm: c.min_safe_thickness_mm,
        }
    }
}
