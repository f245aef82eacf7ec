//! Same-day deduplication and chronological ordering of readings.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::types::{NormalizedReading, Reading};

/// Row accounting for one normalization pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NormalizeStats {
    /// Readings for the equipment with a usable date and thickness.
    pub kept: usize,
    /// Readings for the equipment dropped for a bad date or thickness.
    pub dropped: usize,
    /// Distinct inspection days after deduplication.
    pub days: usize,
}

/// Normalize the readings of one equipment.
///
/// Readings for other equipment ids are skipped; readings with a missing or
/// unparseable date or thickness are dropped. The result is strictly
/// increasing by date and carries the largest thickness seen on each day.
pub fn normalize(readings: &[Reading], equipment_id: &str) -> Vec<NormalizedReading> {
    normalize_with_stats(readings, equipment_id).0
}

pub fn normalize_with_stats(
    readings: &[Reading],
    equipment_id: &str,
) -> (Vec<NormalizedReading>, NormalizeStats) {
    let mut stats = NormalizeStats::default();
    let mut by_day: BTreeMap<NaiveDate, f64> = BTreeMap::new();

    for r in readings.iter().filter(|r| r.equipment_id == equipment_id) {
        let Some((day, t)) = r.usable() else {
            stats.dropped += 1;
            continue;
        };
        stats.kept += 1;
        by_day
            .entry(day)
            .and_modify(|max| *max = max.max(t))
            .or_insert(t);
    }

    stats.days = by_day.len();
    if stats.dropped > 0 {
        tracing::debug!(
            equipment_id,
            dropped = stats.dropped,
            kept = stats.kept,
            "dropped readings with unusable date or thickness"
        );
    }

    let out = by_day
        .into_iter()
        .map(|(inspected_at, thickness_mm)| NormalizedReading {
            inspected_at,
            thickness_mm,
        })
        .collect();
    (out, stats)
}
