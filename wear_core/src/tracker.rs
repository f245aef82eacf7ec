//! Event classifier and wear-state tracker.
//!
//! The tracker walks normalized readings in date order and threads a
//! [`WearState`] through them. Each reading is classified by thickness band:
//!
//! - **Replacement band**: the part was (re)installed. Every replacement after
//!   the first closes the previous wear period and emits a `Replacement` event
//!   measured against the *previous* replacement.
//! - **Measurement band**: in-service wear. Emits a `Measurement` event against
//!   the last replacement, once one exists.
//! - **Dead band**: ignored without touching state.
//!
//! Repeated identical thicknesses are suppressed by exact equality, not by a
//! tolerance.

use chrono::NaiveDate;

use crate::config::{Band, ReplacementPolicy, TrackerCfg};
use crate::error::WearError;
use crate::types::{Event, EventKind, NormalizedReading};
use crate::util::{daily_rate, days_between};

/// Scan state: the latest replacement and the latest post-replacement measurement.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WearState {
    pub last_replacement_date: Option<NaiveDate>,
    pub last_replacement_thickness_mm: Option<f64>,
    pub last_measurement_date: Option<NaiveDate>,
    pub last_measurement_thickness_mm: Option<f64>,
}

impl WearState {
    fn replacement(&self) -> Option<(NaiveDate, f64)> {
        self.last_replacement_date
            .zip(self.last_replacement_thickness_mm)
    }

    /// Build an event for `reading` measured against the given baseline.
    /// `Err` carries the baseline date when the reading precedes it.
    fn event(
        &self,
        kind: EventKind,
        baseline: (NaiveDate, f64),
        reading: &NormalizedReading,
    ) -> Result<Event, NaiveDate> {
        let (base_date, base_mm) = baseline;
        let days = days_between(base_date, reading.inspected_at).ok_or(base_date)?;
        let wear = base_mm - reading.thickness_mm;
        Ok(Event {
            kind,
            replacement_date: base_date,
            replacement_thickness_mm: base_mm,
            current_date: reading.inspected_at,
            current_thickness_mm: reading.thickness_mm,
            days_since_replacement: days,
            wear_since_replacement_mm: wear,
            average_daily_wear_mm: daily_rate(wear, days),
            prior_measurement_date: self.last_measurement_date,
            prior_measurement_thickness_mm: self.last_measurement_thickness_mm,
        })
    }

    /// Apply one reading, returning the next state and the event it triggered.
    #[allow(clippy::float_cmp)] // repeated readings are matched exactly
    fn advance(
        &self,
        reading: &NormalizedReading,
        cfg: &TrackerCfg,
    ) -> Result<(WearState, Option<Event>), NaiveDate> {
        let t = reading.thickness_mm;
        let mut next = *self;
        let event = match cfg.bands.classify(t) {
            Band::Replacement => {
                let event = match self.replacement() {
                    Some(baseline) => {
                        let repeated = t == baseline.1;
                        if !repeated || cfg.policy == ReplacementPolicy::AlwaysEmit {
                            Some(self.event(EventKind::Replacement, baseline, reading)?)
                        } else {
                            None
                        }
                    }
                    None => None,
                };
                next.last_replacement_date = Some(reading.inspected_at);
                next.last_replacement_thickness_mm = Some(t);
                event
            }
            Band::Measurement => match self.replacement() {
                Some(baseline) if self.last_measurement_thickness_mm != Some(t) => {
                    let event = self.event(EventKind::Measurement, baseline, reading)?;
                    next.last_measurement_date = Some(reading.inspected_at);
                    next.last_measurement_thickness_mm = Some(t);
                    Some(event)
                }
                _ => None,
            },
            Band::Dead => None,
        };
        Ok((next, event))
    }
}

/// Sequential scanner for one equipment.
#[derive(Debug, Clone)]
pub struct WearTracker {
    equipment_id: String,
    cfg: TrackerCfg,
    state: WearState,
    last_seen: Option<NaiveDate>,
}

impl WearTracker {
    pub fn new(equipment_id: impl Into<String>, cfg: TrackerCfg) -> Self {
        Self {
            equipment_id: equipment_id.into(),
            cfg,
            state: WearState::default(),
            last_seen: None,
        }
    }

    pub fn state(&self) -> &WearState {
        &self.state
    }

    /// Consume the next reading. Readings must arrive in non-decreasing date
    /// order; anything earlier fails with `OrderingViolation`.
    pub fn observe(&mut self, reading: &NormalizedReading) -> Result<Option<Event>, WearError> {
        let violation = |previous: NaiveDate| WearError::OrderingViolation {
            equipment_id: self.equipment_id.clone(),
            previous,
            current: reading.inspected_at,
        };
        if let Some(prev) = self.last_seen
            && reading.inspected_at < prev
        {
            return Err(violation(prev));
        }
        let (next, event) = self.state.advance(reading, &self.cfg).map_err(violation)?;
        self.state = next;
        self.last_seen = Some(reading.inspected_at);
        if let Some(e) = &event {
            tracing::trace!(
                equipment_id = %self.equipment_id,
                kind = %e.kind,
                date = %e.current_date,
                thickness_mm = e.current_thickness_mm,
                "event"
            );
        }
        Ok(event)
    }
}

/// Run the tracker over a full normalized sequence.
pub fn track(
    equipment_id: &str,
    readings: &[NormalizedReading],
    cfg: &TrackerCfg,
) -> Result<Vec<Event>, WearError> {
    let mut tracker = WearTracker::new(equipment_id, *cfg);
    readings.iter().try_fold(Vec::new(), |mut events, r| {
        if let Some(e) = tracker.observe(r)? {
            events.push(e);
        }
        Ok(events)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reading(y: i32, m: u32, d: u32, t: f64) -> NormalizedReading {
        NormalizedReading {
            inspected_at: NaiveDate::from_ymd_opt(y, m, d).unwrap(),
            thickness_mm: t,
        }
    }

    #[test]
    fn first_replacement_only_updates_state() {
        let cfg = TrackerCfg::default();
        let (next, event) = WearState::default()
            .advance(&reading(2023, 1, 1, 15.0), &cfg)
            .unwrap();
        assert!(event.is_none());
        assert_eq!(next.last_replacement_thickness_mm, Some(15.0));
        assert_eq!(next.last_measurement_date, None);
    }

    #[test]
    fn measurement_before_replacement_is_ignored() {
        let cfg = TrackerCfg::default();
        let start = WearState::default();
        let (next, event) = start.advance(&reading(2023, 1, 1, 8.0), &cfg).unwrap();
        assert!(event.is_none());
        assert_eq!(next, start);
    }

    #[test]
    fn dead_band_leaves_state_untouched() {
        let cfg = TrackerCfg::default();
        let (state, _) = WearState::default()
            .advance(&reading(2023, 1, 1, 15.0), &cfg)
            .unwrap();
        let (next, event) = state.advance(&reading(2023, 2, 1, 25.0), &cfg).unwrap();
        assert!(event.is_none());
        assert_eq!(next, state);
    }

    #[test]
    fn reading_before_baseline_reports_baseline_date() {
        let cfg = TrackerCfg::default();
        let (state, _) = WearState::default()
            .advance(&reading(2023, 6, 1, 15.0), &cfg)
            .unwrap();
        let err = state
            .advance(&reading(2023, 1, 1, 8.0), &cfg)
            .expect_err("negative days must not be computed");
        assert_eq!(err, NaiveDate::from_ymd_opt(2023, 6, 1).unwrap());
    }
}
