//! Linear projection of the last measured wear rate down to the safety floor.

use chrono::{Days, NaiveDate};

use crate::config::SafetyCfg;
use crate::types::{Event, EventKind, Prediction};

/// Most recent `Measurement` event, if any.
pub fn last_measurement(events: &[Event]) -> Option<&Event> {
    events
        .iter()
        .rev()
        .find(|e| e.kind == EventKind::Measurement)
}

/// Predict when the part reaches the safety floor.
///
/// Returns `None` when no measurement exists (insufficient data). A
/// non-positive wear rate yields a prediction with infinite `days_remaining`
/// and no date.
pub fn extrapolate(events: &[Event], safety: &SafetyCfg) -> Option<Prediction> {
    last_measurement(events).map(|m| project(m, safety))
}

/// Project a single measurement event forward.
pub fn project(measurement: &Event, safety: &SafetyCfg) -> Prediction {
    let floor = safety.min_safe_thickness_mm;
    let rate = measurement.average_daily_wear_mm;
    let remaining = measurement.current_thickness_mm - floor;
    let days_remaining = if rate > 0.0 {
        remaining / rate
    } else {
        f64::INFINITY
    };
    Prediction {
        predicted_date: offset_date(measurement.current_date, days_remaining),
        predicted_thickness_mm: floor,
        days_remaining,
        remaining_wear_mm: remaining,
        measured_at: measurement.current_date,
        measured_thickness_mm: measurement.current_thickness_mm,
        replacement_date: measurement.replacement_date,
        replacement_thickness_mm: measurement.replacement_thickness_mm,
        wear_since_replacement_mm: measurement.wear_since_replacement_mm,
        average_daily_wear_mm: rate,
    }
}

/// `date + floor(days)`; `None` for non-finite or unrepresentable offsets.
/// A part already below the floor projects into the past.
fn offset_date(date: NaiveDate, days: f64) -> Option<NaiveDate> {
    if !days.is_finite() {
        return None;
    }
    let whole = days.floor();
    // Saturating casts; out-of-range values fail the checked calendar math.
    if whole >= 0.0 {
        date.checked_add_days(Days::new(whole as u64))
    } else {
        date.checked_sub_days(Days::new((-whole) as u64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offsets() {
        let d = NaiveDate::from_ymd_opt(2023, 6, 1).unwrap();
        assert_eq!(
            offset_date(d, 129.43),
            NaiveDate::from_ymd_opt(2023, 10, 8)
        );
        assert_eq!(offset_date(d, -0.5), NaiveDate::from_ymd_opt(2023, 5, 31));
        assert_eq!(offset_date(d, f64::INFINITY), None);
        assert_eq!(offset_date(d, f64::NAN), None);
        assert_eq!(offset_date(d, 1e300), None);
    }
}
