//! Value types flowing through the pipeline.

use chrono::NaiveDate;
use wear_traits::InspectionRow;

use crate::util::{parse_date, parse_thickness};

/// One raw inspection after cell parsing. Missing or unparseable cells are `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct Reading {
    pub equipment_id: String,
    pub inspected_at: Option<NaiveDate>,
    pub thickness_mm: Option<f64>,
}

impl Reading {
    pub fn new(
        equipment_id: impl Into<String>,
        inspected_at: NaiveDate,
        thickness_mm: f64,
    ) -> Self {
        Self {
            equipment_id: equipment_id.into(),
            inspected_at: Some(inspected_at),
            thickness_mm: Some(thickness_mm),
        }
    }

    /// Parse a tabular row. Never fails; bad cells become `None`.
    pub fn from_row(row: &InspectionRow, date_formats: &[String]) -> Self {
        Self {
            equipment_id: row.equipment_id.trim().to_string(),
            inspected_at: parse_date(&row.inspection_date, date_formats),
            thickness_mm: parse_thickness(&row.min_thickness_mm),
        }
    }

    /// Date and thickness when both are usable.
    pub fn usable(&self) -> Option<(NaiveDate, f64)> {
        match (self.inspected_at, self.thickness_mm) {
            (Some(d), Some(t)) if t.is_finite() && t >= 0.0 => Some((d, t)),
            _ => None,
        }
    }
}

/// One reading per inspection day, carrying the largest thickness of that day.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizedReading {
    pub inspected_at: NaiveDate,
    pub thickness_mm: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Replacement,
    Measurement,
}

impl EventKind {
    pub fn as_str(self) -> &'static str {
        match self {
            EventKind::Replacement => "Replacement",
            EventKind::Measurement => "Measurement",
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A classified reading with wear statistics since the governing replacement.
///
/// For `Replacement` events the baseline is the *previous* replacement: the
/// event closes out the wear period that started there.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub kind: EventKind,
    pub replacement_date: NaiveDate,
    pub replacement_thickness_mm: f64,
    pub current_date: NaiveDate,
    pub current_thickness_mm: f64,
    pub days_since_replacement: u32,
    /// `replacement_thickness_mm - current_thickness_mm`; negative when a
    /// reading comes back thicker than the baseline (measurement noise).
    pub wear_since_replacement_mm: f64,
    /// Wear per elapsed day, 0 when no day has elapsed.
    pub average_daily_wear_mm: f64,
    pub prior_measurement_date: Option<NaiveDate>,
    pub prior_measurement_thickness_mm: Option<f64>,
}

/// Projected crossing of the safety floor, derived from the last measurement.
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    /// `None` when wear is not converging on the floor (see `days_remaining`)
    /// or when the projection falls outside the representable calendar.
    pub predicted_date: Option<NaiveDate>,
    /// Always the configured safety floor.
    pub predicted_thickness_mm: f64,
    /// `f64::INFINITY` when the average daily wear is <= 0.
    pub days_remaining: f64,
    /// Thickness still to be lost before the floor is reached.
    pub remaining_wear_mm: f64,
    pub measured_at: NaiveDate,
    pub measured_thickness_mm: f64,
    pub replacement_date: NaiveDate,
    pub replacement_thickness_mm: f64,
    pub wear_since_replacement_mm: f64,
    pub average_daily_wear_mm: f64,
}

impl Prediction {
    /// True when the part is not wearing toward the floor.
    pub fn is_non_convergent(&self) -> bool {
        self.days_remaining.is_infinite()
    }
}
