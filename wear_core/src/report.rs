//! Report assembly: one chronologically ordered ledger per equipment.

use chrono::NaiveDate;
use wear_traits::LedgerRow;

use crate::types::{Event, EventKind, Prediction};
use crate::util::{fmt_mm, format_date, round_to};

/// Decimal places for wear and average-daily-wear cells.
pub const WEAR_DECIMALS: i32 = 3;
/// Days in the "monthly wear" figure.
pub const DAYS_PER_MONTH: f64 = 30.0;

#[derive(Debug, Clone, PartialEq)]
pub enum LedgerEntry {
    Event(Event),
    Prediction(Prediction),
}

impl LedgerEntry {
    /// Sort key: the event's current date, or the predicted date.
    pub fn current_date(&self) -> Option<NaiveDate> {
        match self {
            LedgerEntry::Event(e) => Some(e.current_date),
            LedgerEntry::Prediction(p) => p.predicted_date,
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            LedgerEntry::Event(e) => e.kind.as_str(),
            LedgerEntry::Prediction(_) => "Prediction",
        }
    }

    /// Format as a tabular row. Dates use `date_format`; a prediction without
    /// a date leaves its date cells empty and reports `inf` days.
    pub fn to_row(&self, date_format: &str) -> LedgerRow {
        let date = |d: NaiveDate| format_date(d, date_format);
        let wear = |v: f64| fmt_mm(round_to(v, WEAR_DECIMALS));
        match self {
            LedgerEntry::Event(e) => LedgerRow {
                replacement_date: date(e.replacement_date),
                replacement_thickness_mm: fmt_mm(e.replacement_thickness_mm),
                current_date: date(e.current_date),
                current_thickness_mm: fmt_mm(e.current_thickness_mm),
                days_since_replacement: e.days_since_replacement.to_string(),
                wear_mm: wear(e.wear_since_replacement_mm),
                avg_daily_wear_mm: wear(e.average_daily_wear_mm),
                prior_measurement_date: e.prior_measurement_date.map(date).unwrap_or_default(),
                prior_measurement_thickness_mm: e
                    .prior_measurement_thickness_mm
                    .map(fmt_mm)
                    .unwrap_or_default(),
                kind: e.kind.as_str().to_string(),
            },
            LedgerEntry::Prediction(p) => {
                let predicted = p.predicted_date.map(date).unwrap_or_default();
                let days = if p.days_remaining.is_finite() {
                    (p.days_remaining.round() as i64).to_string()
                } else {
                    "inf".to_string()
                };
                LedgerRow {
                    replacement_date: predicted.clone(),
                    replacement_thickness_mm: fmt_mm(p.predicted_thickness_mm),
                    current_date: predicted,
                    current_thickness_mm: fmt_mm(p.predicted_thickness_mm),
                    days_since_replacement: days,
                    wear_mm: wear(p.remaining_wear_mm),
                    avg_daily_wear_mm: wear(p.average_daily_wear_mm),
                    prior_measurement_date: date(p.measured_at),
                    prior_measurement_thickness_mm: fmt_mm(p.measured_thickness_mm),
                    kind: "Prediction".to_string(),
                }
            }
        }
    }
}

/// Ordered events plus the optional prediction for one equipment.
#[derive(Debug, Clone, PartialEq)]
pub struct Ledger {
    pub equipment_id: String,
    pub entries: Vec<LedgerEntry>,
}

/// Merge events and the prediction, ordered by current date (stable).
/// A prediction without a date sorts last.
pub fn assemble(equipment_id: &str, events: Vec<Event>, prediction: Option<Prediction>) -> Ledger {
    let mut entries: Vec<LedgerEntry> = events
        .into_iter()
        .map(LedgerEntry::Event)
        .chain(prediction.map(LedgerEntry::Prediction))
        .collect();
    entries.sort_by_key(|e| {
        let d = e.current_date();
        (d.is_none(), d)
    });
    Ledger {
        equipment_id: equipment_id.to_string(),
        entries,
    }
}

impl Ledger {
    pub fn events(&self) -> impl Iterator<Item = &Event> {
        self.entries.iter().filter_map(|e| match e {
            LedgerEntry::Event(ev) => Some(ev),
            LedgerEntry::Prediction(_) => None,
        })
    }

    pub fn prediction(&self) -> Option<&Prediction> {
        self.entries.iter().find_map(|e| match e {
            LedgerEntry::Prediction(p) => Some(p),
            LedgerEntry::Event(_) => None,
        })
    }

    pub fn to_rows(&self, date_format: &str) -> Vec<LedgerRow> {
        self.entries.iter().map(|e| e.to_row(date_format)).collect()
    }

    pub fn summary(&self) -> Summary {
        let (replacements, measurements) =
            self.events()
                .fold((0, 0), |(r, m), e| match e.kind {
                    EventKind::Replacement => (r + 1, m),
                    EventKind::Measurement => (r, m + 1),
                });
        let outlook = match self.prediction() {
            None => Outlook::NoPrediction,
            Some(p) => match p.predicted_date {
                Some(date) => Outlook::Due {
                    date,
                    days_remaining: p.days_remaining,
                },
                None if p.is_non_convergent() => Outlook::Never,
                None => Outlook::BeyondCalendar,
            },
        };
        let prediction = self.prediction();
        Summary {
            equipment_id: self.equipment_id.clone(),
            replacements,
            measurements,
            last_measurement: prediction.map(|p| (p.measured_at, p.measured_thickness_mm)),
            average_daily_wear_mm: prediction.map(|p| p.average_daily_wear_mm),
            monthly_wear_mm: prediction.map(|p| p.average_daily_wear_mm * DAYS_PER_MONTH),
            min_safe_thickness_mm: prediction.map(|p| p.predicted_thickness_mm),
            outlook,
        }
    }
}

/// What the ledger says about the next replacement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Outlook {
    /// No measurement event to extrapolate from.
    NoPrediction,
    /// Wear rate <= 0; the floor is never reached at the current rate.
    Never,
    /// Finite projection too far out for the calendar.
    BeyondCalendar,
    Due { date: NaiveDate, days_remaining: f64 },
}

/// Condensed per-equipment view used by the `predict` command.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub equipment_id: String,
    pub replacements: usize,
    pub measurements: usize,
    pub last_measurement: Option<(NaiveDate, f64)>,
    pub average_daily_wear_mm: Option<f64>,
    pub monthly_wear_mm: Option<f64>,
    pub min_safe_thickness_mm: Option<f64>,
    pub outlook: Outlook,
}
