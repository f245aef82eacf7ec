/// One inspection as read from the tabular source. Cells are kept verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InspectionRow {
    pub equipment_id: String,
    /// Inspection date cell, usually `dd/mm/yyyy`. May be empty or garbage.
    pub inspection_date: String,
    /// Minimum measured thickness cell in millimeters. May be empty.
    pub min_thickness_mm: String,
}

impl InspectionRow {
    pub fn new(
        equipment_id: impl Into<String>,
        inspection_date: impl Into<String>,
        min_thickness_mm: impl Into<String>,
    ) -> Self {
        Self {
            equipment_id: equipment_id.into(),
            inspection_date: inspection_date.into(),
            min_thickness_mm: min_thickness_mm.into(),
        }
    }
}

/// One formatted ledger line, ready for a tabular sink.
///
/// Column order matches [`LedgerRow::HEADERS`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LedgerRow {
    pub replacement_date: String,
    pub replacement_thickness_mm: String,
    pub current_date: String,
    pub current_thickness_mm: String,
    pub days_since_replacement: String,
    pub wear_mm: String,
    pub avg_daily_wear_mm: String,
    /// Empty when no measurement preceded the record.
    pub prior_measurement_date: String,
    pub prior_measurement_thickness_mm: String,
    /// `Replacement`, `Measurement` or `Prediction`.
    pub kind: String,
}

impl LedgerRow {
    pub const HEADERS: [&'static str; 10] = [
        "replacement_date",
        "replacement_thickness_mm",
        "current_date",
        "current_thickness_mm",
        "days_since_replacement",
        "wear_mm",
        "avg_daily_wear_mm",
        "prior_measurement_date",
        "prior_measurement_thickness_mm",
        "kind",
    ];

    /// Cells in header order.
    pub fn cells(&self) -> [&str; 10] {
        [
            &self.replacement_date,
            &self.replacement_thickness_mm,
            &self.current_date,
            &self.current_thickness_mm,
            &self.days_since_replacement,
            &self.wear_mm,
            &self.avg_daily_wear_mm,
            &self.prior_measurement_date,
            &self.prior_measurement_thickness_mm,
            &self.kind,
        ]
    }
}
