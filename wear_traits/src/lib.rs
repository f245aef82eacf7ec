//! Seams between the wear engine and the tabular collaborators that feed it
//! inspections and receive the finished ledger.
//!
//! Rows cross this boundary as plain text cells so that parsing (and the
//! silent dropping of malformed cells) stays inside the engine.

pub mod row;

pub use row::{InspectionRow, LedgerRow};

pub trait InspectionSource {
    /// Yield every inspection row the source holds, in source order.
    fn rows(&mut self) -> Result<Vec<InspectionRow>, Box<dyn std::error::Error + Send + Sync>>;
}

pub trait LedgerSink {
    /// Accept the complete, ordered ledger for one equipment.
    fn write_ledger(
        &mut self,
        equipment_id: &str,
        rows: &[LedgerRow],
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;

    /// Flush buffered output. Called once after the last equipment.
    fn finish(&mut self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        Ok(())
    }
}
