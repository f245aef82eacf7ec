//! Test and helper mocks for wear_core

use wear_traits::{InspectionRow, InspectionSource, LedgerRow, LedgerSink};

/// In-memory source yielding a fixed set of rows.
#[derive(Debug, Clone, Default)]
pub struct VecSource(pub Vec<InspectionRow>);

impl InspectionSource for VecSource {
    fn rows(&mut self) -> Result<Vec<InspectionRow>, Box<dyn std::error::Error + Send + Sync>> {
        Ok(self.0.clone())
    }
}

/// A source that always errors; useful for exercising load failures.
pub struct FailingSource;

impl InspectionSource for FailingSource {
    fn rows(&mut self) -> Result<Vec<InspectionRow>, Box<dyn std::error::Error + Send + Sync>> {
        Err(Box::new(std::io::Error::other("source unavailable")))
    }
}

/// Sink that records every ledger it receives.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    pub ledgers: Vec<(String, Vec<LedgerRow>)>,
    pub finished: bool,
}

impl LedgerSink for MemorySink {
    fn write_ledger(
        &mut self,
        equipment_id: &str,
        rows: &[LedgerRow],
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.ledgers.push((equipment_id.to_string(), rows.to_vec()));
        Ok(())
    }

    fn finish(&mut self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.finished = true;
        Ok(())
    }
}
