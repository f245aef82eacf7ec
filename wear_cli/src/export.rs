//! CSV ledger export.

use std::fs::File;
use std::path::Path;

use wear_traits::{LedgerRow, LedgerSink};

/// Writes every ledger into one CSV file, prefixed by an `equipment_id` column.
/// The header goes out with the first ledger, so an empty run leaves a
/// header-only file.
pub struct CsvLedgerSink {
    writer: csv::Writer<File>,
    header_written: bool,
}

impl CsvLedgerSink {
    pub fn create(path: &Path) -> eyre::Result<Self> {
        let writer = csv::Writer::from_path(path)
            .map_err(|e| eyre::eyre!("create ledger CSV {:?}: {}", path, e))?;
        Ok(Self {
            writer,
            header_written: false,
        })
    }

    fn write_header(&mut self) -> csv::Result<()> {
        if !self.header_written {
            self.writer.write_record(
                std::iter::once("equipment_id").chain(LedgerRow::HEADERS.iter().copied()),
            )?;
            self.header_written = true;
        }
        Ok(())
    }
}

impl LedgerSink for CsvLedgerSink {
    fn write_ledger(
        &mut self,
        equipment_id: &str,
        rows: &[LedgerRow],
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.write_header()?;
        for row in rows {
            self.writer
                .write_record(std::iter::once(equipment_id).chain(row.cells()))?;
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.write_header()?;
        self.writer.flush()?;
        Ok(())
    }
}
