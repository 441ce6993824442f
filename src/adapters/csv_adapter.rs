//! CSV transaction export adapter.

use crate::domain::error::LedgerError;
use crate::domain::transaction::Transaction;
use crate::ports::export_port::ExportPort;
use std::io::Write;

const HEADER: [&str; 6] = ["id", "date", "amount", "category", "description", "type"];

#[derive(Debug, Default)]
pub struct CsvExportAdapter;

impl CsvExportAdapter {
    pub fn new() -> Self {
        Self
    }

    /// Writes header plus one row per transaction, in history order.
    pub fn write_to<W: Write>(
        &self,
        writer: W,
        transactions: &[Transaction],
    ) -> Result<(), LedgerError> {
        let mut wtr = csv::Writer::from_writer(writer);
        wtr.write_record(HEADER).map_err(csv_error)?;

        for tx in transactions {
            let amount = tx.amount.to_string();
            wtr.write_record([
                tx.id.as_str(),
                tx.date.as_str(),
                amount.as_str(),
                tx.category.as_str(),
                tx.description.as_str(),
                tx.kind.as_str(),
            ])
            .map_err(csv_error)?;
        }

        wtr.flush()?;
        Ok(())
    }
}

impl ExportPort for CsvExportAdapter {
    fn write(&self, transactions: &[Transaction], output_path: &str) -> Result<(), LedgerError> {
        let file = std::fs::File::create(output_path)?;
        self.write_to(file, transactions)
    }
}

fn csv_error(e: csv::Error) -> LedgerError {
    LedgerError::Storage {
        reason: format!("CSV write error: {e}"),
    }
}
