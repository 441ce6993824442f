//! Transaction export port trait.

use crate::domain::error::LedgerError;
use crate::domain::transaction::Transaction;

/// Port for writing the transaction history to an external format.
pub trait ExportPort {
    fn write(&self, transactions: &[Transaction], output_path: &str) -> Result<(), LedgerError>;
}
