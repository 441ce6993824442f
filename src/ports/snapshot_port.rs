//! Ledger persistence port trait.

use crate::domain::error::LedgerError;
use crate::domain::state::LedgerState;

/// Whole-state repository. Every save replaces the previous snapshot.
pub trait SnapshotPort {
    /// `Ok(None)` when nothing has been saved yet.
    fn load(&self) -> Result<Option<LedgerState>, LedgerError>;

    fn save(&self, state: &LedgerState) -> Result<(), LedgerError>;

    /// Human-readable location used in log lines.
    fn describe(&self) -> String;
}
