//! Flat JSON file snapshot adapter.
//!
//! The whole ledger is rewritten on every save with a plain write; a crash
//! mid-write can leave a truncated file, which `load` then reports as
//! malformed.

use crate::domain::error::LedgerError;
use crate::domain::state::LedgerState;
use crate::ports::snapshot_port::SnapshotPort;
use std::fs;
use std::path::{Path, PathBuf};

pub struct JsonFileAdapter {
    path: PathBuf,
}

impl JsonFileAdapter {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SnapshotPort for JsonFileAdapter {
    fn load(&self) -> Result<Option<LedgerState>, LedgerError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&self.path)?;
        let state = serde_json::from_str(&content).map_err(|e| LedgerError::SnapshotParse {
            source_name: self.path.display().to_string(),
            reason: e.to_string(),
        })?;
        Ok(Some(state))
    }

    fn save(&self, state: &LedgerState) -> Result<(), LedgerError> {
        let json = serde_json::to_string_pretty(state).map_err(|e| LedgerError::Storage {
            reason: format!("failed to serialize ledger: {e}"),
        })?;
        fs::write(&self.path, json).map_err(|e| LedgerError::Storage {
            reason: format!("failed to write {}: {}", self.path.display(), e),
        })
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
