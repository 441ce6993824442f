//! SQLite snapshot adapter.
//!
//! Stores the ledger as one JSON document in a single-row table, so the
//! persisted shape matches the JSON file backend exactly.

use crate::domain::error::LedgerError;
use crate::domain::settings::Settings;
use crate::domain::state::LedgerState;
use crate::ports::snapshot_port::SnapshotPort;
use chrono::Utc;
use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::{OptionalExtension, params};

pub struct SqliteAdapter {
    pool: Pool<SqliteConnectionManager>,
    location: String,
}

fn pool_error(e: r2d2::Error) -> LedgerError {
    LedgerError::Storage {
        reason: e.to_string(),
    }
}

fn query_error(e: rusqlite::Error) -> LedgerError {
    LedgerError::Storage {
        reason: e.to_string(),
    }
}

impl SqliteAdapter {
    pub fn from_settings(settings: &Settings) -> Result<Self, LedgerError> {
        let manager = SqliteConnectionManager::file(&settings.sqlite_path);
        let pool = Pool::builder()
            .max_size(settings.pool_size)
            .build(manager)
            .map_err(pool_error)?;

        let adapter = Self {
            pool,
            location: settings.sqlite_path.display().to_string(),
        };
        adapter.initialize_schema()?;
        Ok(adapter)
    }

    pub fn in_memory() -> Result<Self, LedgerError> {
        let manager = SqliteConnectionManager::memory();
        let pool = Pool::builder()
            .max_size(1)
            .build(manager)
            .map_err(pool_error)?;

        let adapter = Self {
            pool,
            location: ":memory:".to_string(),
        };
        adapter.initialize_schema()?;
        Ok(adapter)
    }

    fn initialize_schema(&self) -> Result<(), LedgerError> {
        let conn = self.pool.get().map_err(pool_error)?;
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS ledger_snapshot (
                id INTEGER PRIMARY KEY CHECK (id = 1),
                body TEXT NOT NULL,
                saved_at TEXT NOT NULL
            );",
        )
        .map_err(query_error)?;
        Ok(())
    }

    /// When the current snapshot was written, RFC 3339.
    pub fn saved_at(&self) -> Result<Option<String>, LedgerError> {
        let conn = self.pool.get().map_err(pool_error)?;
        conn.query_row(
            "SELECT saved_at FROM ledger_snapshot WHERE id = 1",
            [],
            |row| row.get(0),
        )
        .optional()
        .map_err(query_error)
    }
}

impl SnapshotPort for SqliteAdapter {
    fn load(&self) -> Result<Option<LedgerState>, LedgerError> {
        let conn = self.pool.get().map_err(pool_error)?;
        let body: Option<String> = conn
            .query_row(
                "SELECT body FROM ledger_snapshot WHERE id = 1",
                [],
                |row| row.get(0),
            )
            .optional()
            .map_err(query_error)?;

        match body {
            None => Ok(None),
            Some(body) => serde_json::from_str::<LedgerState>(&body)
                .map(Some)
                .map_err(|e| LedgerError::SnapshotParse {
                    source_name: self.location.clone(),
                    reason: e.to_string(),
                }),
        }
    }

    fn save(&self, state: &LedgerState) -> Result<(), LedgerError> {
        let body = serde_json::to_string(state).map_err(|e| LedgerError::Storage {
            reason: format!("failed to serialize ledger: {e}"),
        })?;
        let conn = self.pool.get().map_err(pool_error)?;
        conn.execute(
            "INSERT OR REPLACE INTO ledger_snapshot (id, body, saved_at) VALUES (1, ?1, ?2)",
            params![body, Utc::now().to_rfc3339()],
        )
        .map_err(query_error)?;
        Ok(())
    }

    fn describe(&self) -> String {
        format!("sqlite:{}", self.location)
    }
}
