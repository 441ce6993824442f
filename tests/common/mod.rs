#![allow(dead_code)]

use chrono::NaiveDate;
use pocketledger::domain::account::{Account, AccountKind};
use pocketledger::domain::bill::{Bill, Biller};
use pocketledger::domain::error::LedgerError;
use pocketledger::domain::ledger_store::LedgerStore;
use pocketledger::domain::state::LedgerState;
use pocketledger::domain::transaction::{Transaction, TransactionKind};
use pocketledger::ports::snapshot_port::SnapshotPort;
use std::sync::{Arc, Mutex};

/// In-memory snapshot store that remembers every save.
#[derive(Default)]
pub struct MockSnapshotPort {
    pub stored: Mutex<Option<LedgerState>>,
    pub saves: Mutex<usize>,
    pub fail_load: Option<String>,
    pub fail_save: bool,
}

impl MockSnapshotPort {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_state(state: LedgerState) -> Self {
        Self {
            stored: Mutex::new(Some(state)),
            ..Self::default()
        }
    }

    pub fn failing_load(reason: &str) -> Self {
        Self {
            fail_load: Some(reason.to_string()),
            ..Self::default()
        }
    }

    pub fn failing_save() -> Self {
        Self {
            fail_save: true,
            ..Self::default()
        }
    }

    pub fn save_count(&self) -> usize {
        *self.saves.lock().unwrap()
    }

    pub fn last_saved(&self) -> Option<LedgerState> {
        self.stored.lock().unwrap().clone()
    }
}

impl SnapshotPort for MockSnapshotPort {
    fn load(&self) -> Result<Option<LedgerState>, LedgerError> {
        if let Some(reason) = &self.fail_load {
            return Err(LedgerError::SnapshotParse {
                source_name: "mock".to_string(),
                reason: reason.clone(),
            });
        }
        Ok(self.stored.lock().unwrap().clone())
    }

    fn save(&self, state: &LedgerState) -> Result<(), LedgerError> {
        if self.fail_save {
            return Err(LedgerError::Storage {
                reason: "mock save failure".to_string(),
            });
        }
        *self.stored.lock().unwrap() = Some(state.clone());
        *self.saves.lock().unwrap() += 1;
        Ok(())
    }

    fn describe(&self) -> String {
        "mock".to_string()
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn make_tx(id: &str, amount: f64, kind: TransactionKind) -> Transaction {
    Transaction::new(id, "2024-06-01", amount, "Misc", "Test entry", kind)
}

/// Checking 500, savings 200, investment 1000; one pending bill of 85 owed
/// to a known biller and one of 40 owed to a biller that does not exist.
pub fn small_state() -> LedgerState {
    LedgerState {
        accounts: vec![
            Account::new("1", "Main Checking", 500.0, AccountKind::Checking),
            Account::new("2", "Emergency Fund", 200.0, AccountKind::Savings),
            Account::new("3", "Robinhood Portfolio", 1000.0, AccountKind::Investment),
        ],
        billers: vec![Biller::new("b1", "Verizon Wireless", "Utilities", false)],
        bills: vec![
            Bill::new("bill1", "b1", 85.0, "2024-06-01"),
            Bill::new("orphan", "b404", 40.0, "2024-06-03"),
        ],
        ..LedgerState::default()
    }
}

pub fn store_with(state: LedgerState) -> (LedgerStore, Arc<MockSnapshotPort>) {
    let port = Arc::new(MockSnapshotPort::new());
    let store = LedgerStore::new(state, port.clone());
    (store, port)
}

pub fn balance_of(state: &LedgerState, id: &str) -> f64 {
    state
        .accounts
        .iter()
        .find(|a| a.id == id)
        .map(|a| a.balance)
        .unwrap()
}
