//! Core domain types and logic.

pub mod account;
pub mod bill;
pub mod budget;
pub mod error;
pub mod insight;
pub mod ledger_store;
pub mod lookup;
pub mod profile;
pub mod settings;
pub mod state;
pub mod transaction;
