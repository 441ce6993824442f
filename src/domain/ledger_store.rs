//! The ledger component: owns the state, applies mutations, persists after
//! each one.

use chrono::{Local, NaiveDate};
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::account::Account;
use super::bill::{Bill, BillStatus, Biller};
use super::budget::Budget;
use super::error::{AccountRole, LedgerError};
use super::insight::FinancialInsight;
use super::lookup::resolve_account;
use super::profile::{FinancialProfile, compute_profile};
use super::state::LedgerState;
use super::transaction::{Transaction, TransactionKind};
use crate::ports::link_port::LinkProviderPort;
use crate::ports::snapshot_port::SnapshotPort;

const DATE_FORMAT: &str = "%Y-%m-%d";
const UNKNOWN_BILLER: &str = "Unknown Biller";

/// Outcome of a bill payment request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BillPayment {
    AlreadyPaid,
    Paid { transaction_id: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct TransferReceipt {
    pub source_name: String,
    pub dest_name: String,
    pub amount: f64,
    pub new_source_balance: f64,
    pub new_dest_balance: f64,
    pub transaction_id: String,
}

impl TransferReceipt {
    /// Whole amounts keep one decimal: `Transferred $100.0 from ...`.
    pub fn message(&self) -> String {
        format!(
            "Transferred ${} from {} to {}",
            display_amount(self.amount),
            self.source_name,
            self.dest_name
        )
    }
}

fn display_amount(amount: f64) -> String {
    if amount.is_finite() && amount.fract() == 0.0 {
        format!("{amount:.1}")
    } else {
        amount.to_string()
    }
}

pub struct LedgerStore {
    state: LedgerState,
    snapshots: Arc<dyn SnapshotPort + Send + Sync>,
}

impl LedgerStore {
    pub fn new(state: LedgerState, snapshots: Arc<dyn SnapshotPort + Send + Sync>) -> Self {
        LedgerStore { state, snapshots }
    }

    /// Loads the last snapshot, or starts from `fallback` when there is none
    /// or it cannot be read. Never fails and never writes.
    pub fn open(snapshots: Arc<dyn SnapshotPort + Send + Sync>, fallback: LedgerState) -> Self {
        let state = match snapshots.load() {
            Ok(Some(state)) => {
                info!(
                    source = %snapshots.describe(),
                    accounts = state.accounts.len(),
                    transactions = state.transactions.len(),
                    "loaded ledger snapshot"
                );
                state
            }
            Ok(None) => {
                warn!(source = %snapshots.describe(), "no ledger snapshot found, using default state");
                fallback
            }
            Err(e) => {
                warn!(source = %snapshots.describe(), error = %e, "failed to load ledger snapshot, using default state");
                fallback
            }
        };
        LedgerStore { state, snapshots }
    }

    pub fn state(&self) -> &LedgerState {
        &self.state
    }

    pub fn accounts(&self) -> &[Account] {
        &self.state.accounts
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.state.transactions
    }

    pub fn budgets(&self) -> &[Budget] {
        &self.state.budgets
    }

    pub fn billers(&self) -> &[Biller] {
        &self.state.billers
    }

    pub fn insights(&self) -> &[FinancialInsight] {
        &self.state.insights
    }

    /// Bills, optionally restricted to one status (`"pending"`, `"paid"`).
    pub fn bills(&self, status: Option<&str>) -> Vec<Bill> {
        self.state
            .bills
            .iter()
            .filter(|b| status.is_none_or(|s| b.status.as_str().eq_ignore_ascii_case(s)))
            .cloned()
            .collect()
    }

    /// Records `tx` and posts it to the first checking account. Returns the
    /// new checking balance, or 0 when there is no checking account.
    pub fn add_transaction(&mut self, tx: Transaction) -> Result<f64, LedgerError> {
        let delta = tx.balance_delta();
        let new_balance = match self.state.checking_account_mut() {
            Some(checking) => {
                checking.balance += delta;
                checking.balance
            }
            None => 0.0,
        };

        info!(id = %tx.id, kind = tx.kind.as_str(), amount = tx.amount, "transaction added");
        self.state.record_transaction(tx);
        self.persist()?;
        Ok(new_balance)
    }

    pub fn pay_bill(&mut self, bill_id: &str) -> Result<BillPayment, LedgerError> {
        self.pay_bill_on(bill_id, Local::now().date_naive())
    }

    /// Marks the bill paid, debits checking and records a "Bills" expense
    /// dated `date`. Paying an already-paid bill changes nothing.
    pub fn pay_bill_on(&mut self, bill_id: &str, date: NaiveDate) -> Result<BillPayment, LedgerError> {
        let bill = self
            .state
            .bills
            .iter_mut()
            .find(|b| b.id == bill_id)
            .ok_or_else(|| LedgerError::BillNotFound {
                bill_id: bill_id.to_string(),
            })?;

        if bill.is_paid() {
            debug!(bill_id, "bill already paid");
            return Ok(BillPayment::AlreadyPaid);
        }

        bill.status = BillStatus::Paid;
        let amount = bill.amount;
        let biller_id = bill.biller_id.clone();
        let date = date.format(DATE_FORMAT).to_string();

        let biller_name = match self.state.billers.iter_mut().find(|b| b.id == biller_id) {
            Some(biller) => {
                biller.last_payment_date = Some(date.clone());
                biller.name.clone()
            }
            None => UNKNOWN_BILLER.to_string(),
        };

        let tx = Transaction {
            id: Uuid::new_v4().to_string(),
            date,
            amount,
            category: "Bills".to_string(),
            description: format!("Payment to {biller_name}"),
            kind: TransactionKind::Expense,
        };

        if let Some(checking) = self.state.checking_account_mut() {
            checking.balance -= amount;
        }

        let transaction_id = tx.id.clone();
        info!(bill_id, biller = %biller_name, amount, "bill paid");
        self.state.record_transaction(tx);
        self.persist()?;
        Ok(BillPayment::Paid { transaction_id })
    }

    pub fn transfer_funds(
        &mut self,
        from_query: &str,
        to_query: &str,
        amount: f64,
    ) -> Result<TransferReceipt, LedgerError> {
        self.transfer_funds_on(from_query, to_query, amount, Local::now().date_naive())
    }

    /// Moves `amount` between two fuzzily-resolved accounts. The history
    /// entry is recorded as an expense in category "Transfer".
    pub fn transfer_funds_on(
        &mut self,
        from_query: &str,
        to_query: &str,
        amount: f64,
        date: NaiveDate,
    ) -> Result<TransferReceipt, LedgerError> {
        let accounts = &self.state.accounts;
        let source = resolve_account(accounts, from_query).ok_or_else(|| {
            LedgerError::AccountNotFound {
                role: AccountRole::Source,
                query: from_query.to_string(),
            }
        })?;
        let dest = resolve_account(accounts, to_query).ok_or_else(|| {
            LedgerError::AccountNotFound {
                role: AccountRole::Destination,
                query: to_query.to_string(),
            }
        })?;
        debug!(from_query, to_query, source, dest, "resolved transfer accounts");

        if accounts[source].balance < amount {
            return Err(LedgerError::InsufficientFunds {
                account: accounts[source].name.clone(),
                balance: accounts[source].balance,
                requested: amount,
            });
        }

        self.state.accounts[source].balance -= amount;
        self.state.accounts[dest].balance += amount;

        let source_name = self.state.accounts[source].name.clone();
        let dest_name = self.state.accounts[dest].name.clone();

        let tx = Transaction {
            id: Uuid::new_v4().to_string(),
            date: date.format(DATE_FORMAT).to_string(),
            amount,
            category: "Transfer".to_string(),
            description: format!("Transfer from {source_name} to {dest_name}"),
            kind: TransactionKind::Expense,
        };

        let receipt = TransferReceipt {
            source_name,
            dest_name,
            amount,
            new_source_balance: self.state.accounts[source].balance,
            new_dest_balance: self.state.accounts[dest].balance,
            transaction_id: tx.id.clone(),
        };

        info!(
            from = %receipt.source_name,
            to = %receipt.dest_name,
            amount,
            "funds transferred"
        );
        self.state.record_transaction(tx);
        self.persist()?;
        Ok(receipt)
    }

    pub fn add_insight(&mut self, insight: FinancialInsight) -> Result<(), LedgerError> {
        info!(id = %insight.id, title = %insight.title, "insight added");
        self.state.insights.insert(0, insight);
        self.persist()
    }

    /// Exchanges a public token through `provider` and stores the resulting
    /// credentials on the ledger.
    pub fn link_account(
        &mut self,
        public_token: &str,
        provider: &dyn LinkProviderPort,
    ) -> Result<(), LedgerError> {
        let credentials = provider.exchange_public_token(public_token)?;
        info!(item_id = %credentials.item_id, "linked payment provider item");
        self.state.access_token = Some(credentials.access_token);
        self.state.item_id = Some(credentials.item_id);
        self.persist()
    }

    pub fn profile(&self) -> FinancialProfile {
        compute_profile(&self.state)
    }

    fn persist(&self) -> Result<(), LedgerError> {
        self.snapshots.save(&self.state)?;
        debug!(target_store = %self.snapshots.describe(), "ledger snapshot saved");
        Ok(())
    }
}
