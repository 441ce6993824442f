//! The aggregate ledger state mirrored to the snapshot store.

use serde::{Deserialize, Serialize};

use super::account::{Account, AccountKind};
use super::bill::{Bill, Biller};
use super::budget::Budget;
use super::insight::{FinancialInsight, Impact, InsightKind};
use super::transaction::{Transaction, TransactionKind};

/// Everything the ledger knows. Sequences are ordered newest first where
/// entries are prepended (transactions, insights).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LedgerState {
    pub accounts: Vec<Account>,
    pub transactions: Vec<Transaction>,
    pub budgets: Vec<Budget>,
    pub billers: Vec<Biller>,
    pub bills: Vec<Bill>,
    pub insights: Vec<FinancialInsight>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_id: Option<String>,
}

impl LedgerState {
    /// Demo dataset used when no snapshot exists yet.
    pub fn seed() -> Self {
        LedgerState {
            accounts: vec![
                Account::new("1", "Main Checking", 4250.75, AccountKind::Checking),
                Account::new("2", "Emergency Fund", 12000.00, AccountKind::Savings),
                Account::new("3", "Robinhood Portfolio", 8560.20, AccountKind::Investment),
            ],
            transactions: vec![
                Transaction::new("t1", "2024-05-15", 3500.0, "Salary", "Monthly Paycheck", TransactionKind::Income),
                Transaction::new("t2", "2024-05-16", 1200.0, "Housing", "Rent payment", TransactionKind::Expense),
                Transaction::new("t3", "2024-05-17", 5.45, "Food", "Starbucks Coffee", TransactionKind::Expense),
                Transaction::new("t4", "2024-05-18", 65.20, "Shopping", "Amazon - Household", TransactionKind::Expense),
                Transaction::new("t5", "2024-05-19", 120.0, "Utilities", "Electric Bill", TransactionKind::Expense),
            ],
            budgets: vec![
                Budget::new("Food", 500.0, 340.0),
                Budget::new("Entertainment", 200.0, 150.0),
                Budget::new("Transport", 300.0, 85.0),
            ],
            billers: vec![
                Biller::new("b1", "Verizon Wireless", "Utilities", false),
                Biller::new("b2", "State Farm Insurance", "Insurance", true),
                Biller::new("b3", "City Water Dept", "Utilities", false),
            ],
            bills: vec![
                Bill::new("bill1", "b1", 85.00, "2024-06-01"),
                Bill::new("bill2", "b3", 42.50, "2024-06-05"),
            ],
            insights: vec![FinancialInsight {
                id: "i1".into(),
                title: "High Subscription Spend".into(),
                content: "You spent $120 on streaming services this month. Canceling one could save you $480/year.".into(),
                kind: InsightKind::Budgeting,
                impact: Impact::Medium,
            }],
            access_token: None,
            item_id: None,
        }
    }

    /// First account of type checking, the one everyday activity posts to.
    pub fn checking_account_mut(&mut self) -> Option<&mut Account> {
        self.accounts.iter_mut().find(|a| a.is_checking())
    }

    pub fn record_transaction(&mut self, tx: Transaction) {
        self.transactions.insert(0, tx);
    }
}
