//! Derived financial metrics over the current ledger state.

use serde::Serialize;

use super::account::Account;
use super::budget::Budget;
use super::state::LedgerState;
use super::transaction::{Transaction, TransactionKind};

/// Number of head-of-history transactions returned with a profile.
pub const RECENT_TRANSACTIONS: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileMetrics {
    pub total_savings: f64,
    pub total_liquidity: f64,
    /// Summed over the whole history, not a calendar month.
    pub monthly_income: f64,
    pub monthly_expenses: f64,
    pub savings_rate_pct: f64,
    pub emergency_runway_months: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FinancialProfile {
    pub accounts: Vec<Account>,
    pub metrics: ProfileMetrics,
    pub recent_transactions: Vec<Transaction>,
    pub budgets: Vec<Budget>,
}

impl ProfileMetrics {
    pub fn compute(state: &LedgerState) -> Self {
        let total_savings: f64 = state
            .accounts
            .iter()
            .filter(|a| a.is_savings())
            .map(|a| a.balance)
            .sum();
        let total_liquidity: f64 = state.accounts.iter().map(|a| a.balance).sum();

        let income = sum_of_kind(&state.transactions, &TransactionKind::Income);
        let expenses = sum_of_kind(&state.transactions, &TransactionKind::Expense);

        let savings_rate = if income > 0.0 {
            (income - expenses) / income * 100.0
        } else {
            0.0
        };

        let runway = if expenses > 0.0 {
            total_savings / expenses
        } else {
            0.0
        };

        ProfileMetrics {
            total_savings,
            total_liquidity,
            monthly_income: income,
            monthly_expenses: expenses,
            savings_rate_pct: round1(savings_rate),
            emergency_runway_months: round1(runway),
        }
    }
}

pub fn compute_profile(state: &LedgerState) -> FinancialProfile {
    FinancialProfile {
        accounts: state.accounts.clone(),
        metrics: ProfileMetrics::compute(state),
        recent_transactions: state
            .transactions
            .iter()
            .take(RECENT_TRANSACTIONS)
            .cloned()
            .collect(),
        budgets: state.budgets.clone(),
    }
}

fn sum_of_kind(transactions: &[Transaction], kind: &TransactionKind) -> f64 {
    transactions
        .iter()
        .filter(|t| &t.kind == kind)
        .map(|t| t.amount)
        .sum()
}

/// One decimal place, rounding the exact binary value with ties to even.
/// `0.25` becomes `0.2` and `0.35` (stored just below) becomes `0.3`.
fn round1(value: f64) -> f64 {
    format!("{value:.1}").parse().unwrap_or(value)
}
