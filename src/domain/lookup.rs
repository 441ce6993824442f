//! Fuzzy account resolution for transfer requests.

use super::account::Account;

/// Resolves a free-form query ("checking", "emergency", "Main Checking") to
/// an index into `accounts`.
///
/// Stage one matches the query exactly against account types. Stage two
/// accepts the first account whose name contains the query or is contained
/// in it, case-insensitively. The query itself is lowercased first, so
/// "Savings" still hits the type stage.
pub fn resolve_account(accounts: &[Account], query: &str) -> Option<usize> {
    let query = query.to_lowercase();

    if let Some(idx) = accounts.iter().position(|a| a.kind.as_str() == query) {
        return Some(idx);
    }

    accounts.iter().position(|a| {
        let name = a.name.to_lowercase();
        name.contains(&query) || query.contains(&name)
    })
}
