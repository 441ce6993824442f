//! Accounts held in the ledger.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountKind {
    Checking,
    Savings,
    Investment,
    /// Any value outside the known set, kept verbatim.
    #[serde(untagged)]
    Other(String),
}

impl AccountKind {
    pub fn as_str(&self) -> &str {
        match self {
            AccountKind::Checking => "checking",
            AccountKind::Savings => "savings",
            AccountKind::Investment => "investment",
            AccountKind::Other(s) => s,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub id: String,
    pub name: String,
    pub balance: f64,
    #[serde(rename = "type")]
    pub kind: AccountKind,
}

impl Account {
    pub fn new(id: &str, name: &str, balance: f64, kind: AccountKind) -> Self {
        Account {
            id: id.to_string(),
            name: name.to_string(),
            balance,
            kind,
        }
    }

    pub fn is_checking(&self) -> bool {
        self.kind == AccountKind::Checking
    }

    pub fn is_savings(&self) -> bool {
        self.kind == AccountKind::Savings
    }
}
