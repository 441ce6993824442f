//! Transaction history records.

use serde::{Deserialize, Deserializer, Serialize, de};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
    #[serde(untagged)]
    Other(String),
}

impl TransactionKind {
    pub fn as_str(&self) -> &str {
        match self {
            TransactionKind::Income => "income",
            TransactionKind::Expense => "expense",
            TransactionKind::Other(s) => s,
        }
    }
}

/// A single ledger entry. Never modified after it is recorded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    /// ISO date, `YYYY-MM-DD`.
    pub date: String,
    #[serde(deserialize_with = "deserialize_amount")]
    pub amount: f64,
    pub category: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
}

impl Transaction {
    pub fn new(
        id: &str,
        date: &str,
        amount: f64,
        category: &str,
        description: &str,
        kind: TransactionKind,
    ) -> Self {
        Transaction {
            id: id.to_string(),
            date: date.to_string(),
            amount,
            category: category.to_string(),
            description: description.to_string(),
            kind,
        }
    }

    /// Signed effect on the checking balance: income credits, anything else debits.
    pub fn balance_delta(&self) -> f64 {
        match self.kind {
            TransactionKind::Income => self.amount,
            _ => -self.amount,
        }
    }
}

/// Reads an amount given either as a JSON number or as a numeric string
/// (`100`, `"100"`, `" 12.50 "`).
pub fn deserialize_amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrText {
        Number(f64),
        Text(String),
    }

    match NumberOrText::deserialize(deserializer)? {
        NumberOrText::Number(n) => Ok(n),
        NumberOrText::Text(text) => text
            .trim()
            .parse()
            .map_err(|_| de::Error::custom(format!("invalid amount '{text}'"))),
    }
}
