//! Billers and the bills they issue.

use serde::{Deserialize, Serialize};

/// A payee billed against periodically.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Biller {
    pub id: String,
    pub name: String,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_payment_date: Option<String>,
    pub auto_pay: bool,
}

impl Biller {
    pub fn new(id: &str, name: &str, category: &str, auto_pay: bool) -> Self {
        Biller {
            id: id.to_string(),
            name: name.to_string(),
            category: category.to_string(),
            last_payment_date: None,
            auto_pay,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillStatus {
    Pending,
    Paid,
    #[serde(untagged)]
    Other(String),
}

impl BillStatus {
    pub fn as_str(&self) -> &str {
        match self {
            BillStatus::Pending => "pending",
            BillStatus::Paid => "paid",
            BillStatus::Other(s) => s,
        }
    }
}

/// A payable instance issued by a biller. `biller_id` is not checked
/// against the biller list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bill {
    pub id: String,
    pub biller_id: String,
    pub amount: f64,
    pub due_date: String,
    pub status: BillStatus,
}

impl Bill {
    pub fn new(id: &str, biller_id: &str, amount: f64, due_date: &str) -> Self {
        Bill {
            id: id.to_string(),
            biller_id: biller_id.to_string(),
            amount,
            due_date: due_date.to_string(),
            status: BillStatus::Pending,
        }
    }

    pub fn is_paid(&self) -> bool {
        self.status == BillStatus::Paid
    }
}
