//! Per-category spending budgets.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    pub category: String,
    pub limit: f64,
    pub spent: f64,
}

impl Budget {
    pub fn new(category: &str, limit: f64, spent: f64) -> Self {
        Budget {
            category: category.to_string(),
            limit,
            spent,
        }
    }
}
