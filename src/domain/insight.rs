//! Generated financial insights.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightKind {
    Saving,
    Budgeting,
    Investment,
    Debt,
    #[serde(untagged)]
    Other(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Impact {
    High,
    Medium,
    Low,
    #[serde(untagged)]
    Other(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialInsight {
    pub id: String,
    pub title: String,
    pub content: String,
    #[serde(rename = "type")]
    pub kind: InsightKind,
    pub impact: Impact,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_values_outside_the_known_set() {
        let insight: FinancialInsight = serde_json::from_str(
            r#"{"id":"i9","title":"t","content":"c","type":"tax","impact":"urgent"}"#,
        )
        .unwrap();
        assert_eq!(insight.kind, InsightKind::Other("tax".into()));
        assert_eq!(insight.impact, Impact::Other("urgent".into()));
    }
}
