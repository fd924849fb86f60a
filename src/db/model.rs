//! Database row and input models used by repositories.
//!
//! Keep these structs focused on the data moved in and out of queries.
//! Business logic should live in higher layers.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;

use crate::model::UncategorizedTransaction;

/// Listing row: the transaction plus its eagerly joined associations.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UncategorizedRow {
    #[sqlx(flatten)]
    pub transaction: UncategorizedTransaction,
    pub account_name: String,
    pub account_code: Option<String>,
    pub recognized_assigned_account_id: Option<i64>,
    pub recognized_assigned_account_name: Option<String>,
    pub recognized_assigned_category: Option<String>,
    pub recognized_assigned_payee: Option<String>,
    pub recognized_assigned_memo: Option<String>,
}

/// Per-view counters for one account.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, sqlx::FromRow)]
pub struct SummaryCounts {
    pub total_uncategorized: i64,
    pub total_recognized: i64,
    pub total_pending: i64,
    pub total_excluded: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewAccount {
    pub name: String,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default = "default_account_type")]
    pub account_type: String,
    #[serde(default = "default_currency")]
    pub currency_code: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewUncategorizedTransaction {
    pub date: NaiveDate,
    pub amount: f64,
    #[serde(default = "default_currency")]
    pub currency_code: String,
    #[serde(default)]
    pub reference_no: Option<String>,
    #[serde(default)]
    pub payee: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub plaid_transaction_id: Option<String>,
    #[serde(default)]
    pub pending: bool,
    #[serde(default)]
    pub categorized: bool,
    #[serde(default)]
    pub excluded_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewRecognizedTransaction {
    #[serde(default)]
    pub bank_rule_id: Option<i64>,
    #[serde(default)]
    pub assigned_account_id: Option<i64>,
    #[serde(default)]
    pub assigned_category: Option<String>,
    #[serde(default)]
    pub assigned_payee: Option<String>,
    #[serde(default)]
    pub assigned_memo: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewMatchedTransaction {
    pub reference_type: String,
    pub reference_id: i64,
    #[serde(default)]
    pub amount: Option<f64>,
}

fn default_account_type() -> String {
    "bank".to_string()
}

fn default_currency() -> String {
    "USD".to_string()
}

impl NewUncategorizedTransaction {
    /// Minimal feed row, mostly for fixtures.
    pub fn new(date: NaiveDate, amount: f64, description: &str) -> Self {
        Self {
            date,
            amount,
            currency_code: default_currency(),
            reference_no: None,
            payee: None,
            description: Some(description.to_string()),
            plaid_transaction_id: None,
            pending: false,
            categorized: false,
            excluded_at: None,
        }
    }
}
