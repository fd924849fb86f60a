use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Listing view over an account's uncategorized transactions.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum UncategorizedView {
    #[default]
    All,
    Recognized,
    Pending,
    Excluded,
}

impl UncategorizedView {
    pub fn as_str(&self) -> &'static str {
        match self {
            UncategorizedView::All => "all",
            UncategorizedView::Recognized => "recognized",
            UncategorizedView::Pending => "pending",
            UncategorizedView::Excluded => "excluded",
        }
    }

    pub fn parse_view(s: &str) -> Option<Self> {
        match s {
            "all" => Some(UncategorizedView::All),
            "recognized" => Some(UncategorizedView::Recognized),
            "pending" => Some(UncategorizedView::Pending),
            "excluded" => Some(UncategorizedView::Excluded),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Tenant {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Account {
    pub id: i64,
    pub tenant_id: i64,
    pub name: String,
    pub code: Option<String>,
    pub account_type: String,
    pub currency_code: String,
}

/// Raw bank-feed transaction awaiting categorization.
///
/// `amount` is signed: negative for money leaving the account, positive for
/// money coming in.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct UncategorizedTransaction {
    pub id: i64,
    pub tenant_id: i64,
    pub account_id: i64,
    pub date: NaiveDate,
    pub amount: f64,
    pub currency_code: String,
    pub categorized: bool,
    pub reference_no: Option<String>,
    pub payee: Option<String>,
    pub description: Option<String>,
    pub plaid_transaction_id: Option<String>,
    pub recognized_transaction_id: Option<i64>,
    pub excluded_at: Option<DateTime<Utc>>,
    pub pending: bool,
}

impl UncategorizedTransaction {
    pub fn withdrawal(&self) -> f64 {
        withdrawal_of(self.amount)
    }

    pub fn deposit(&self) -> f64 {
        deposit_of(self.amount)
    }

    pub fn is_deposit_transaction(&self) -> bool {
        self.deposit() > 0.0
    }

    pub fn is_withdrawal_transaction(&self) -> bool {
        self.withdrawal() > 0.0
    }

    pub fn is_recognized(&self) -> bool {
        self.recognized_transaction_id.is_some()
    }

    pub fn is_excluded(&self) -> bool {
        self.excluded_at.is_some()
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }
}

pub fn withdrawal_of(amount: f64) -> f64 {
    if amount < 0.0 {
        -amount
    } else {
        0.0
    }
}

pub fn deposit_of(amount: f64) -> f64 {
    if amount > 0.0 {
        amount
    } else {
        0.0
    }
}

/// System-proposed categorization for an uncategorized transaction.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct RecognizedTransaction {
    pub id: i64,
    pub tenant_id: i64,
    pub uncategorized_transaction_id: i64,
    pub bank_rule_id: Option<i64>,
    pub assigned_account_id: Option<i64>,
    pub assigned_category: Option<String>,
    pub assigned_payee: Option<String>,
    pub assigned_memo: Option<String>,
}

/// Reconciliation link between a bank transaction and an existing document.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct MatchedTransaction {
    pub id: i64,
    pub tenant_id: i64,
    pub uncategorized_transaction_id: i64,
    pub reference_type: String,
    pub reference_id: i64,
    pub amount: Option<f64>,
}
