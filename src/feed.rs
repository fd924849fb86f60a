//! Bank-feed import from a JSON document.
//!
//! The document describes one tenant, its accounts and their raw feed
//! transactions, optionally with recognition proposals and matches:
//!
//! ```json
//! {
//!   "tenant": "Acme",
//!   "accounts": [
//!     { "name": "Checking", "code": "1010", "transactions": [
//!       { "date": "2024-01-15", "amount": -42.0, "description": "AMAZON MKTPLACE",
//!         "recognized": { "assigned_account": "Office Supplies" } }
//!     ] },
//!     { "name": "Office Supplies", "account_type": "expense" }
//!   ]
//! }
//! ```
use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::Path;
use tracing::{info, instrument};

use crate::db::repo::{
    insert_account_tx, insert_matched_transaction_tx, insert_recognized_transaction_tx,
    insert_tenant_tx, insert_uncategorized_transaction_tx,
};
use crate::db::{
    NewAccount, NewMatchedTransaction, NewRecognizedTransaction, NewUncategorizedTransaction, Pool,
};

#[derive(Debug, Clone, Deserialize)]
pub struct FeedFile {
    pub tenant: String,
    pub accounts: Vec<FeedAccount>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FeedAccount {
    #[serde(flatten)]
    pub account: NewAccount,
    #[serde(default)]
    pub transactions: Vec<FeedTransaction>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FeedTransaction {
    #[serde(flatten)]
    pub transaction: NewUncategorizedTransaction,
    #[serde(default)]
    pub recognized: Option<FeedRecognition>,
    #[serde(default)]
    pub matches: Vec<NewMatchedTransaction>,
}

/// Recognition proposal referring to its target account by name.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FeedRecognition {
    pub assigned_account: Option<String>,
    pub assigned_category: Option<String>,
    pub assigned_payee: Option<String>,
    pub assigned_memo: Option<String>,
    pub bank_rule_id: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportSummary {
    pub tenant_id: i64,
    pub accounts: usize,
    pub transactions: usize,
    pub recognized: usize,
    pub matched: usize,
}

pub fn read_feed(path: &Path) -> Result<FeedFile> {
    let content = std::fs::read_to_string(path)?;
    let feed = serde_json::from_str(&content)?;
    Ok(feed)
}

/// Insert the whole feed in one transaction; any failure leaves the store
/// untouched.
#[instrument(skip_all, fields(tenant = %feed.tenant))]
pub async fn import_feed(pool: &Pool, feed: &FeedFile) -> Result<ImportSummary> {
    // Recognitions name their target account, so names must be unique.
    let mut names = HashSet::new();
    for acct in &feed.accounts {
        if !names.insert(acct.account.name.as_str()) {
            return Err(anyhow!("duplicate account name {:?} in feed", acct.account.name));
        }
    }

    let mut tx = pool.begin().await?;
    let tenant_id = insert_tenant_tx(&mut *tx, &feed.tenant).await?;
    let mut summary = ImportSummary {
        tenant_id,
        ..Default::default()
    };

    // Accounts first so recognitions can point at any account in the feed.
    let mut account_ids = HashMap::new();
    let mut inserted = Vec::with_capacity(feed.accounts.len());
    for acct in &feed.accounts {
        let id = insert_account_tx(&mut *tx, tenant_id, &acct.account).await?;
        account_ids.insert(acct.account.name.as_str(), id);
        inserted.push((id, acct));
        summary.accounts += 1;
    }

    for (account_id, acct) in inserted {
        for ft in &acct.transactions {
            let txn_id =
                insert_uncategorized_transaction_tx(&mut *tx, tenant_id, account_id, &ft.transaction)
                    .await?;
            summary.transactions += 1;

            if let Some(rec) = &ft.recognized {
                let assigned_account_id = match rec.assigned_account.as_deref() {
                    Some(name) => Some(
                        *account_ids
                            .get(name)
                            .ok_or_else(|| anyhow!("unknown assigned account {name:?}"))?,
                    ),
                    None => None,
                };
                let new_rec = NewRecognizedTransaction {
                    bank_rule_id: rec.bank_rule_id,
                    assigned_account_id,
                    assigned_category: rec.assigned_category.clone(),
                    assigned_payee: rec.assigned_payee.clone(),
                    assigned_memo: rec.assigned_memo.clone(),
                };
                insert_recognized_transaction_tx(&mut *tx, tenant_id, txn_id, &new_rec).await?;
                summary.recognized += 1;
            }

            for m in &ft.matches {
                insert_matched_transaction_tx(&mut *tx, tenant_id, txn_id, m).await?;
                summary.matched += 1;
            }
        }
    }

    tx.commit().await?;
    info!(
        tenant_id,
        accounts = summary.accounts,
        transactions = summary.transactions,
        "imported bank feed"
    );
    Ok(summary)
}
