//! API-facing shape of uncategorized transaction rows.
use chrono::NaiveDate;
use serde::Serialize;

use crate::db::UncategorizedRow;

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AccountRef {
    pub id: i64,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RecognizedView {
    pub id: i64,
    pub assigned_account: Option<AccountRef>,
    pub assigned_category: Option<String>,
    pub assigned_payee: Option<String>,
    pub assigned_memo: Option<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TransactionView {
    pub id: i64,
    pub date: NaiveDate,
    pub formatted_date: String,
    pub amount: f64,
    pub formatted_amount: String,
    pub withdrawal: f64,
    pub deposit: f64,
    pub formatted_withdrawal: String,
    pub formatted_deposit: String,
    pub is_deposit_transaction: bool,
    pub is_withdrawal_transaction: bool,
    pub is_recognized: bool,
    pub is_excluded: bool,
    pub is_pending: bool,
    pub reference_no: Option<String>,
    pub payee: Option<String>,
    pub description: Option<String>,
    pub plaid_transaction_id: Option<String>,
    pub currency_code: String,
    pub account: AccountRef,
    pub recognized_transaction: Option<RecognizedView>,
}

/// `1234.5` in USD becomes `"USD 1,234.50"`; negative amounts keep the sign.
pub fn format_money(amount: f64, currency_code: &str) -> String {
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = (cents / 100).to_string();
    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    format!("{sign}{currency_code} {grouped}.{:02}", cents % 100)
}

fn format_nonzero(amount: f64, currency_code: &str) -> String {
    if amount == 0.0 {
        String::new()
    } else {
        format_money(amount, currency_code)
    }
}

impl From<UncategorizedRow> for TransactionView {
    fn from(row: UncategorizedRow) -> Self {
        let t = row.transaction;
        let withdrawal = t.withdrawal();
        let deposit = t.deposit();
        let recognized_transaction = t.recognized_transaction_id.map(|id| RecognizedView {
            id,
            assigned_account: row
                .recognized_assigned_account_id
                .zip(row.recognized_assigned_account_name)
                .map(|(id, name)| AccountRef {
                    id,
                    name,
                    code: None,
                }),
            assigned_category: row.recognized_assigned_category,
            assigned_payee: row.recognized_assigned_payee,
            assigned_memo: row.recognized_assigned_memo,
        });

        TransactionView {
            id: t.id,
            date: t.date,
            formatted_date: t.date.format("%Y %b %d").to_string(),
            amount: t.amount,
            formatted_amount: format_money(t.amount, &t.currency_code),
            withdrawal,
            deposit,
            formatted_withdrawal: format_nonzero(withdrawal, &t.currency_code),
            formatted_deposit: format_nonzero(deposit, &t.currency_code),
            is_deposit_transaction: t.is_deposit_transaction(),
            is_withdrawal_transaction: t.is_withdrawal_transaction(),
            is_recognized: t.is_recognized(),
            is_excluded: t.is_excluded(),
            is_pending: t.is_pending(),
            reference_no: t.reference_no,
            payee: t.payee,
            description: t.description,
            plaid_transaction_id: t.plaid_transaction_id,
            account: AccountRef {
                id: t.account_id,
                name: row.account_name,
                code: row.account_code,
            },
            currency_code: t.currency_code,
            recognized_transaction,
        }
    }
}
