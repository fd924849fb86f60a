//! Read-side operations over an account's uncategorized bank transactions.
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::config::Listing;
use crate::db::{self, Pool};
use crate::error::ListError;
use crate::filter::UncategorizedFilter;
use crate::pagination::PageInfo;
use crate::tenancy;
use crate::transform::TransactionView;

/// Inbound request as a controller would hand it over.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListUncategorizedRequest {
    pub tenant_id: i64,
    pub account_id: Option<i64>,
    #[serde(default)]
    pub filter: UncategorizedFilter,
}

#[derive(Debug, Clone, Serialize)]
pub struct UncategorizedPage {
    pub data: Vec<TransactionView>,
    pub pagination: PageInfo,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountSummary {
    pub account_id: i64,
    pub total_uncategorized_transactions: i64,
    pub total_recognized_transactions: i64,
    pub total_pending_transactions: i64,
    pub total_excluded_transactions: i64,
}

fn require_account_id(account_id: Option<i64>) -> Result<i64, ListError> {
    match account_id {
        Some(id) if id > 0 => Ok(id),
        Some(id) => Err(ListError::Validation(format!(
            "accountId must be a positive integer, got {id}"
        ))),
        None => Err(ListError::Validation("accountId is required".into())),
    }
}

/// List the unmatched, uncategorized transactions of one account, newest
/// first, one page at a time.
///
/// The filter is validated before any query runs. Then the tenant and account
/// are resolved, the matching rows are counted once, and the requested window
/// is fetched with its account associations joined in. Nothing is written.
#[instrument(
    skip(pool, listing, request),
    fields(tenant_id = request.tenant_id, account_id = ?request.account_id)
)]
pub async fn get_uncategorized_transactions(
    pool: &Pool,
    listing: &Listing,
    request: &ListUncategorizedRequest,
) -> Result<UncategorizedPage, ListError> {
    let account_id = require_account_id(request.account_id)?;
    let filter = request.filter.validate(listing)?;
    let scope = tenancy::resolve_scope(pool, request.tenant_id, account_id).await?;

    let total = db::count_uncategorized(pool, scope.tenant.id, scope.account.id, &filter).await?;
    let pagination = PageInfo::new(filter.page, total);

    // Past the last page: skip the row query, the answer is empty anyway.
    let rows = if filter.page.offset() >= total {
        Vec::new()
    } else {
        db::fetch_uncategorized_page(pool, scope.tenant.id, scope.account.id, &filter).await?
    };
    debug!(
        total,
        page = pagination.page,
        rows = rows.len(),
        view = filter.view.as_str(),
        "listed uncategorized transactions"
    );

    Ok(UncategorizedPage {
        data: rows.into_iter().map(TransactionView::from).collect(),
        pagination,
    })
}

/// Counters behind the listing tabs of one account.
#[instrument(skip(pool))]
pub async fn get_account_summary(
    pool: &Pool,
    tenant_id: i64,
    account_id: Option<i64>,
) -> Result<AccountSummary, ListError> {
    let account_id = require_account_id(account_id)?;
    let scope = tenancy::resolve_scope(pool, tenant_id, account_id).await?;
    let counts = db::count_uncategorized_by_view(pool, scope.tenant.id, scope.account.id).await?;
    Ok(AccountSummary {
        account_id: scope.account.id,
        total_uncategorized_transactions: counts.total_uncategorized,
        total_recognized_transactions: counts.total_recognized,
        total_pending_transactions: counts.total_pending,
        total_excluded_transactions: counts.total_excluded,
    })
}
