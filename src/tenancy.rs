use crate::db::{self, Pool};
use crate::error::ListError;
use crate::model::{Account, Tenant};
use tracing::instrument;

/// A tenant together with one of its accounts, both known to exist.
#[derive(Debug, Clone)]
pub struct TenantScope {
    pub tenant: Tenant,
    pub account: Account,
}

/// Resolve `tenant_id` and `account_id` into a scope, or report which one is
/// missing. An account owned by another tenant counts as missing.
#[instrument(skip(pool))]
pub async fn resolve_scope(
    pool: &Pool,
    tenant_id: i64,
    account_id: i64,
) -> Result<TenantScope, ListError> {
    let tenant = db::find_tenant(pool, tenant_id)
        .await?
        .ok_or(ListError::NotFound {
            entity: "tenant",
            id: tenant_id,
        })?;
    let account = db::find_account(pool, tenant_id, account_id)
        .await?
        .ok_or(ListError::NotFound {
            entity: "account",
            id: account_id,
        })?;
    Ok(TenantScope { tenant, account })
}
