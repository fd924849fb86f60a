use super::model::{
    NewAccount, NewMatchedTransaction, NewRecognizedTransaction, NewUncategorizedTransaction,
    SummaryCounts, UncategorizedRow,
};
use crate::filter::{Predicate, ValidatedFilter};
use crate::model::{Account, MatchedTransaction, RecognizedTransaction, Tenant, UncategorizedView};
use anyhow::{Context, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqliteSynchronous};
use sqlx::{QueryBuilder, Sqlite, SqliteConnection, SqlitePool};
use std::str::FromStr;
use tracing::{debug, instrument};

pub type Pool = SqlitePool;

pub async fn init_pool(database_url: &str) -> Result<Pool> {
    ensure_sqlite_parent_dir(database_url);
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .synchronous(SqliteSynchronous::Full)
        .foreign_keys(true);
    let pool = SqlitePool::connect_with(options).await?;
    Ok(pool)
}

/// For file-backed SQLite URLs, make sure the parent directory exists.
/// In-memory URLs and other schemes are left alone.
fn ensure_sqlite_parent_dir(url: &str) {
    let Some(rest) = url.strip_prefix("sqlite:") else {
        return;
    };
    if rest.starts_with(":memory") {
        return;
    }
    let rest = rest.strip_prefix("//").unwrap_or(rest);
    let path = rest.split_once('?').map(|(p, _)| p).unwrap_or(rest);
    if path.is_empty() {
        return;
    }
    if let Some(parent) = std::path::Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            let _ = std::fs::create_dir_all(parent);
        }
    }
}

pub async fn run_migrations(pool: &Pool) -> Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Tenancy lookups
// ---------------------------------------------------------------------------

pub async fn find_tenant(pool: &Pool, tenant_id: i64) -> Result<Option<Tenant>, sqlx::Error> {
    sqlx::query_as::<_, Tenant>("SELECT id, name FROM tenants WHERE id = ?")
        .bind(tenant_id)
        .fetch_optional(pool)
        .await
}

/// Account lookup scoped to its tenant: another tenant's account is `None`.
pub async fn find_account(
    pool: &Pool,
    tenant_id: i64,
    account_id: i64,
) -> Result<Option<Account>, sqlx::Error> {
    sqlx::query_as::<_, Account>(
        "SELECT id, tenant_id, name, code, account_type, currency_code \
         FROM accounts WHERE id = ? AND tenant_id = ?",
    )
    .bind(account_id)
    .bind(tenant_id)
    .fetch_optional(pool)
    .await
}

// ---------------------------------------------------------------------------
// Uncategorized listing
// ---------------------------------------------------------------------------

const SELECT_UNCATEGORIZED: &str = "SELECT t.id AS id, t.tenant_id AS tenant_id, \
        t.account_id AS account_id, date(t.date) AS date, t.amount AS amount, \
        t.currency_code AS currency_code, t.categorized AS categorized, \
        t.reference_no AS reference_no, t.payee AS payee, t.description AS description, \
        t.plaid_transaction_id AS plaid_transaction_id, \
        t.recognized_transaction_id AS recognized_transaction_id, \
        t.excluded_at AS excluded_at, t.pending AS pending, \
        a.name AS account_name, a.code AS account_code, \
        r.assigned_account_id AS recognized_assigned_account_id, \
        ra.name AS recognized_assigned_account_name, \
        r.assigned_category AS recognized_assigned_category, \
        r.assigned_payee AS recognized_assigned_payee, \
        r.assigned_memo AS recognized_assigned_memo \
     FROM uncategorized_cashflow_transactions t \
     JOIN accounts a ON a.id = t.account_id AND a.tenant_id = t.tenant_id \
     LEFT JOIN recognized_bank_transactions r \
        ON r.id = t.recognized_transaction_id AND r.tenant_id = t.tenant_id \
     LEFT JOIN accounts ra ON ra.id = r.assigned_account_id AND ra.tenant_id = t.tenant_id";

const COUNT_UNCATEGORIZED: &str =
    "SELECT COUNT(*) FROM uncategorized_cashflow_transactions t";

/// SQL condition selecting one listing view, over alias `t`.
fn view_condition(view: UncategorizedView) -> &'static str {
    match view {
        UncategorizedView::All => "t.excluded_at IS NULL AND t.pending = 0",
        UncategorizedView::Recognized => {
            "t.excluded_at IS NULL AND t.pending = 0 AND t.recognized_transaction_id IS NOT NULL"
        }
        UncategorizedView::Pending => "t.excluded_at IS NULL AND t.pending = 1",
        UncategorizedView::Excluded => "t.excluded_at IS NOT NULL",
    }
}

/// Tenant, account, not categorized, and no matched row.
fn push_base_conditions(qb: &mut QueryBuilder<'_, Sqlite>, tenant_id: i64, account_id: i64) {
    qb.push(" WHERE t.tenant_id = ")
        .push_bind(tenant_id)
        .push(" AND t.account_id = ")
        .push_bind(account_id)
        .push(" AND t.categorized = 0")
        .push(
            " AND NOT EXISTS (SELECT 1 FROM matched_bank_transactions m \
              WHERE m.uncategorized_transaction_id = t.id AND m.tenant_id = t.tenant_id)",
        );
}

fn push_predicate(qb: &mut QueryBuilder<'_, Sqlite>, predicate: &Predicate) {
    match predicate {
        Predicate::FromDate(day) => {
            qb.push(" AND t.date >= ").push_bind(*day);
        }
        // Half-open upper bound: a stored `YYYY-MM-DD HH:MM:SS` sorts after
        // `YYYY-MM-DD`, so it stays inside `day`. The select list truncates
        // it back to a plain date.
        Predicate::ToDate(day) => {
            if let Some(next) = day.succ_opt() {
                qb.push(" AND t.date < ").push_bind(next);
            }
        }
        Predicate::MinAmount(v) => {
            qb.push(" AND t.amount >= ").push_bind(*v);
        }
        Predicate::MaxAmount(v) => {
            qb.push(" AND t.amount <= ").push_bind(*v);
        }
        // instr() is case-sensitive, unlike SQLite's LIKE. lower() folds
        // ASCII only.
        Predicate::DescriptionContains { needle, ignore_case } => {
            if *ignore_case {
                qb.push(" AND instr(lower(t.description), lower(")
                    .push_bind(needle.clone())
                    .push(")) > 0");
            } else {
                qb.push(" AND instr(t.description, ")
                    .push_bind(needle.clone())
                    .push(") > 0");
            }
        }
    }
}

fn push_filter(
    qb: &mut QueryBuilder<'_, Sqlite>,
    tenant_id: i64,
    account_id: i64,
    filter: &ValidatedFilter,
) {
    push_base_conditions(qb, tenant_id, account_id);
    qb.push(" AND ").push(view_condition(filter.view));
    for p in &filter.predicates {
        push_predicate(qb, p);
    }
}

/// Number of rows matching `filter`, ignoring the page window.
#[instrument(skip(pool, filter))]
pub async fn count_uncategorized(
    pool: &Pool,
    tenant_id: i64,
    account_id: i64,
    filter: &ValidatedFilter,
) -> Result<i64, sqlx::Error> {
    let mut qb = QueryBuilder::<Sqlite>::new(COUNT_UNCATEGORIZED);
    push_filter(&mut qb, tenant_id, account_id, filter);
    let total = qb.build_query_scalar::<i64>().fetch_one(pool).await?;
    Ok(total)
}

/// One page of rows matching `filter`, newest first, with the owning account
/// and the recognized transaction's assigned account joined in.
#[instrument(skip(pool, filter))]
pub async fn fetch_uncategorized_page(
    pool: &Pool,
    tenant_id: i64,
    account_id: i64,
    filter: &ValidatedFilter,
) -> Result<Vec<UncategorizedRow>, sqlx::Error> {
    let mut qb = QueryBuilder::<Sqlite>::new(SELECT_UNCATEGORIZED);
    push_filter(&mut qb, tenant_id, account_id, filter);
    qb.push(" ORDER BY t.date DESC, t.id DESC LIMIT ")
        .push_bind(filter.page.limit())
        .push(" OFFSET ")
        .push_bind(filter.page.offset());
    let rows = qb.build_query_as::<UncategorizedRow>().fetch_all(pool).await?;
    debug!(rows = rows.len(), "fetched uncategorized page");
    Ok(rows)
}

/// Counters for every listing view of one account in a single scan.
#[instrument(skip(pool))]
pub async fn count_uncategorized_by_view(
    pool: &Pool,
    tenant_id: i64,
    account_id: i64,
) -> Result<SummaryCounts, sqlx::Error> {
    let select = format!(
        "SELECT \
            COALESCE(SUM(CASE WHEN {all} THEN 1 ELSE 0 END), 0) AS total_uncategorized, \
            COALESCE(SUM(CASE WHEN {recognized} THEN 1 ELSE 0 END), 0) AS total_recognized, \
            COALESCE(SUM(CASE WHEN {pending} THEN 1 ELSE 0 END), 0) AS total_pending, \
            COALESCE(SUM(CASE WHEN {excluded} THEN 1 ELSE 0 END), 0) AS total_excluded \
         FROM uncategorized_cashflow_transactions t",
        all = view_condition(UncategorizedView::All),
        recognized = view_condition(UncategorizedView::Recognized),
        pending = view_condition(UncategorizedView::Pending),
        excluded = view_condition(UncategorizedView::Excluded),
    );
    let mut qb = QueryBuilder::<Sqlite>::new(select);
    push_base_conditions(&mut qb, tenant_id, account_id);
    let counts = qb.build_query_as::<SummaryCounts>().fetch_one(pool).await?;
    Ok(counts)
}

// ---------------------------------------------------------------------------
// Writes used by feed import and fixtures
// ---------------------------------------------------------------------------

#[instrument(skip_all)]
pub async fn insert_tenant(pool: &Pool, name: &str) -> Result<i64> {
    let mut conn = pool.acquire().await?;
    insert_tenant_tx(&mut *conn, name).await
}

pub(crate) async fn insert_tenant_tx(conn: &mut SqliteConnection, name: &str) -> Result<i64> {
    let id: i64 = sqlx::query_scalar("INSERT INTO tenants (name) VALUES (?) RETURNING id")
        .bind(name)
        .fetch_one(&mut *conn)
        .await
        .context("failed to insert tenant")?;
    Ok(id)
}

#[instrument(skip_all)]
pub async fn insert_account(pool: &Pool, tenant_id: i64, account: &NewAccount) -> Result<i64> {
    let mut conn = pool.acquire().await?;
    insert_account_tx(&mut *conn, tenant_id, account).await
}

pub(crate) async fn insert_account_tx(
    conn: &mut SqliteConnection,
    tenant_id: i64,
    account: &NewAccount,
) -> Result<i64> {
    let id: i64 = sqlx::query_scalar(
        "INSERT INTO accounts (tenant_id, name, code, account_type, currency_code) \
         VALUES (?, ?, ?, ?, ?) RETURNING id",
    )
    .bind(tenant_id)
    .bind(&account.name)
    .bind(&account.code)
    .bind(&account.account_type)
    .bind(&account.currency_code)
    .fetch_one(&mut *conn)
    .await
    .with_context(|| format!("failed to insert account {}", account.name))?;
    Ok(id)
}

#[instrument(skip_all)]
pub async fn insert_uncategorized_transaction(
    pool: &Pool,
    tenant_id: i64,
    account_id: i64,
    txn: &NewUncategorizedTransaction,
) -> Result<i64> {
    let mut conn = pool.acquire().await?;
    insert_uncategorized_transaction_tx(&mut *conn, tenant_id, account_id, txn).await
}

pub(crate) async fn insert_uncategorized_transaction_tx(
    conn: &mut SqliteConnection,
    tenant_id: i64,
    account_id: i64,
    txn: &NewUncategorizedTransaction,
) -> Result<i64> {
    let id: i64 = sqlx::query_scalar(
        "INSERT INTO uncategorized_cashflow_transactions \
            (tenant_id, account_id, date, amount, currency_code, categorized, reference_no, \
             payee, description, plaid_transaction_id, excluded_at, pending) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?) RETURNING id",
    )
    .bind(tenant_id)
    .bind(account_id)
    .bind(txn.date)
    .bind(txn.amount)
    .bind(&txn.currency_code)
    .bind(txn.categorized)
    .bind(&txn.reference_no)
    .bind(&txn.payee)
    .bind(&txn.description)
    .bind(&txn.plaid_transaction_id)
    .bind(txn.excluded_at)
    .bind(txn.pending)
    .fetch_one(&mut *conn)
    .await
    .context("failed to insert uncategorized transaction")?;
    Ok(id)
}

/// Store a recognition proposal and link it from the uncategorized row.
#[instrument(skip_all)]
pub async fn insert_recognized_transaction(
    pool: &Pool,
    tenant_id: i64,
    uncategorized_transaction_id: i64,
    recognized: &NewRecognizedTransaction,
) -> Result<RecognizedTransaction> {
    let mut tx = pool.begin().await?;
    let rec =
        insert_recognized_transaction_tx(&mut *tx, tenant_id, uncategorized_transaction_id, recognized)
            .await?;
    tx.commit().await?;
    Ok(rec)
}

pub(crate) async fn insert_recognized_transaction_tx(
    conn: &mut SqliteConnection,
    tenant_id: i64,
    uncategorized_transaction_id: i64,
    recognized: &NewRecognizedTransaction,
) -> Result<RecognizedTransaction> {
    let rec = sqlx::query_as::<_, RecognizedTransaction>(
        "INSERT INTO recognized_bank_transactions \
            (tenant_id, uncategorized_transaction_id, bank_rule_id, assigned_account_id, \
             assigned_category, assigned_payee, assigned_memo) \
         VALUES (?, ?, ?, ?, ?, ?, ?) \
         RETURNING id, tenant_id, uncategorized_transaction_id, bank_rule_id, \
                   assigned_account_id, assigned_category, assigned_payee, assigned_memo",
    )
    .bind(tenant_id)
    .bind(uncategorized_transaction_id)
    .bind(recognized.bank_rule_id)
    .bind(recognized.assigned_account_id)
    .bind(&recognized.assigned_category)
    .bind(&recognized.assigned_payee)
    .bind(&recognized.assigned_memo)
    .fetch_one(&mut *conn)
    .await
    .with_context(|| {
        format!("failed to recognize uncategorized transaction {uncategorized_transaction_id}")
    })?;

    let updated = sqlx::query(
        "UPDATE uncategorized_cashflow_transactions \
         SET recognized_transaction_id = ?, updated_at = CURRENT_TIMESTAMP \
         WHERE id = ? AND tenant_id = ?",
    )
    .bind(rec.id)
    .bind(uncategorized_transaction_id)
    .bind(tenant_id)
    .execute(&mut *conn)
    .await?;
    if updated.rows_affected() == 0 {
        anyhow::bail!(
            "uncategorized transaction {} not found for tenant {}",
            uncategorized_transaction_id,
            tenant_id
        );
    }
    Ok(rec)
}

#[instrument(skip_all)]
pub async fn insert_matched_transaction(
    pool: &Pool,
    tenant_id: i64,
    uncategorized_transaction_id: i64,
    matched: &NewMatchedTransaction,
) -> Result<MatchedTransaction> {
    let mut conn = pool.acquire().await?;
    insert_matched_transaction_tx(&mut *conn, tenant_id, uncategorized_transaction_id, matched).await
}

pub(crate) async fn insert_matched_transaction_tx(
    conn: &mut SqliteConnection,
    tenant_id: i64,
    uncategorized_transaction_id: i64,
    matched: &NewMatchedTransaction,
) -> Result<MatchedTransaction> {
    let rec = sqlx::query_as::<_, MatchedTransaction>(
        "INSERT INTO matched_bank_transactions \
            (tenant_id, uncategorized_transaction_id, reference_type, reference_id, amount) \
         VALUES (?, ?, ?, ?, ?) \
         RETURNING id, tenant_id, uncategorized_transaction_id, reference_type, reference_id, amount",
    )
    .bind(tenant_id)
    .bind(uncategorized_transaction_id)
    .bind(&matched.reference_type)
    .bind(matched.reference_id)
    .bind(matched.amount)
    .fetch_one(&mut *conn)
    .await
    .context("failed to insert matched transaction")?;
    Ok(rec)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Listing;
    use crate::filter::UncategorizedFilter;
    use chrono::NaiveDate;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn setup_pool() -> Pool {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        sqlx::migrate!("./migrations").run(&pool).await.unwrap();
        pool
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    fn validated(filter: UncategorizedFilter) -> ValidatedFilter {
        filter.validate(&Listing::default()).unwrap()
    }

    #[test]
    fn parent_dir_helper_ignores_memory_urls() {
        // Must not panic or create anything for in-memory databases.
        ensure_sqlite_parent_dir("sqlite::memory:");
        ensure_sqlite_parent_dir("postgres://localhost/db");
    }

    #[tokio::test]
    async fn test_listing_joins_accounts_and_recognition() {
        let pool = setup_pool().await;
        let tenant = insert_tenant(&pool, "Acme").await.unwrap();
        let bank = insert_account(
            &pool,
            tenant,
            &NewAccount {
                name: "Checking".into(),
                code: Some("1010".into()),
                account_type: "bank".into(),
                currency_code: "USD".into(),
            },
        )
        .await
        .unwrap();
        let expense = insert_account(
            &pool,
            tenant,
            &NewAccount {
                name: "Office Supplies".into(),
                code: None,
                account_type: "expense".into(),
                currency_code: "USD".into(),
            },
        )
        .await
        .unwrap();

        let tid = insert_uncategorized_transaction(
            &pool,
            tenant,
            bank,
            &NewUncategorizedTransaction::new(day(3), -19.99, "STAPLES #12"),
        )
        .await
        .unwrap();
        let rec = insert_recognized_transaction(
            &pool,
            tenant,
            tid,
            &NewRecognizedTransaction {
                assigned_account_id: Some(expense),
                assigned_category: Some("expense".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(rec.uncategorized_transaction_id, tid);

        let filter = validated(UncategorizedFilter::default());
        let rows = fetch_uncategorized_page(&pool, tenant, bank, &filter)
            .await
            .unwrap();
        assert_eq!(rows.len(), 1);
        let row = &rows[0];
        assert_eq!(row.transaction.id, tid);
        assert_eq!(row.transaction.recognized_transaction_id, Some(rec.id));
        assert_eq!(row.account_name, "Checking");
        assert_eq!(row.account_code.as_deref(), Some("1010"));
        assert_eq!(row.recognized_assigned_account_id, Some(expense));
        assert_eq!(
            row.recognized_assigned_account_name.as_deref(),
            Some("Office Supplies")
        );
        assert_eq!(count_uncategorized(&pool, tenant, bank, &filter).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_summary_counts_each_view() {
        let pool = setup_pool().await;
        let tenant = insert_tenant(&pool, "Acme").await.unwrap();
        let bank = insert_account(
            &pool,
            tenant,
            &NewAccount {
                name: "Checking".into(),
                code: None,
                account_type: "bank".into(),
                currency_code: "USD".into(),
            },
        )
        .await
        .unwrap();

        let plain = NewUncategorizedTransaction::new(day(1), 10.0, "plain");
        insert_uncategorized_transaction(&pool, tenant, bank, &plain)
            .await
            .unwrap();

        let recognized_id = insert_uncategorized_transaction(
            &pool,
            tenant,
            bank,
            &NewUncategorizedTransaction::new(day(2), 11.0, "recognized"),
        )
        .await
        .unwrap();
        insert_recognized_transaction(
            &pool,
            tenant,
            recognized_id,
            &NewRecognizedTransaction::default(),
        )
        .await
        .unwrap();

        let mut pending = NewUncategorizedTransaction::new(day(3), 12.0, "pending");
        pending.pending = true;
        insert_uncategorized_transaction(&pool, tenant, bank, &pending)
            .await
            .unwrap();

        let mut excluded = NewUncategorizedTransaction::new(day(4), 13.0, "excluded");
        excluded.excluded_at = Some(chrono::Utc::now());
        insert_uncategorized_transaction(&pool, tenant, bank, &excluded)
            .await
            .unwrap();

        let matched_id = insert_uncategorized_transaction(
            &pool,
            tenant,
            bank,
            &NewUncategorizedTransaction::new(day(5), 14.0, "matched"),
        )
        .await
        .unwrap();
        insert_matched_transaction(
            &pool,
            tenant,
            matched_id,
            &NewMatchedTransaction {
                reference_type: "SaleInvoice".into(),
                reference_id: 77,
                amount: Some(14.0),
            },
        )
        .await
        .unwrap();

        let mut categorized = NewUncategorizedTransaction::new(day(6), 15.0, "categorized");
        categorized.categorized = true;
        insert_uncategorized_transaction(&pool, tenant, bank, &categorized)
            .await
            .unwrap();

        let counts = count_uncategorized_by_view(&pool, tenant, bank).await.unwrap();
        assert_eq!(
            counts,
            SummaryCounts {
                total_uncategorized: 2,
                total_recognized: 1,
                total_pending: 1,
                total_excluded: 1,
            }
        );
    }

    #[tokio::test]
    async fn test_find_account_is_tenant_scoped() {
        let pool = setup_pool().await;
        let acme = insert_tenant(&pool, "Acme").await.unwrap();
        let globex = insert_tenant(&pool, "Globex").await.unwrap();
        let acct = insert_account(
            &pool,
            acme,
            &NewAccount {
                name: "Checking".into(),
                code: None,
                account_type: "bank".into(),
                currency_code: "USD".into(),
            },
        )
        .await
        .unwrap();

        assert!(find_account(&pool, acme, acct).await.unwrap().is_some());
        assert!(find_account(&pool, globex, acct).await.unwrap().is_none());
        assert!(find_tenant(&pool, 999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_recognizing_unknown_transaction_fails() {
        let pool = setup_pool().await;
        let tenant = insert_tenant(&pool, "Acme").await.unwrap();
        let err = insert_recognized_transaction(
            &pool,
            tenant,
            4242,
            &NewRecognizedTransaction::default(),
        )
        .await
        .unwrap_err();
        assert!(err.to_string().contains("4242"));
        let cnt: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM recognized_bank_transactions")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(cnt, 0);
    }

    #[tokio::test]
    async fn test_recognition_requires_existing_transaction_row() {
        let pool = setup_pool().await;
        let tenant = insert_tenant(&pool, "Acme").await.unwrap();
        let res = sqlx::query(
            "INSERT INTO recognized_bank_transactions (tenant_id, uncategorized_transaction_id) \
             VALUES (?, 4242)",
        )
        .bind(tenant)
        .execute(&pool)
        .await;
        assert!(res.is_err());
    }

    #[tokio::test]
    async fn test_stored_time_of_day_is_listed_as_its_date() {
        let pool = setup_pool().await;
        let tenant = insert_tenant(&pool, "Acme").await.unwrap();
        let bank = insert_account(
            &pool,
            tenant,
            &NewAccount {
                name: "Checking".into(),
                code: None,
                account_type: "bank".into(),
                currency_code: "USD".into(),
            },
        )
        .await
        .unwrap();
        sqlx::query(
            "INSERT INTO uncategorized_cashflow_transactions \
                (tenant_id, account_id, date, amount, description) \
             VALUES (?, ?, '2024-01-20 10:00:00', -12.5, 'LATE LUNCH')",
        )
        .bind(tenant)
        .bind(bank)
        .execute(&pool)
        .await
        .unwrap();

        let filter = validated(UncategorizedFilter {
            min_date: Some(day(20)),
            max_date: Some(day(20)),
            ..Default::default()
        });
        let rows = fetch_uncategorized_page(&pool, tenant, bank, &filter)
            .await
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].transaction.date, day(20));
        assert_eq!(count_uncategorized(&pool, tenant, bank, &filter).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_case_insensitive_description_folds_ascii_only() {
        let pool = setup_pool().await;
        let tenant = insert_tenant(&pool, "Acme").await.unwrap();
        let bank = insert_account(
            &pool,
            tenant,
            &NewAccount {
                name: "Checking".into(),
                code: None,
                account_type: "bank".into(),
                currency_code: "USD".into(),
            },
        )
        .await
        .unwrap();
        insert_uncategorized_transaction(
            &pool,
            tenant,
            bank,
            &NewUncategorizedTransaction::new(day(4), -4.2, "CAFÉ NOIR"),
        )
        .await
        .unwrap();

        let listing = Listing {
            case_insensitive_description: true,
            ..Listing::default()
        };
        let search = |needle: &str| UncategorizedFilter {
            match_description: Some(needle.into()),
            ..Default::default()
        };
        let ascii = search("noir").validate(&listing).unwrap();
        assert_eq!(count_uncategorized(&pool, tenant, bank, &ascii).await.unwrap(), 1);
        let accented = search("café").validate(&listing).unwrap();
        assert_eq!(count_uncategorized(&pool, tenant, bank, &accented).await.unwrap(), 0);
    }
}
