use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;

use bankfeed::config;
use bankfeed::db;
use bankfeed::feed;
use bankfeed::filter::UncategorizedFilter;
use bankfeed::service::{self, ListUncategorizedRequest};

#[derive(Debug, Parser)]
#[command(author, version, about = "Uncategorized bank-feed transactions")]
struct Args {
    /// Path to YAML config file
    #[arg(long, default_value = "config.yaml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Apply database migrations
    Migrate,
    /// Import a JSON bank feed (tenant, accounts, transactions)
    Import {
        #[arg(long)]
        file: PathBuf,
    },
    /// List an account's uncategorized transactions as JSON
    List {
        #[arg(long)]
        tenant: i64,
        #[arg(long)]
        account: Option<i64>,
        #[arg(long)]
        page: Option<i64>,
        #[arg(long)]
        page_size: Option<i64>,
        #[arg(long)]
        min_date: Option<NaiveDate>,
        #[arg(long)]
        max_date: Option<NaiveDate>,
        #[arg(long)]
        match_description: Option<String>,
        #[arg(long, allow_negative_numbers = true)]
        min_amount: Option<f64>,
        #[arg(long, allow_negative_numbers = true)]
        max_amount: Option<f64>,
        /// all, recognized, pending or excluded
        #[arg(long)]
        view: Option<String>,
    },
    /// Per-view transaction counters of an account as JSON
    Summary {
        #[arg(long)]
        tenant: i64,
        #[arg(long)]
        account: Option<i64>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();

    let args = Args::parse();
    let cfg = config::load(Some(&args.config))?;
    cfg.ensure_dirs()?;

    let database_url = cfg.database_url();
    let pool = db::init_pool(&database_url).await?;
    db::run_migrations(&pool).await?;

    match args.command {
        Command::Migrate => {
            info!(database_url = %database_url, "migrations applied");
        }
        Command::Import { file } => {
            let feed = feed::read_feed(&file)?;
            let summary = feed::import_feed(&pool, &feed).await?;
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        Command::List {
            tenant,
            account,
            page,
            page_size,
            min_date,
            max_date,
            match_description,
            min_amount,
            max_amount,
            view,
        } => {
            let request = ListUncategorizedRequest {
                tenant_id: tenant,
                account_id: account,
                filter: UncategorizedFilter {
                    page,
                    page_size,
                    min_date,
                    max_date,
                    match_description,
                    min_amount,
                    max_amount,
                    view,
                },
            };
            let page = service::get_uncategorized_transactions(&pool, &cfg.listing, &request).await?;
            println!("{}", serde_json::to_string_pretty(&page)?);
        }
        Command::Summary { tenant, account } => {
            let summary = service::get_account_summary(&pool, tenant, account).await?;
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
    }

    Ok(())
}
