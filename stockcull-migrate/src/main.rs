//! stockcull-migrate - Replay the flat-file decision store into SQLite
//!
//! One-shot batch process. Exits non-zero only when a precondition fails
//! (missing/unreadable/empty decision file, or the database cannot be
//! reached); per-entry failures are tallied and reported but still exit
//! zero with a warning summary.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};

use stockcull_common::store::DbStore;
use stockcull_common::{config, DecisionStore};
use stockcull_migrate::run_migration;

/// Command-line arguments for stockcull-migrate
#[derive(Parser, Debug)]
#[command(name = "stockcull-migrate")]
#[command(about = "Migrate flat-file decisions into the SQLite backend")]
#[command(version)]
struct Args {
    /// Root folder containing decisions.json and the target database
    #[arg(short, long, default_value = ".", env = "STOCKCULL_ROOT")]
    root_folder: PathBuf,

    /// Connection string for the target database (defaults to
    /// stockcull.db inside the root folder)
    #[arg(long, env = "STOCKCULL_DATABASE_URL")]
    database_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args = Args::parse();
    let source = config::decisions_file(&args.root_folder);
    let url = args
        .database_url
        .clone()
        .unwrap_or_else(|| config::database_url(&args.root_folder));

    info!(
        "Starting stockcull-migrate v{}: {} -> {}",
        env!("CARGO_PKG_VERSION"),
        source.display(),
        url
    );

    let store = DbStore::connect(&url)
        .await
        .context("Failed to connect to target database")?;

    let report = run_migration(&source, &store).await?;

    info!(
        "Migration complete: {} attempted, {} succeeded, {} failed",
        report.attempted, report.succeeded, report.failed
    );
    if report.failed > 0 {
        // Saves are upserts, so a re-run only has to win the failed entries
        warn!("{} entries failed to migrate; re-run to retry", report.failed);
    }

    store.close().await;
    Ok(())
}
