//! Catalog triage server (stockcull-web) - Main entry point
//!
//! Serves the triage REST API over a root folder containing the product
//! import CSVs and the decision store.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use stockcull_common::store::{DbStore, FileStore};
use stockcull_common::{config, DecisionStore};
use stockcull_web::{build_router, AppState};

/// Storage backend for decisions
#[derive(Debug, Clone, Copy, ValueEnum)]
enum Backend {
    /// Flat JSON file, rewritten in full on every save
    File,
    /// SQLite database with atomic upsert-by-handle
    Sqlite,
}

/// Command-line arguments for stockcull-web
#[derive(Parser, Debug)]
#[command(name = "stockcull-web")]
#[command(about = "Catalog triage server for stockcull")]
#[command(version)]
struct Args {
    /// Port to listen on
    #[arg(short, long, default_value = "3000", env = "STOCKCULL_PORT")]
    port: u16,

    /// Root folder containing the import CSVs and decision store
    #[arg(short, long, default_value = ".", env = "STOCKCULL_ROOT")]
    root_folder: PathBuf,

    /// Decision storage backend
    #[arg(long, value_enum, default_value = "file", env = "STOCKCULL_BACKEND")]
    backend: Backend,

    /// Connection string for the sqlite backend (defaults to
    /// stockcull.db inside the root folder)
    #[arg(long, env = "STOCKCULL_DATABASE_URL")]
    database_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "stockcull_web=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    info!(
        "Starting stockcull-web v{} on port {}",
        env!("CARGO_PKG_VERSION"),
        args.port
    );
    info!("Root folder: {}", args.root_folder.display());

    let catalog_paths = config::catalog_paths(&args.root_folder);
    for path in &catalog_paths {
        if !path.exists() {
            // Item reads will fail until the file appears; say so up front
            warn!("Catalog file not found: {}", path.display());
        }
    }

    // Build the decision store once; every request reuses this handle
    let store: Arc<dyn DecisionStore> = match args.backend {
        Backend::File => {
            let path = config::decisions_file(&args.root_folder);
            info!("Decision store: flat file {}", path.display());
            Arc::new(FileStore::new(path))
        }
        Backend::Sqlite => {
            let url = args
                .database_url
                .clone()
                .unwrap_or_else(|| config::database_url(&args.root_folder));
            info!("Decision store: sqlite {}", url);
            Arc::new(
                DbStore::connect(&url)
                    .await
                    .context("Failed to connect to decision database")?,
            )
        }
    };

    let state = AppState::new(store.clone(), catalog_paths);
    let app = build_router(state);

    let addr = SocketAddr::from(([127, 0, 0, 1], args.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;
    info!("stockcull-web listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    // Release the store connection before exiting
    store.close().await;
    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
