//! stockcull-web library - catalog triage HTTP server
//!
//! Exposes the triage API over HTTP: annotated item listing, progress
//! counters, decision recording, and the deletion-list export. Every read
//! endpoint rebuilds the item list from the import files and reloads the
//! decision map, so responses always reflect the current state on disk.

use std::path::PathBuf;
use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use stockcull_common::DecisionStore;

pub mod api;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Decision store handle, selected at startup (file or SQLite)
    pub store: Arc<dyn DecisionStore>,
    /// Catalog import files, in read order
    pub catalog_paths: Arc<Vec<PathBuf>>,
}

impl AppState {
    /// Create new application state
    pub fn new(store: Arc<dyn DecisionStore>, catalog_paths: Vec<PathBuf>) -> Self {
        Self {
            store,
            catalog_paths: Arc::new(catalog_paths),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/items", get(api::items::get_items))
        .route("/api/progress", get(api::items::get_progress))
        .route("/api/decision", post(api::decision::post_decision))
        .route("/api/export", get(api::export::get_export))
        .merge(api::health::health_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
