//! Item listing and progress endpoints

use axum::extract::State;
use axum::Json;
use tracing::error;

use stockcull_common::catalog::{self, Item};
use stockcull_common::reconcile::{self, AnnotatedItem, Progress};
use stockcull_common::DecisionMap;

use crate::api::ApiError;
use crate::AppState;

/// Rebuild the item list and reload the decision map.
///
/// Both sides are re-derived on every request; there is no cached or
/// persisted merged view.
pub(crate) async fn load_view_data(
    state: &AppState,
) -> Result<(Vec<Item>, DecisionMap), ApiError> {
    let items = catalog::load_items(&state.catalog_paths).map_err(|e| {
        error!("Failed to load catalog: {}", e);
        ApiError::Internal("Failed to load items".to_string())
    })?;

    let decisions = state.store.load_all().await.map_err(|e| {
        error!("Failed to load decisions: {}", e);
        ApiError::Internal("Failed to load decisions".to_string())
    })?;

    Ok((items, decisions))
}

/// GET /api/items
///
/// Every catalog item in catalog order, each with its current decision
/// (`null` when the operator has not decided yet).
pub async fn get_items(
    State(state): State<AppState>,
) -> Result<Json<Vec<AnnotatedItem>>, ApiError> {
    let (items, decisions) = load_view_data(&state).await?;
    Ok(Json(reconcile::annotate(items, &decisions)))
}

/// GET /api/progress
pub async fn get_progress(State(state): State<AppState>) -> Result<Json<Progress>, ApiError> {
    let (items, decisions) = load_view_data(&state).await?;
    Ok(Json(reconcile::progress(&items, &decisions)))
}
