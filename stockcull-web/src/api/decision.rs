//! Decision recording endpoint

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use stockcull_common::Decision;

use crate::api::ApiError;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct DecisionRequest {
    handle: Option<String>,
    decision: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct DecisionResponse {
    success: bool,
}

/// POST /api/decision
///
/// Upserts the decision for one handle. Validation failures are client
/// errors and mutate nothing.
pub async fn post_decision(
    State(state): State<AppState>,
    Json(req): Json<DecisionRequest>,
) -> Result<Json<DecisionResponse>, ApiError> {
    let handle = match req.handle {
        Some(h) if !h.is_empty() => h,
        _ => return Err(ApiError::BadRequest("Missing handle".to_string())),
    };

    let decision: Decision = req
        .decision
        .as_deref()
        .unwrap_or("")
        .parse()
        .map_err(|e| ApiError::BadRequest(format!("{e}")))?;

    state.store.save(&handle, decision).await.map_err(|e| {
        error!("Failed to save decision for {}: {}", handle, e);
        ApiError::Internal("Failed to save decision".to_string())
    })?;

    info!("Recorded decision {} for {}", decision, handle);
    Ok(Json(DecisionResponse { success: true }))
}
