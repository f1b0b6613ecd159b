//! Deletion-list export endpoint

use axum::extract::State;
use axum::http::header;
use axum::response::{IntoResponse, Response};

use stockcull_common::reconcile;

use crate::api::items::load_view_data;
use crate::api::ApiError;
use crate::AppState;

/// GET /api/export
///
/// The current deletion list as a CSV attachment.
pub async fn get_export(State(state): State<AppState>) -> Result<Response, ApiError> {
    let (items, decisions) = load_view_data(&state).await?;
    let body = reconcile::export_deletions(&items, &decisions);

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=items-to-delete.csv",
            ),
        ],
        body,
    )
        .into_response())
}
