//! Request handlers for the sync trigger API.

use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;
use tracing::info;

use edsync_core::RecordId;

use crate::error::ApiError;
use crate::router::ApiState;

/// Response of a triggered sync pass.
#[derive(Debug, Serialize)]
pub struct SyncResponse {
    /// Human-readable outcome message.
    pub message: String,
    /// Location of the record the caller should return to.
    pub redirect: String,
}

/// Run a sync pass for one record.
pub async fn sync_record(
    State(state): State<ApiState>,
    Path(id): Path<RecordId>,
) -> Result<Json<SyncResponse>, ApiError> {
    let outcome = state.engine.sync_by_id(id).await?;

    info!(record_id = %id, outcome = ?outcome, "Interactive sync triggered");

    Ok(Json(SyncResponse {
        message: outcome.user_message().to_string(),
        redirect: format!("/records/{id}"),
    }))
}
