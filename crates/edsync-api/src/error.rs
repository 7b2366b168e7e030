//! Error types for the sync trigger API.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use edsync_core::SyncError;

/// Error response payload.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Error classification code.
    pub code: &'static str,
    /// Human-readable error message.
    pub message: String,
}

/// Error type for the sync trigger API.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The sync pass failed.
    #[error(transparent)]
    Sync(#[from] SyncError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Sync(err) => {
                tracing::error!(error = %err, "Sync trigger failed");
                let body = ErrorBody {
                    code: err.error_code(),
                    message: err.to_string(),
                };
                (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
            }
        }
    }
}
