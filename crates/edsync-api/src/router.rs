//! Sync trigger router configuration.

use axum::{routing::post, Router};
use std::sync::Arc;

use edsync_engine::SyncEngine;

use crate::handlers::sync_record;

/// Application state for the sync trigger routes.
#[derive(Clone)]
pub struct ApiState {
    /// The shared sync engine.
    pub engine: Arc<SyncEngine>,
}

impl ApiState {
    /// Create a new state over the given engine.
    pub fn new(engine: Arc<SyncEngine>) -> Self {
        Self { engine }
    }
}

/// Build the trigger router.
pub fn router(state: ApiState) -> Router {
    Router::new()
        .route("/records/:id/sync", post(sync_record))
        .with_state(state)
}
