//! Background queue worker.
//!
//! Processes record ids from a queue and runs the same sync pass the
//! interactive trigger runs. A failing item is logged and never takes the
//! loop down.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, error, info, instrument};

use edsync_core::RecordId;

use crate::sync::SyncEngine;

/// Queue worker driving background synchronization.
pub struct SyncQueueWorker {
    engine: Arc<SyncEngine>,
    shutdown: Arc<AtomicBool>,
}

impl SyncQueueWorker {
    /// Create a new worker over the given engine.
    pub fn new(engine: Arc<SyncEngine>) -> Self {
        Self {
            engine,
            shutdown: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Handle that requests a graceful stop after the current item.
    #[must_use]
    pub fn shutdown_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.shutdown)
    }

    /// Consume the queue until it closes or shutdown is requested.
    #[instrument(skip_all)]
    pub async fn run(&self, mut queue: mpsc::Receiver<RecordId>) {
        info!("Starting sync queue worker");

        while let Some(record_id) = queue.recv().await {
            if self.shutdown.load(Ordering::Relaxed) {
                debug!("Shutdown requested, draining stopped");
                break;
            }
            self.process_item(record_id).await;
        }

        info!("Sync queue worker stopped");
    }

    /// Process one queued record id.
    #[instrument(skip(self))]
    pub async fn process_item(&self, record_id: RecordId) {
        match self.engine.sync_by_id(record_id).await {
            Ok(outcome) => {
                debug!(record_id = %record_id, outcome = ?outcome, "Processed sync queue item");
            }
            Err(err) => {
                error!(record_id = %record_id, error = %err, "Sync queue item failed");
            }
        }
    }
}
