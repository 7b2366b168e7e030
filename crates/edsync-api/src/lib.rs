//! # Interactive Sync Trigger
//!
//! HTTP surface binding one record to one sync pass:
//!
//! - `POST /records/:id/sync` - run a sync pass for the record, respond
//!   with the human-readable outcome message and a redirect back to the
//!   record page.
//!
//! The route delegates to the same [`edsync_engine::SyncEngine`] entry
//! point the background queue worker uses; the two triggers are
//! semantically equivalent by construction.

pub mod error;
pub mod handlers;
pub mod router;

// Re-exports
pub use error::ApiError;
pub use router::{router, ApiState};
