//! # Synchronization Engine
//!
//! Field mapping, redaction, and idempotent reconciliation for person
//! profile records and their publications.
//!
//! One sync pass for one record runs:
//!
//! ```text
//! ┌────────────┐   ┌───────────────────┐   ┌──────────┐   ┌───────────┐
//! │ Directory  │──►│ Field Mapper      │──►│ Redaction│──►│ Hook fold │
//! │ + Profiles │   │ (3 fixed tables)  │   │ filter   │   │           │
//! └────────────┘   └───────────────────┘   └──────────┘   └─────┬─────┘
//!                                                               │
//!                       ┌───────────────────────────────────────┘
//!                       ▼
//!                ┌───────────────┐   writes only when a value differs
//!                │ Reconciliation│──► primary record + publication records
//!                └───────────────┘
//! ```
//!
//! All intermediate structures are pass-local; there is no cross-pass state.

pub mod hooks;
pub mod mapper;
pub mod memory;
pub mod reconcile;
pub mod record;
pub mod redact;
pub mod store;
pub mod sync;
pub mod tables;
pub mod worker;

// Re-exports
pub use hooks::{HookContext, HookError, HookRegistry, PreSaveHook};
pub use mapper::MappingSources;
pub use memory::MemoryRecordStore;
pub use record::Record;
pub use store::RecordStore;
pub use sync::{SyncEngine, SyncOutcome};
pub use worker::SyncQueueWorker;
