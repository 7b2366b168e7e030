//! Pre-save extension point.
//!
//! External code can inspect and rewrite the computed field map after
//! redaction and before reconciliation. Hooks run synchronously in
//! registration order as a fold: each receives the previous hook's output.

use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error};

use edsync_core::error::{Result, SyncError};
use edsync_core::FieldValueMap;
use edsync_directory::DirectoryEntry;
use edsync_profiles::ProfileDocument;

use crate::record::Record;

/// Error returned by a failing hook.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct HookError {
    /// Human-readable failure description.
    pub message: String,
}

impl HookError {
    /// Create a new hook error.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Read-only context handed to every hook.
pub struct HookContext<'a> {
    /// The record being synchronized.
    pub record: &'a Record,
    /// The person's primary directory entry.
    pub person: &'a DirectoryEntry,
    /// The campus address sub-entry, when present.
    pub campus_address: Option<&'a DirectoryEntry>,
    /// The private-practice address sub-entry, when present.
    pub practice_address: Option<&'a DirectoryEntry>,
    /// The department entry, when present.
    pub department: Option<&'a DirectoryEntry>,
    /// The profile document, when one was found.
    pub profile: Option<&'a ProfileDocument>,
}

/// A registered field-map transform.
pub trait PreSaveHook: Send + Sync {
    /// Name used in logs and error messages.
    fn name(&self) -> &str;

    /// Transform the field map. Returning an error aborts the sync pass.
    fn alter(
        &self,
        values: FieldValueMap,
        context: &HookContext<'_>,
    ) -> std::result::Result<FieldValueMap, HookError>;
}

/// Ordered registry of pre-save hooks.
#[derive(Default, Clone)]
pub struct HookRegistry {
    hooks: Vec<Arc<dyn PreSaveHook>>,
}

impl HookRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a hook. Hooks run in registration order.
    pub fn register(&mut self, hook: Arc<dyn PreSaveHook>) {
        self.hooks.push(hook);
    }

    /// Number of registered hooks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    /// Check if no hooks are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }

    /// Fold the field map through every hook in order.
    ///
    /// A failing hook is logged and aborts the pass; later hooks do not run
    /// and nothing is written.
    pub fn apply(
        &self,
        values: FieldValueMap,
        context: &HookContext<'_>,
    ) -> Result<FieldValueMap> {
        let mut values = values;
        for hook in &self.hooks {
            debug!(hook = %hook.name(), "Applying pre-save hook");
            values = hook.alter(values, context).map_err(|err| {
                error!(hook = %hook.name(), error = %err, "Pre-save hook failed; aborting sync pass");
                SyncError::hook(hook.name(), err.to_string())
            })?;
        }
        Ok(values)
    }
}
