//! Deployment settings for the synchronization engine.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::error::{Result, SyncError};

/// Settings shared by every sync pass in a deployment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncSettings {
    /// Machine name of the directory server used for EDS searches.
    pub directory_server: String,

    /// Release codes permitted for disclosure. A field whose release code is
    /// outside this set is redacted before persistence.
    pub allowed_release_codes: BTreeSet<u32>,

    /// Minimum interval between scheduled re-syncs of the same record, in
    /// seconds. Enforced by the surrounding scheduler, not by the engine.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_resync_interval_secs: Option<u64>,
}

impl SyncSettings {
    /// Create settings with required values.
    pub fn new(
        directory_server: impl Into<String>,
        allowed_release_codes: impl IntoIterator<Item = u32>,
    ) -> Self {
        Self {
            directory_server: directory_server.into(),
            allowed_release_codes: allowed_release_codes.into_iter().collect(),
            min_resync_interval_secs: None,
        }
    }

    /// Set the minimum re-sync interval.
    #[must_use]
    pub fn with_min_resync_interval(mut self, secs: u64) -> Self {
        self.min_resync_interval_secs = Some(secs);
        self
    }

    /// Validate the settings.
    pub fn validate(&self) -> Result<()> {
        if self.directory_server.trim().is_empty() {
            return Err(SyncError::invalid_configuration(
                "directory_server must not be empty",
            ));
        }
        if self.allowed_release_codes.is_empty() {
            return Err(SyncError::invalid_configuration(
                "allowed_release_codes must contain at least one code",
            ));
        }
        Ok(())
    }
}
