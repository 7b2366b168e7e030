//! Profiles client configuration.

use edsync_core::error::{Result, SyncError};
use serde::{Deserialize, Serialize};

/// Configuration for the Profiles API client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfilesConfig {
    /// Base URL of the JSON API.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Base URL of the public (non-API) profile pages, used for
    /// search-by-profile-name queries.
    #[serde(default = "default_profile_base_url")]
    pub profile_base_url: String,

    /// Identifier sent as the `source` query parameter on every request.
    #[serde(default = "default_source_tag")]
    pub source_tag: String,

    /// Request timeout in seconds.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_api_base_url() -> String {
    "https://api.profiles.ucsf.edu/json/v2/".to_string()
}

fn default_profile_base_url() -> String {
    "https://profiles.ucsf.edu/".to_string()
}

fn default_source_tag() -> String {
    "edsync".to_string()
}

fn default_request_timeout() -> u64 {
    30
}

impl Default for ProfilesConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            profile_base_url: default_profile_base_url(),
            source_tag: default_source_tag(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

impl ProfilesConfig {
    /// Override the API base URL.
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    /// Override the public profile base URL.
    pub fn with_profile_base_url(mut self, url: impl Into<String>) -> Self {
        self.profile_base_url = url.into();
        self
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.api_base_url.trim().is_empty() {
            return Err(SyncError::invalid_configuration(
                "api_base_url must not be empty",
            ));
        }
        if self.profile_base_url.trim().is_empty() {
            return Err(SyncError::invalid_configuration(
                "profile_base_url must not be empty",
            ));
        }
        if self.source_tag.trim().is_empty() {
            return Err(SyncError::invalid_configuration(
                "source_tag must not be empty",
            ));
        }
        Ok(())
    }
}
