//! Profiles client trait and HTTP implementation.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, error};

use edsync_core::error::{Result, SyncError};
use edsync_core::Lookup;

use crate::config::ProfilesConfig;
use crate::document::ProfileDocument;

/// Queries against the Profiles public JSON API.
#[async_trait]
pub trait ProfilesClient: Send + Sync {
    /// Run a search with the given query parameters and return the first
    /// matching profile document.
    async fn search(&self, query: &[(String, String)]) -> Lookup<ProfileDocument>;

    /// Search by institutional identifier.
    async fn search_by_identifier(&self, ucid: &str) -> Lookup<ProfileDocument> {
        self.search(&[("EmployeeID".to_string(), ucid.to_string())])
            .await
    }

    /// Search by public profile name (e.g. `"marie.curie"`).
    async fn search_by_profile_name(&self, name: &str) -> Lookup<ProfileDocument>;
}

/// HTTP-backed Profiles client.
pub struct HttpProfilesClient {
    config: ProfilesConfig,
    client: Client,
}

impl HttpProfilesClient {
    /// Create a new client with the given configuration.
    pub fn new(config: ProfilesConfig) -> Result<Self> {
        config.validate()?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| {
                SyncError::invalid_configuration(format!("failed to build HTTP client: {e}"))
            })?;

        Ok(Self { config, client })
    }
}

#[async_trait]
impl ProfilesClient for HttpProfilesClient {
    /// Uses the recommended search by full profile URL rather than the
    /// profile-name query parameter.
    async fn search_by_profile_name(&self, name: &str) -> Lookup<ProfileDocument> {
        let url = format!("{}{}", self.config.profile_base_url, name);
        self.search(&[("URL".to_string(), url)]).await
    }

    async fn search(&self, query: &[(String, String)]) -> Lookup<ProfileDocument> {
        // Canonical parameters first; caller-supplied parameters override
        // them by key.
        let mut params: Vec<(String, String)> = vec![
            ("publications".to_string(), "full".to_string()),
            ("source".to_string(), self.config.source_tag.clone()),
        ];
        for (key, value) in query {
            if let Some(existing) = params.iter_mut().find(|(k, _)| k == key) {
                existing.1 = value.clone();
            } else {
                params.push((key.clone(), value.clone()));
            }
        }

        debug!(url = %self.config.api_base_url, "Querying profiles API");

        let response = match self
            .client
            .get(&self.config.api_base_url)
            .query(&params)
            .send()
            .await
        {
            Ok(response) => response,
            Err(err) => {
                error!(error = %err, "Profiles search failed");
                return Lookup::Error(err.to_string());
            }
        };

        // The API reports "no matching profile" as a 404.
        if response.status() == StatusCode::NOT_FOUND {
            return Lookup::NotFound;
        }

        if !response.status().is_success() {
            error!(status = %response.status(), "Profiles search failed");
            return Lookup::Error(format!("unexpected status {}", response.status()));
        }

        let body: Value = match response.json().await {
            Ok(body) => body,
            Err(err) => {
                error!(error = %err, "Profiles response body is not valid JSON");
                return Lookup::Error(err.to_string());
            }
        };

        match body
            .get("Profiles")
            .and_then(|profiles| profiles.get(0))
            .and_then(Value::as_object)
        {
            Some(document) if !document.is_empty() => {
                Lookup::Found(ProfileDocument::new(document.clone()))
            }
            _ => {
                error!("Malformed profiles data");
                Lookup::Error("malformed profiles data".to_string())
            }
        }
    }
}
