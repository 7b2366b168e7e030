//! Directory client configuration.

use edsync_core::error::{Result, SyncError};
use serde::{Deserialize, Serialize};

/// Configuration for the EDS directory connection.
#[derive(Clone, Serialize, Deserialize)]
pub struct DirectoryConfig {
    /// Directory server hostname or IP address.
    pub host: String,

    /// Directory server port (389 for LDAP, 636 for LDAPS).
    #[serde(default = "default_port")]
    pub port: u16,

    /// Use SSL/TLS (LDAPS).
    #[serde(default)]
    pub use_ssl: bool,

    /// Use STARTTLS upgrade on a plain connection.
    #[serde(default)]
    pub use_starttls: bool,

    /// Bind DN for authentication. Empty performs an anonymous bind.
    #[serde(default)]
    pub bind_dn: String,

    /// Bind password.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bind_password: Option<String>,

    /// Base DN for person entries.
    #[serde(default = "default_people_base_dn")]
    pub people_base_dn: String,

    /// Base DN for department entries.
    #[serde(default = "default_departments_base_dn")]
    pub departments_base_dn: String,

    /// Connection timeout in seconds.
    #[serde(default = "default_connection_timeout")]
    pub connection_timeout_secs: u64,
}

impl std::fmt::Debug for DirectoryConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DirectoryConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("use_ssl", &self.use_ssl)
            .field("use_starttls", &self.use_starttls)
            .field("bind_dn", &self.bind_dn)
            .field(
                "bind_password",
                &self.bind_password.as_ref().map(|_| "***REDACTED***"),
            )
            .field("people_base_dn", &self.people_base_dn)
            .field("departments_base_dn", &self.departments_base_dn)
            .field("connection_timeout_secs", &self.connection_timeout_secs)
            .finish()
    }
}

fn default_port() -> u16 {
    389
}

fn default_people_base_dn() -> String {
    "ou=people,dc=ucsf,dc=edu".to_string()
}

fn default_departments_base_dn() -> String {
    "ou=departments,dc=ucsf,dc=edu".to_string()
}

fn default_connection_timeout() -> u64 {
    30
}

impl DirectoryConfig {
    /// Create a new config for the given host with default scopes.
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: default_port(),
            use_ssl: false,
            use_starttls: false,
            bind_dn: String::new(),
            bind_password: None,
            people_base_dn: default_people_base_dn(),
            departments_base_dn: default_departments_base_dn(),
            connection_timeout_secs: default_connection_timeout(),
        }
    }

    /// Set bind credentials.
    pub fn with_bind(mut self, bind_dn: impl Into<String>, password: impl Into<String>) -> Self {
        self.bind_dn = bind_dn.into();
        self.bind_password = Some(password.into());
        self
    }

    /// Enable SSL (LDAPS) on the default LDAPS port.
    #[must_use]
    pub fn with_ssl(mut self) -> Self {
        self.use_ssl = true;
        self.port = 636;
        self
    }

    /// Enable STARTTLS.
    #[must_use]
    pub fn with_starttls(mut self) -> Self {
        self.use_starttls = true;
        self
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.host.trim().is_empty() {
            return Err(SyncError::invalid_configuration(
                "directory host must not be empty",
            ));
        }
        if self.people_base_dn.trim().is_empty() {
            return Err(SyncError::invalid_configuration(
                "people_base_dn must not be empty",
            ));
        }
        if self.departments_base_dn.trim().is_empty() {
            return Err(SyncError::invalid_configuration(
                "departments_base_dn must not be empty",
            ));
        }
        Ok(())
    }

    /// Directory URL for the configured transport.
    #[must_use]
    pub fn url(&self) -> String {
        if self.use_ssl {
            format!("ldaps://{}:{}", self.host, self.port)
        } else {
            format!("ldap://{}:{}", self.host, self.port)
        }
    }
}
