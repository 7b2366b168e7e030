//! Directory client trait and LDAP implementation.

use async_trait::async_trait;
use ldap3::{dn_escape, Ldap, LdapConnAsync, LdapConnSettings, LdapError, Scope, SearchEntry};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, error, info, warn};

use edsync_core::error::{Result, SyncError};
use edsync_core::{is_valid_email, Lookup};

use crate::config::DirectoryConfig;
use crate::entry::DirectoryEntry;

/// The address sub-entry variant to look up for a person.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AddressType {
    /// The institutional campus address.
    #[default]
    Campus,
    /// The private-practice address.
    PrivatePractice,
}

impl AddressType {
    /// The `cn` naming the sub-entry in the directory tree.
    #[must_use]
    pub fn entry_cn(&self) -> &'static str {
        match self {
            AddressType::Campus => "Campus Address",
            AddressType::PrivatePractice => "Private Practice Address",
        }
    }
}

impl std::fmt::Display for AddressType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.entry_cn())
    }
}

/// Scoped lookups against the EDS directory.
///
/// All lookups return a tagged [`Lookup`]: callers must be able to tell
/// "source unreachable, do not touch the record" apart from "source
/// reachable and returned nothing" apart from "call failed".
#[async_trait]
pub trait DirectoryClient: Send + Sync {
    /// Whether a directory connection is configured for this deployment.
    ///
    /// When false, every lookup returns [`Lookup::Unavailable`] without
    /// touching the network.
    fn is_available(&self) -> bool;

    /// Look up a person entry by email address.
    ///
    /// The address must already have passed format validation; a malformed
    /// address is logged and the lookup skipped.
    async fn search_by_email(&self, email: &str) -> Lookup<DirectoryEntry>;

    /// Look up a person entry by institutional identifier.
    async fn search_by_identifier(&self, ucid: &str) -> Lookup<DirectoryEntry>;

    /// Look up a department entry by department number.
    async fn search_by_department(&self, department_number: &str) -> Lookup<DirectoryEntry>;

    /// Look up an address sub-entry beneath a person entry.
    async fn search_address(&self, uid: &str, address_type: AddressType)
        -> Lookup<DirectoryEntry>;
}

/// LDAP-backed directory client.
///
/// The connection is established lazily on first use and shared across the
/// lookups of a pass. An unconfigured client (no [`DirectoryConfig`]) is a
/// valid state: it reports unavailable and performs no I/O.
pub struct LdapDirectoryClient {
    /// Configuration, absent when no directory server is set up.
    config: Option<DirectoryConfig>,

    /// Cached LDAP connection (lazily initialized).
    connection: Arc<RwLock<Option<Ldap>>>,
}

impl LdapDirectoryClient {
    /// Create a new client. `None` builds an unavailable client.
    pub fn new(config: Option<DirectoryConfig>) -> Result<Self> {
        if let Some(config) = &config {
            config.validate()?;
        }

        Ok(Self {
            config,
            connection: Arc::new(RwLock::new(None)),
        })
    }

    /// Get the shared LDAP connection, creating one if necessary.
    async fn get_connection(&self, config: &DirectoryConfig) -> Result<Ldap> {
        {
            let conn_guard = self.connection.read().await;
            if let Some(conn) = conn_guard.as_ref() {
                return Ok(conn.clone());
            }
        }

        let conn = self.create_connection(config).await?;

        {
            let mut conn_guard = self.connection.write().await;
            *conn_guard = Some(conn.clone());
        }

        Ok(conn)
    }

    /// Establish and bind a new LDAP connection.
    async fn create_connection(&self, config: &DirectoryConfig) -> Result<Ldap> {
        let url = config.url();

        debug!(url = %url, "Connecting to directory server");

        let settings = LdapConnSettings::new()
            .set_conn_timeout(std::time::Duration::from_secs(
                config.connection_timeout_secs,
            ))
            .set_starttls(config.use_starttls);

        let (conn, mut ldap) = LdapConnAsync::with_settings(settings, &url)
            .await
            .map_err(|e| {
                SyncError::transport_with_source(
                    format!("failed to connect to directory server at {url}"),
                    e,
                )
            })?;

        // Drive the connection in the background for the life of the handle.
        tokio::spawn(async move {
            if let Err(e) = conn.drive().await {
                warn!(error = %e, "directory connection driver error");
            }
        });

        let bind_password = config.bind_password.as_deref().unwrap_or("");

        debug!(bind_dn = %config.bind_dn, "Performing directory bind");

        let result = ldap
            .simple_bind(&config.bind_dn, bind_password)
            .await
            .map_err(|e| {
                SyncError::transport_with_source(
                    format!("directory bind failed for {}", config.bind_dn),
                    e,
                )
            })?;

        if result.rc != 0 {
            return Err(SyncError::transport(format!(
                "directory bind failed with code {}: {}",
                result.rc, result.text
            )));
        }

        info!(host = %config.host, "Directory connection established");

        Ok(ldap)
    }

    /// Run one scoped search and return the first matching entry.
    async fn search(&self, base: &str, filter: &str) -> Lookup<DirectoryEntry> {
        let Some(config) = &self.config else {
            return Lookup::Unavailable;
        };

        let mut ldap = match self.get_connection(config).await {
            Ok(ldap) => ldap,
            Err(err) => {
                error!(error = %err, "directory connection failed");
                return Lookup::Error(err.to_string());
            }
        };

        let result = match ldap.search(base, Scope::Subtree, filter, vec!["*"]).await {
            Ok(result) => result,
            Err(err) => {
                error!(base = %base, filter = %filter, error = %err, "directory search error");
                return Lookup::Error(err.to_string());
            }
        };

        match result.success() {
            Ok((entries, _)) => match entries.into_iter().next() {
                Some(entry) => Lookup::Found(DirectoryEntry::from(SearchEntry::construct(entry))),
                None => Lookup::NotFound,
            },
            // noSuchObject: the search base itself does not exist, which is
            // how the directory reports a missing sub-entry.
            Err(LdapError::LdapResult { result }) if result.rc == 32 => Lookup::NotFound,
            Err(err) => {
                error!(base = %base, filter = %filter, error = %err, "directory search error");
                Lookup::Error(err.to_string())
            }
        }
    }
}

#[async_trait]
impl DirectoryClient for LdapDirectoryClient {
    fn is_available(&self) -> bool {
        self.config.is_some()
    }

    async fn search_by_email(&self, email: &str) -> Lookup<DirectoryEntry> {
        if !is_valid_email(email) {
            warn!(email = %email, "skipping directory lookup for malformed email");
            return Lookup::NotFound;
        }

        let Some(config) = &self.config else {
            return Lookup::Unavailable;
        };
        let filter = format!("(mail={})", escape_filter_value(email));
        self.search(&config.people_base_dn, &filter).await
    }

    async fn search_by_identifier(&self, ucid: &str) -> Lookup<DirectoryEntry> {
        let Some(config) = &self.config else {
            return Lookup::Unavailable;
        };
        let filter = format!("(ucsfEduIDNumber={})", escape_filter_value(ucid));
        self.search(&config.people_base_dn, &filter).await
    }

    async fn search_by_department(&self, department_number: &str) -> Lookup<DirectoryEntry> {
        let Some(config) = &self.config else {
            return Lookup::Unavailable;
        };
        let filter = format!("(ou={})", escape_filter_value(department_number));
        self.search(&config.departments_base_dn, &filter)
            .await
    }

    async fn search_address(
        &self,
        uid: &str,
        address_type: AddressType,
    ) -> Lookup<DirectoryEntry> {
        let Some(config) = &self.config else {
            return Lookup::Unavailable;
        };
        let base = address_base_dn(&config.people_base_dn, uid, address_type);
        let filter = format!("(cn={})", escape_filter_value(address_type.entry_cn()));
        self.search(&base, &filter).await
    }
}

/// Compose the DN of an address sub-entry beneath a person entry.
fn address_base_dn(people_base_dn: &str, uid: &str, address_type: AddressType) -> String {
    format!(
        "cn={},uid={},{}",
        dn_escape(address_type.entry_cn()),
        dn_escape(uid),
        people_base_dn
    )
}

/// Escape special characters in LDAP filter values (RFC 4515).
fn escape_filter_value(value: &str) -> String {
    value
        .replace('\\', "\\5c")
        .replace('*', "\\2a")
        .replace('(', "\\28")
        .replace(')', "\\29")
        .replace('\0', "\\00")
}
