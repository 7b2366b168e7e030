//! # EDS Directory Client
//!
//! Scoped LDAP lookups against the institutional directory ("EDS").
//!
//! Lookups resolve a person by email or identifier and pull the sub-entries
//! a sync pass needs: campus and private-practice addresses, and the
//! department entry named by the person's primary department number. Every
//! lookup returns a tagged [`edsync_core::Lookup`] so callers can tell
//! "source unreachable" from "no match" from "call failed".
//!
//! ## Example
//!
//! ```ignore
//! use edsync_directory::{AddressType, DirectoryClient, DirectoryConfig, LdapDirectoryClient};
//!
//! let config = DirectoryConfig::new("eds.example.edu")
//!     .with_bind("cn=reader,dc=example,dc=edu", "secret");
//!
//! let client = LdapDirectoryClient::new(Some(config))?;
//! let person = client.search_by_email("mcurie@example.edu").await;
//! ```

pub mod client;
pub mod config;
pub mod entry;

// Re-exports
pub use client::{AddressType, DirectoryClient, LdapDirectoryClient};
pub use config::DirectoryConfig;
pub use entry::DirectoryEntry;
