//! # Profiles API Client
//!
//! Queries against the public JSON API exposing research-profile data
//! ("Profiles"): publications, narrative, keywords, awards.
//!
//! The API wraps every response in a `Profiles` result array; this crate
//! normalizes the envelope and hands the first matching document to the
//! caller. A 404 from the server is an empty result set, not an error.
//!
//! ## Example
//!
//! ```ignore
//! use edsync_profiles::{HttpProfilesClient, ProfilesClient, ProfilesConfig};
//!
//! let client = HttpProfilesClient::new(ProfilesConfig::default())?;
//! let profile = client.search_by_identifier("012345678").await;
//! ```

pub mod client;
pub mod config;
pub mod document;

// Re-exports
pub use client::{HttpProfilesClient, ProfilesClient};
pub use config::ProfilesConfig;
pub use document::ProfileDocument;
