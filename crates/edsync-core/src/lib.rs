//! # edsync Core Library
//!
//! Shared types for synchronizing person-profile records with the EDS
//! directory and the Profiles API.
//!
//! # Modules
//!
//! - [`ids`] - Strongly typed record identifier
//! - [`error`] - Standardized error types ([`SyncError`])
//! - [`lookup`] - Tagged outcome of an external-source lookup
//! - [`fields`] - Field values and the ordered field map passed through a
//!   sync pass
//! - [`config`] - Deployment settings
//! - [`email`] - Email address validation

pub mod config;
pub mod email;
pub mod error;
pub mod fields;
pub mod ids;
pub mod lookup;

// Re-export main types for convenient access
pub use config::SyncSettings;
pub use email::is_valid_email;
pub use error::{Result, SyncError};
pub use fields::{FieldValue, FieldValueMap};
pub use ids::RecordId;
pub use lookup::Lookup;
