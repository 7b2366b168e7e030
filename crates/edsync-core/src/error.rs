//! Synchronization error types
//!
//! Error definitions with transient/permanent classification. Lookup-layer
//! non-results (not found, source unavailable) are not errors; they are
//! carried by [`crate::lookup::Lookup`] instead.

use thiserror::Error;

/// Error that can occur during a synchronization pass.
#[derive(Debug, Error)]
pub enum SyncError {
    /// A configuration value is missing or malformed.
    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    /// Input failed validation before any lookup was attempted.
    #[error("validation failed: {message}")]
    Validation { message: String },

    /// An external source was reachable but the call failed.
    #[error("transport error: {message}")]
    Transport {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The persistence collaborator rejected a read or write.
    #[error("persistence error: {message}")]
    Persistence {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A pre-save hook failed; the pass is aborted.
    #[error("hook '{hook}' failed: {message}")]
    Hook { hook: String, message: String },
}

impl SyncError {
    /// Check if this error is transient and the pass may be retried later.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            SyncError::Transport { .. } | SyncError::Persistence { .. }
        )
    }

    /// Get an error code for classification in logs.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            SyncError::InvalidConfiguration { .. } => "INVALID_CONFIG",
            SyncError::Validation { .. } => "VALIDATION_FAILED",
            SyncError::Transport { .. } => "TRANSPORT_ERROR",
            SyncError::Persistence { .. } => "PERSISTENCE_ERROR",
            SyncError::Hook { .. } => "HOOK_FAILED",
        }
    }

    // Convenience constructors

    /// Create an invalid configuration error.
    pub fn invalid_configuration(message: impl Into<String>) -> Self {
        SyncError::InvalidConfiguration {
            message: message.into(),
        }
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        SyncError::Validation {
            message: message.into(),
        }
    }

    /// Create a transport error.
    pub fn transport(message: impl Into<String>) -> Self {
        SyncError::Transport {
            message: message.into(),
            source: None,
        }
    }

    /// Create a transport error with source.
    pub fn transport_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        SyncError::Transport {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a persistence error.
    pub fn persistence(message: impl Into<String>) -> Self {
        SyncError::Persistence {
            message: message.into(),
            source: None,
        }
    }

    /// Create a persistence error with source.
    pub fn persistence_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        SyncError::Persistence {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a hook error.
    pub fn hook(hook: impl Into<String>, message: impl Into<String>) -> Self {
        SyncError::Hook {
            hook: hook.into(),
            message: message.into(),
        }
    }
}

/// Result type for synchronization operations.
pub type Result<T> = std::result::Result<T, SyncError>;
