//! Unified error type definition

use serde::Serialize;
use thiserror::Error;

use crate::types::SiteId;

// Re-export library error type
pub use site_deletion_remote::RemoteError;

/// Core layer error type
#[derive(Error, Debug, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum CoreError {
    /// Site not found in the local store
    #[error("Site not found: {0}")]
    SiteNotFound(SiteId),

    /// Caller does not administer the site, or it is not hosted on the platform
    #[error("Site {0} cannot be deleted from this client")]
    NotEligible(SiteId),

    /// A deletion for this site is already outstanding
    #[error("Deletion of site {0} is already in progress")]
    DeletionInProgress(SiteId),

    /// Confirmation gate rejected a transition
    #[error("Confirmation error: {0}")]
    ConfirmationError(String),

    /// Local purge could not be committed; nothing was removed
    #[error("Local purge failed: {0}")]
    LocalPurgeFailure(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Validation error
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Storage layer error
    #[error("Storage error: {0}")]
    StorageError(String),

    /// Remote deletion error (converted from the client library)
    #[error("{0}")]
    Remote(#[from] RemoteError),
}

impl CoreError {
    /// Whether this is expected behavior (user input, resource does not exist, etc.), used for log levels.
    ///
    /// Use `warn` when this returns `true` and `error` when it returns `false`.
    /// **Update this method when adding variants.**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::SiteNotFound(_)
            | Self::NotEligible(_)
            | Self::DeletionInProgress(_)
            | Self::ConfirmationError(_)
            | Self::ValidationError(_) => true,
            Self::Remote(e) => e.is_expected(),
            _ => false,
        }
    }
}

/// Core layer Result type alias
pub type CoreResult<T> = std::result::Result<T, CoreError>;
