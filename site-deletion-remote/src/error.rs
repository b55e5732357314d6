use serde::{Deserialize, Serialize};

use crate::types::SiteId;

/// Message shown when the service answered but did not confirm the deletion.
pub const SITE_NOT_DELETED_MESSAGE: &str = "The site could not be deleted.";

/// Unified error type for remote site deletion.
///
/// Variants fall into two groups:
/// - **transport** failures ([`NetworkError`](Self::NetworkError),
///   [`Timeout`](Self::Timeout), [`HttpStatus`](Self::HttpStatus)): the request
///   never produced a usable 2xx response.
/// - **service** failures ([`ServiceRejected`](Self::ServiceRejected)): the
///   server answered, but not with the `deleted` status token.
///
/// None of these are retried. Deletion is destructive and user-initiated, so a
/// second attempt is left to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "code")]
pub enum RemoteError {
    /// A network-level error occurred (DNS resolution failure, connection refused, etc.).
    NetworkError {
        /// Error details.
        detail: String,
    },

    /// The HTTP request timed out.
    Timeout {
        /// Error details.
        detail: String,
    },

    /// The server answered with a non-2xx status code.
    HttpStatus {
        /// HTTP status code.
        status: u16,
        /// Error code from the API body (e.g. `unknown_blog`), if any.
        raw_code: Option<String>,
        /// Error message from the API body, if any.
        raw_message: Option<String>,
    },

    /// The request reached the server but the reply did not say `deleted`.
    ServiceRejected {
        /// Site the request was issued for.
        site_id: SiteId,
        /// Status token the server returned instead, if there was one.
        status: Option<String>,
    },

    /// The HTTP client could not be constructed from the given options.
    InvalidConfiguration {
        /// Details about what is wrong.
        detail: String,
    },
}

impl RemoteError {
    /// Whether this is expected behavior (the server refused, the site is gone, etc.).
    ///
    /// Use `warn` level when this returns `true` and `error` level otherwise.
    /// **Update this method when adding variants.**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::ServiceRejected { .. } => true,
            Self::HttpStatus { status, .. } => (400..500).contains(status),
            _ => false,
        }
    }

    /// Whether the failure happened at the transport layer.
    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::NetworkError { .. } | Self::Timeout { .. } | Self::HttpStatus { .. }
        )
    }
}

impl std::fmt::Display for RemoteError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NetworkError { detail } => write!(f, "Network error: {detail}"),
            Self::Timeout { detail } => write!(f, "Request timeout: {detail}"),
            Self::HttpStatus {
                status,
                raw_message,
                ..
            } => {
                if let Some(msg) = raw_message {
                    write!(f, "HTTP {status}: {msg}")
                } else {
                    write!(f, "HTTP {status}")
                }
            }
            Self::ServiceRejected { status, .. } => {
                if let Some(status) = status {
                    write!(f, "{SITE_NOT_DELETED_MESSAGE} (status: {status})")
                } else {
                    write!(f, "{SITE_NOT_DELETED_MESSAGE}")
                }
            }
            Self::InvalidConfiguration { detail } => {
                write!(f, "Invalid client configuration: {detail}")
            }
        }
    }
}

impl std::error::Error for RemoteError {}

/// Convenience type alias for `Result<T, RemoteError>`.
pub type Result<T> = std::result::Result<T, RemoteError>;
