use async_trait::async_trait;

use crate::error::{RemoteError, Result};
use crate::types::SiteId;

/// Raw API error taken from a non-2xx response body (internal use)
#[derive(Debug, Clone, Default)]
pub(crate) struct RawApiError {
    /// Error code (e.g. `unknown_blog`, `unauthorized`)
    pub code: Option<String>,
    /// Original error message
    pub message: Option<String>,
}

impl RawApiError {
    pub fn new(code: Option<String>, message: Option<String>) -> Self {
        Self { code, message }
    }
}

/// Error mapping trait (internal use)
///
/// Clients implement this to turn non-2xx API bodies into [`RemoteError`].
pub(crate) trait RemoteErrorMapper {
    /// Client identifier (for logs)
    fn client_name(&self) -> &'static str;

    /// Map a non-2xx status and its parsed body to a unified error
    fn map_error(&self, status: u16, raw: RawApiError) -> RemoteError {
        RemoteError::HttpStatus {
            status,
            raw_code: raw.code,
            raw_message: raw.message,
        }
    }

    /// Shortcut: the server answered 2xx but did not confirm deletion
    fn rejected(&self, site_id: SiteId, status: Option<String>) -> RemoteError {
        RemoteError::ServiceRejected { site_id, status }
    }
}

/// Remote site deletion trait
///
/// Issues the destructive request for one site and classifies the reply.
/// Implementations must not touch local storage and must not retry.
#[async_trait]
pub trait SiteDeleteRemote: Send + Sync {
    /// Client identifier
    fn id(&self) -> &'static str;

    /// Permanently delete a site on the server.
    ///
    /// # Returns
    /// * `Ok(())` - the server confirmed the deletion
    /// * `Err(RemoteError::ServiceRejected)` - the server answered without confirming
    /// * `Err(_)` - any transport failure (see [`RemoteError::is_transport`])
    async fn delete_site(&self, site_id: SiteId) -> Result<()>;
}
