//! Shared client helpers

use reqwest::Client;

use crate::error::{RemoteError, Result};
use crate::types::ClientOptions;

/// Create an HTTP client with the timeouts from `options`
pub fn create_http_client(options: &ClientOptions) -> Result<Client> {
    Client::builder()
        .connect_timeout(options.connect_timeout)
        .timeout(options.request_timeout)
        .build()
        .map_err(|e| RemoteError::InvalidConfiguration {
            detail: format!("Failed to create HTTP client: {e}"),
        })
}
