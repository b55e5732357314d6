//! REST API payload types

use serde::Deserialize;

/// Body of a 2xx reply to `sites/{id}/delete`
///
/// Only `status` matters; everything else the server sends is ignored.
#[derive(Debug, Deserialize)]
pub struct DeleteSiteResponse {
    #[serde(default)]
    pub status: Option<String>,
}

/// Error body returned with non-2xx replies
#[derive(Debug, Deserialize)]
pub struct RestApiError {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}
