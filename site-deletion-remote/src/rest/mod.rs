//! REST site deletion client

mod error;
mod http;
mod remote;
mod types;

use reqwest::Client;

use crate::common::create_http_client;
use crate::error::Result;
use crate::types::ClientOptions;

pub(crate) use types::{DeleteSiteResponse, RestApiError};

/// REST API version used for the delete endpoint
pub(crate) const API_VERSION_PATH: &str = "/rest/v1.1";
/// Status token that marks a successful deletion
pub(crate) const STATUS_DELETED: &str = "deleted";

/// REST client issuing `sites/{id}/delete`
pub struct RestDeleteClient {
    pub(crate) client: Client,
    pub(crate) options: ClientOptions,
}

impl RestDeleteClient {
    /// Build a client from `options`.
    pub fn new(options: ClientOptions) -> Result<Self> {
        Ok(Self {
            client: create_http_client(&options)?,
            options,
        })
    }

    /// Absolute URL for an endpoint path such as `sites/42/delete`.
    pub(crate) fn endpoint_url(&self, endpoint: &str) -> String {
        format!(
            "{}{API_VERSION_PATH}/{}",
            self.options.normalized_base(),
            endpoint.trim_start_matches('/')
        )
    }
}
