//! REST error mapping

use crate::http_client::HttpUtils;
use crate::traits::{RawApiError, RemoteErrorMapper};

use super::{RestApiError, RestDeleteClient};

impl RemoteErrorMapper for RestDeleteClient {
    fn client_name(&self) -> &'static str {
        "rest"
    }
}

impl RawApiError {
    /// Pull `error`/`message` out of a non-2xx body; plain-text bodies become the message.
    pub(crate) fn from_body(body: &str) -> Self {
        match HttpUtils::parse_json::<RestApiError>(body) {
            Some(api_error) => Self::new(api_error.error, api_error.message),
            None if body.trim().is_empty() => Self::default(),
            None => Self::new(None, Some(body.trim().to_string())),
        }
    }
}
