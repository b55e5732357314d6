//! REST HTTP request methods

use crate::error::Result;
use crate::http_client::HttpUtils;

use super::RestDeleteClient;

impl RestDeleteClient {
    /// Execute a body-less POST request
    ///
    /// Returns the status code and raw body of whatever the server answered.
    pub(crate) async fn post_empty(&self, endpoint: &str) -> Result<(u16, String)> {
        let url = self.endpoint_url(endpoint);

        let request = self
            .client
            .post(&url)
            .bearer_auth(&self.options.bearer_token)
            .header(reqwest::header::CONTENT_LENGTH, 0);

        HttpUtils::execute_request(request, "POST", &url).await
    }
}
