//! Generic HTTP client tools
//!
//! Reusable request execution shared by REST clients. Callers build the
//! `RequestBuilder` themselves (URL, auth headers, body); this module sends it,
//! logs it and turns transport failures into [`RemoteError`] values.
//!
//! Requests are sent exactly once; there is no retry helper.

use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;

use crate::error::RemoteError;
use crate::utils::log_sanitizer::truncate_for_log;

/// HTTP tool function set
pub struct HttpUtils;

impl HttpUtils {
    /// Performs an HTTP request and returns the status code with the response text
    ///
    /// # Arguments
    /// * `request_builder` - configured request (URL, headers, body)
    /// * `method_name` - request method name (used for logs)
    /// * `url` - request URL (used for logs)
    ///
    /// # Returns
    /// * `Ok((status_code, response_text))` - any response that was fully received,
    ///   whatever its status code
    /// * `Err(RemoteError::Timeout)` - the request or body read timed out
    /// * `Err(RemoteError::NetworkError)` - any other transport failure
    pub async fn execute_request(
        request_builder: RequestBuilder,
        method_name: &str,
        url: &str,
    ) -> Result<(u16, String), RemoteError> {
        log::debug!("{method_name} {url}");

        let response = request_builder.send().await.map_err(transport_error)?;

        let status_code = response.status().as_u16();
        log::debug!("Response Status: {status_code}");

        let response_text = response.text().await.map_err(|e| {
            if e.is_timeout() {
                RemoteError::Timeout {
                    detail: format!("Timed out reading response body: {e}"),
                }
            } else {
                RemoteError::NetworkError {
                    detail: format!("Failed to read response body: {e}"),
                }
            }
        })?;

        log::debug!("Response Body: {}", truncate_for_log(&response_text));

        Ok((status_code, response_text))
    }

    /// Parse a JSON response body
    ///
    /// Returns `None` when the body is not valid JSON for `T`; callers decide
    /// what an unparseable body means for them.
    pub fn parse_json<T>(response_text: &str) -> Option<T>
    where
        T: DeserializeOwned,
    {
        match serde_json::from_str(response_text) {
            Ok(value) => Some(value),
            Err(e) => {
                log::warn!("JSON parse failed: {e}");
                log::warn!("Raw response: {}", truncate_for_log(response_text));
                None
            }
        }
    }
}

/// Map a `reqwest` send failure to a transport error.
fn transport_error(e: reqwest::Error) -> RemoteError {
    if e.is_timeout() {
        RemoteError::Timeout {
            detail: e.to_string(),
        }
    } else {
        RemoteError::NetworkError {
            detail: e.to_string(),
        }
    }
}

/// Whether an HTTP status code is in the 2xx range.
pub(crate) fn is_success_status(status_code: u16) -> bool {
    (200..300).contains(&status_code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_status_range() {
        assert!(is_success_status(200));
        assert!(is_success_status(204));
        assert!(!is_success_status(199));
        assert!(!is_success_status(301));
        assert!(!is_success_status(404));
        assert!(!is_success_status(503));
    }

    #[test]
    fn parse_json_valid() {
        #[derive(serde::Deserialize, Debug, PartialEq)]
        struct Foo {
            status: String,
        }
        let result: Option<Foo> = HttpUtils::parse_json(r#"{"status":"deleted"}"#);
        assert_eq!(
            result,
            Some(Foo {
                status: "deleted".to_string()
            })
        );
    }

    #[test]
    fn parse_json_invalid() {
        #[derive(serde::Deserialize, Debug)]
        #[allow(dead_code)]
        struct Foo {
            status: String,
        }
        let result: Option<Foo> = HttpUtils::parse_json("<html>oops</html>");
        assert!(result.is_none());
    }
}
