use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

// ============ Site ID ============

/// Numeric identifier of a hosted site on the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SiteId(pub u64);

impl SiteId {
    /// Returns the raw numeric value.
    #[must_use]
    pub fn get(self) -> u64 {
        self.0
    }
}

impl From<u64> for SiteId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl fmt::Display for SiteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for SiteId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

// ============ Client options ============

/// Default REST API host.
pub const DEFAULT_API_BASE: &str = "https://public-api.wordpress.com";
/// Default connect timeout.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
/// Default whole-request timeout.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Options used to build a [`RestDeleteClient`](crate::RestDeleteClient).
///
/// # Default
///
/// Points at [`DEFAULT_API_BASE`] with an empty token and 10s/30s timeouts.
#[derive(Clone, PartialEq, Eq)]
pub struct ClientOptions {
    /// Scheme and host of the REST API, without a trailing slash.
    pub api_base: String,
    /// OAuth bearer token sent with every request.
    pub bearer_token: String,
    /// Maximum time to establish a connection.
    pub connect_timeout: Duration,
    /// Maximum time for the whole request, response body included.
    pub request_timeout: Duration,
}

impl ClientOptions {
    /// Options for `api_base` with the given token and default timeouts.
    #[must_use]
    pub fn new(api_base: impl Into<String>, bearer_token: impl Into<String>) -> Self {
        Self {
            api_base: api_base.into(),
            bearer_token: bearer_token.into(),
            ..Self::default()
        }
    }

    /// Returns a copy with a different request timeout.
    #[must_use]
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// `api_base` with any trailing `/` removed.
    pub(crate) fn normalized_base(&self) -> &str {
        self.api_base.trim_end_matches('/')
    }
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            bearer_token: String::new(),
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

// Tokens must never reach the logs.
impl fmt::Debug for ClientOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientOptions")
            .field("api_base", &self.api_base)
            .field(
                "bearer_token",
                &crate::utils::log_sanitizer::redact_token(&self.bearer_token),
            )
            .field("connect_timeout", &self.connect_timeout)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}
