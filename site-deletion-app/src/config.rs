//! Application configuration
//!
//! Loaded from an optional JSON file, then overridden by `SITE_DELETION_*`
//! environment variables, then validated.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use site_deletion_core::error::{CoreError, CoreResult};
use site_deletion_core::types::ClientOptions;
use site_deletion_remote::{DEFAULT_API_BASE, DEFAULT_CONNECT_TIMEOUT, DEFAULT_REQUEST_TIMEOUT};

/// Environment variable names
pub const ENV_DATABASE_PATH: &str = "SITE_DELETION_DATABASE";
pub const ENV_API_BASE: &str = "SITE_DELETION_API_BASE";
pub const ENV_TOKEN: &str = "SITE_DELETION_TOKEN";
pub const ENV_CONNECT_TIMEOUT: &str = "SITE_DELETION_CONNECT_TIMEOUT";
pub const ENV_REQUEST_TIMEOUT: &str = "SITE_DELETION_REQUEST_TIMEOUT";

const DEFAULT_DATABASE_FILE: &str = "site-deletion.db";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AppConfig {
    /// `SQLite` database file
    pub database_path: PathBuf,
    /// REST API base URL
    pub api_base: String,
    /// OAuth bearer token
    #[serde(skip_serializing)]
    pub bearer_token: String,
    /// Connect timeout in seconds
    pub connect_timeout_secs: u64,
    /// Whole-request timeout in seconds
    pub request_timeout_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from(DEFAULT_DATABASE_FILE),
            api_base: DEFAULT_API_BASE.to_string(),
            bearer_token: String::new(),
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT.as_secs(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT.as_secs(),
        }
    }
}

impl AppConfig {
    /// Parse a JSON config document. Missing fields keep their defaults.
    pub fn from_json(text: &str) -> CoreResult<Self> {
        serde_json::from_str(text)
            .map_err(|e| CoreError::SerializationError(format!("Invalid config file: {e}")))
    }

    /// Read `path` if it exists; otherwise start from defaults.
    pub fn from_file(path: &Path) -> CoreResult<Self> {
        if !path.exists() {
            log::debug!("Config file {} not found, using defaults", path.display());
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path).map_err(|e| {
            CoreError::StorageError(format!("Failed to read {}: {e}", path.display()))
        })?;
        Self::from_json(&text)
    }

    /// File, then process environment, then validation.
    pub fn load(path: &Path) -> CoreResult<Self> {
        let mut config = Self::from_file(path)?;
        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `SITE_DELETION_*` overrides from `lookup`.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> CoreResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup(ENV_DATABASE_PATH) {
            self.database_path = PathBuf::from(path);
        }
        if let Some(api_base) = lookup(ENV_API_BASE) {
            self.api_base = api_base;
        }
        if let Some(token) = lookup(ENV_TOKEN) {
            self.bearer_token = token;
        }
        if let Some(secs) = lookup(ENV_CONNECT_TIMEOUT) {
            self.connect_timeout_secs = parse_secs(ENV_CONNECT_TIMEOUT, &secs)?;
        }
        if let Some(secs) = lookup(ENV_REQUEST_TIMEOUT) {
            self.request_timeout_secs = parse_secs(ENV_REQUEST_TIMEOUT, &secs)?;
        }
        Ok(())
    }

    pub fn validate(&self) -> CoreResult<()> {
        if self.bearer_token.trim().is_empty() {
            return Err(CoreError::ValidationError(format!(
                "A bearer token is required (set {ENV_TOKEN})"
            )));
        }
        if !(self.api_base.starts_with("https://") || self.api_base.starts_with("http://")) {
            return Err(CoreError::ValidationError(format!(
                "API base must be an http(s) URL: {}",
                self.api_base
            )));
        }
        if self.connect_timeout_secs == 0 || self.request_timeout_secs == 0 {
            return Err(CoreError::ValidationError(
                "Timeouts must be at least one second".to_string(),
            ));
        }
        if self.database_path.as_os_str().is_empty() {
            return Err(CoreError::ValidationError(
                "Database path cannot be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Options for the remote deletion client.
    pub fn client_options(&self) -> ClientOptions {
        ClientOptions {
            api_base: self.api_base.clone(),
            bearer_token: self.bearer_token.clone(),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
        }
    }
}

fn parse_secs(key: &str, value: &str) -> CoreResult<u64> {
    value
        .trim()
        .parse()
        .map_err(|_| CoreError::ValidationError(format!("{key} must be a number of seconds: {value:?}")))
}
