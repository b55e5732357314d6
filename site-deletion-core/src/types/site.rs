//! Site and dependent account type definitions

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use site_deletion_remote::SiteId;

/// A hosted site as cached by the local store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Site {
    /// Platform site ID
    pub id: SiteId,
    /// Site title
    pub name: String,
    /// Site URL including scheme
    pub url: String,
    /// Whether the current user administers the site
    pub is_admin: bool,
    /// Whether the site is hosted on the managed platform
    pub is_hosted_on_platform: bool,
    /// Linked integration account, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dependent_account_id: Option<String>,
}

impl Site {
    /// Only platform-hosted sites the user administers may be deleted.
    pub fn supports_delete(&self) -> bool {
        self.is_hosted_on_platform && self.is_admin
    }

    /// URL without scheme or trailing slash, e.g. `example.com/blog`.
    ///
    /// This is the value the user must retype to confirm deletion.
    pub fn display_url(&self) -> String {
        let url = self.url.trim();
        let without_scheme = url
            .strip_prefix("https://")
            .or_else(|| url.strip_prefix("http://"))
            .unwrap_or(url);
        without_scheme.trim_end_matches('/').to_string()
    }
}

/// A linked integration account stored alongside sites
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DependentAccount {
    /// Account ID
    pub id: String,
    /// Login name
    pub username: String,
    /// When the account was linked
    pub created_at: DateTime<Utc>,
}

/// A post cached for a site
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: u64,
    pub site_id: SiteId,
    pub title: String,
}

/// A cached media reference
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaItem {
    pub id: u64,
    pub site_id: SiteId,
    pub remote_url: String,
}

/// A per-site setting
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteSetting {
    pub site_id: SiteId,
    pub key: String,
    pub value: String,
}

/// Counts of locally cached data owned by one site
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteContentSummary {
    pub posts: u64,
    pub media: u64,
    pub settings: u64,
}

impl SiteContentSummary {
    pub fn is_empty(&self) -> bool {
        self.posts == 0 && self.media == 0 && self.settings == 0
    }
}
