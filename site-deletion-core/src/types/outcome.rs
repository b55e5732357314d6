//! Deletion outcome and purge bookkeeping types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use site_deletion_remote::{RemoteError, SiteId};

/// Why a deletion attempt failed
///
/// Every variant renders a message suitable for showing to the user via
/// [`DeletionFailure::reason`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "code", rename_all = "camelCase")]
pub enum DeletionFailure {
    /// Network, connection, timeout or non-2xx failure
    TransportError { detail: String },
    /// The server answered but did not confirm the deletion
    ServiceRejected { detail: String },
    /// The site was deleted remotely but local data could not be removed
    LocalPurgeFailure { detail: String },
    /// The site is not eligible for deletion from this client
    NotEligible { site_id: SiteId },
    /// Another deletion of the same site is still outstanding
    AlreadyInProgress { site_id: SiteId },
}

impl DeletionFailure {
    /// Classify a remote error.
    pub fn from_remote(err: &RemoteError) -> Self {
        match err {
            RemoteError::ServiceRejected { .. } => Self::ServiceRejected {
                detail: err.to_string(),
            },
            _ => Self::TransportError {
                detail: err.to_string(),
            },
        }
    }

    /// Human-readable reason for direct display.
    pub fn reason(&self) -> String {
        match self {
            Self::TransportError { detail } => format!("The site could not be deleted: {detail}"),
            Self::ServiceRejected { detail } => detail.clone(),
            Self::LocalPurgeFailure { detail } => format!(
                "The site was deleted on the server, but its local data could not be removed: {detail}"
            ),
            Self::NotEligible { site_id } => {
                format!("Site {site_id} can only be deleted by an administrator of a hosted site.")
            }
            Self::AlreadyInProgress { site_id } => {
                format!("Site {site_id} is already being deleted.")
            }
        }
    }

    /// Whether the remote site is already gone even though the attempt failed.
    pub fn remote_deleted(&self) -> bool {
        matches!(self, Self::LocalPurgeFailure { .. })
    }
}

impl std::fmt::Display for DeletionFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.reason())
    }
}

/// Result of one deletion attempt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", content = "failure", rename_all = "camelCase")]
pub enum DeletionOutcome {
    /// Remote site deleted and local data purged
    Deleted,
    /// Nothing was claimed deleted; see the failure for what happened
    Failed(DeletionFailure),
}

impl DeletionOutcome {
    pub fn is_deleted(&self) -> bool {
        matches!(self, Self::Deleted)
    }

    pub fn failure(&self) -> Option<&DeletionFailure> {
        match self {
            Self::Deleted => None,
            Self::Failed(failure) => Some(failure),
        }
    }
}

/// What one purge transaction will remove
///
/// The dependent account decision is made before the transaction starts, from
/// an explicit reference count, so the scope of the transaction can be logged
/// and checked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurgePlan {
    /// Site whose record and exclusive data are removed
    pub site_id: SiteId,
    /// Dependent account removed with the site (only when no other site references it)
    pub purge_account: Option<String>,
    /// Dependent account kept because other sites still reference it
    pub retained_account: Option<String>,
}

impl PurgePlan {
    /// Plan that removes only the site and its exclusive data.
    pub fn site_only(site_id: SiteId) -> Self {
        Self {
            site_id,
            purge_account: None,
            retained_account: None,
        }
    }
}

/// Row counts removed by one purge transaction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurgedRows {
    pub site_removed: bool,
    pub posts: u64,
    pub media: u64,
    pub settings: u64,
    pub account_removed: bool,
}

/// Summary of a completed local purge
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurgeReport {
    pub site_id: SiteId,
    pub posts_removed: u64,
    pub media_removed: u64,
    pub settings_removed: u64,
    pub purged_account: Option<String>,
    pub cancelled_requests: usize,
    pub purged_at: DateTime<Utc>,
}
