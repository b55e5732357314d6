//! Type definition module

mod confirmation;
mod outcome;
mod site;

pub use confirmation::{ConfirmationState, GatePhase};
pub use outcome::{
    DeletionFailure, DeletionOutcome, PurgePlan, PurgeReport, PurgedRows,
};
pub use site::{DependentAccount, MediaItem, Post, Site, SiteContentSummary, SiteSetting};

// Re-export public types from the remote client library
pub use site_deletion_remote::{ClientOptions, RemoteError, SiteId};
