//! Site Deletion Core Library
//!
//! Platform-independent site deletion workflow:
//! - `ConfirmationGate`: the user retypes the site address before anything happens
//! - `DeletionService`: remote delete, then local purge, one outcome per call
//! - `LocalPurgeCoordinator`: cancels site traffic and removes the site, its
//!   exclusive data and an orphaned dependent account in one transaction
//!
//! Storage is abstracted through traits; `site-deletion-app` provides the
//! `SQLite` implementation.
//!
//! ```ignore
//! let mut gate = ConfirmationGate::new();
//! gate.open(site)?;
//! gate.update_input("example.com")?;
//! let outcome = deletion_service.execute(gate.confirm()?).await;
//! ```

pub mod error;
pub mod services;
pub mod traits;
pub mod types;

#[cfg(test)]
mod test_utils;

// Re-export common types
pub use error::{CoreError, CoreResult};
pub use services::{
    ConfirmationGate, DeleteIntent, DeletionService, LocalPurgeCoordinator, ServiceContext,
};
pub use traits::{
    AccountRepository, MetadataRefresher, RequestScopeRegistry, SiteContentRepository,
    SiteRepository,
};
pub use types::{DeletionFailure, DeletionOutcome, Site, SiteId};
