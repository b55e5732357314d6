//! Business logic service layer

mod confirmation_gate;
mod deletion_service;
mod local_purge_coordinator;

pub use confirmation_gate::{ConfirmationGate, DeleteIntent};
pub use deletion_service::DeletionService;
pub use local_purge_coordinator::LocalPurgeCoordinator;

use std::sync::Arc;

use crate::traits::{
    AccountRepository, MetadataRefresher, RequestScopeRegistry, SiteContentRepository,
    SiteRepository,
};

/// Service context - holds all dependencies
///
/// The platform layer creates this context and injects its storage implementations.
pub struct ServiceContext {
    /// Site persistence repository
    pub site_repository: Arc<dyn SiteRepository>,
    /// Posts, media and settings repository
    pub content_repository: Arc<dyn SiteContentRepository>,
    /// Dependent account repository
    pub account_repository: Arc<dyn AccountRepository>,
    /// Site-scoped request registry
    pub request_registry: Arc<dyn RequestScopeRegistry>,
    /// Downstream metadata refresh hook
    pub metadata_refresher: Arc<dyn MetadataRefresher>,
}

impl ServiceContext {
    /// Create service context
    #[must_use]
    pub fn new(
        site_repository: Arc<dyn SiteRepository>,
        content_repository: Arc<dyn SiteContentRepository>,
        account_repository: Arc<dyn AccountRepository>,
        request_registry: Arc<dyn RequestScopeRegistry>,
        metadata_refresher: Arc<dyn MetadataRefresher>,
    ) -> Self {
        Self {
            site_repository,
            content_repository,
            account_repository,
            request_registry,
            metadata_refresher,
        }
    }
}
