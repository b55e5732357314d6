//! Platform-agnostic application bootstrap for the site deletion workflow.
//!
//! Provides `AppConfig` (file + environment configuration), `AppState`
//! (service container) and `AppStateBuilder` (adapter injection).

pub mod adapters;
pub mod config;

use std::sync::Arc;

use site_deletion_core::error::{CoreError, CoreResult};
use site_deletion_core::services::{
    ConfirmationGate, DeleteIntent, DeletionService, LocalPurgeCoordinator, ServiceContext,
};
use site_deletion_core::traits::{
    AccountRepository, InMemoryRequestScopeRegistry, MetadataRefresher, NoopMetadataRefresher,
    RequestScopeRegistry, SiteContentRepository, SiteRepository,
};
use site_deletion_core::types::{DeletionOutcome, Site, SiteId};
use site_deletion_remote::{RestDeleteClient, SiteDeleteRemote};

pub use config::AppConfig;

/// Platform-agnostic application state.
///
/// Holds all services and the `ServiceContext`. Every frontend constructs this
/// once at startup via `AppStateBuilder`.
pub struct AppState {
    /// Service context (holds all storage adapters)
    pub ctx: Arc<ServiceContext>,
    /// Local purge coordinator
    pub purge_coordinator: Arc<LocalPurgeCoordinator>,
    /// Deletion service
    pub deletion_service: DeletionService,
}

impl AppState {
    /// Load a site from the local store.
    pub async fn site(&self, site_id: SiteId) -> CoreResult<Site> {
        self.ctx
            .site_repository
            .find_by_id(site_id)
            .await?
            .ok_or(CoreError::SiteNotFound(site_id))
    }

    /// Load a site and open a confirmation gate expecting its display URL.
    pub async fn open_confirmation(&self, site_id: SiteId) -> CoreResult<ConfirmationGate> {
        let site = self.site(site_id).await?;
        let mut gate = ConfirmationGate::new();
        gate.open(site)?;
        Ok(gate)
    }

    /// Run a confirmed deletion.
    pub async fn delete_confirmed(&self, intent: DeleteIntent) -> DeletionOutcome {
        self.deletion_service.execute(intent).await
    }
}

/// Builder for constructing `AppState` with platform-specific adapters.
///
/// # Required adapters
/// - `site_repository`
/// - `content_repository`
/// - `account_repository`
/// - `remote` (or `client_options` via [`AppStateBuilder::config`])
///
/// # Optional
/// - `request_registry` — defaults to `InMemoryRequestScopeRegistry`
/// - `metadata_refresher` — defaults to `NoopMetadataRefresher`
pub struct AppStateBuilder {
    site_repository: Option<Arc<dyn SiteRepository>>,
    content_repository: Option<Arc<dyn SiteContentRepository>>,
    account_repository: Option<Arc<dyn AccountRepository>>,
    remote: Option<Arc<dyn SiteDeleteRemote>>,
    config: Option<AppConfig>,
    request_registry: Option<Arc<dyn RequestScopeRegistry>>,
    metadata_refresher: Option<Arc<dyn MetadataRefresher>>,
}

impl AppStateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            site_repository: None,
            content_repository: None,
            account_repository: None,
            remote: None,
            config: None,
            request_registry: None,
            metadata_refresher: None,
        }
    }

    #[must_use]
    pub fn site_repository(mut self, repo: Arc<dyn SiteRepository>) -> Self {
        self.site_repository = Some(repo);
        self
    }

    #[must_use]
    pub fn content_repository(mut self, repo: Arc<dyn SiteContentRepository>) -> Self {
        self.content_repository = Some(repo);
        self
    }

    #[must_use]
    pub fn account_repository(mut self, repo: Arc<dyn AccountRepository>) -> Self {
        self.account_repository = Some(repo);
        self
    }

    /// Use one `SqliteStore` for every repository.
    #[cfg(feature = "sqlite-store")]
    #[must_use]
    pub fn sqlite_store(self, store: Arc<adapters::SqliteStore>) -> Self {
        self.site_repository(store.clone())
            .content_repository(store.clone())
            .account_repository(store)
    }

    #[must_use]
    pub fn remote(mut self, remote: Arc<dyn SiteDeleteRemote>) -> Self {
        self.remote = Some(remote);
        self
    }

    /// Build a `RestDeleteClient` from `config` unless `remote` is set.
    #[must_use]
    pub fn config(mut self, config: AppConfig) -> Self {
        self.config = Some(config);
        self
    }

    #[must_use]
    pub fn request_registry(mut self, registry: Arc<dyn RequestScopeRegistry>) -> Self {
        self.request_registry = Some(registry);
        self
    }

    #[must_use]
    pub fn metadata_refresher(mut self, refresher: Arc<dyn MetadataRefresher>) -> Self {
        self.metadata_refresher = Some(refresher);
        self
    }

    /// Build the `AppState`.
    ///
    /// # Errors
    /// Returns `CoreError::ValidationError` if required adapters are missing
    /// or the config does not validate.
    pub fn build(self) -> CoreResult<AppState> {
        let site_repository = self.site_repository.ok_or_else(|| {
            CoreError::ValidationError("site_repository is required".to_string())
        })?;
        let content_repository = self.content_repository.ok_or_else(|| {
            CoreError::ValidationError("content_repository is required".to_string())
        })?;
        let account_repository = self.account_repository.ok_or_else(|| {
            CoreError::ValidationError("account_repository is required".to_string())
        })?;
        let remote: Arc<dyn SiteDeleteRemote> = match (self.remote, self.config) {
            (Some(remote), _) => remote,
            (None, Some(config)) => {
                config.validate()?;
                Arc::new(RestDeleteClient::new(config.client_options())?)
            }
            (None, None) => {
                return Err(CoreError::ValidationError(
                    "remote or config is required".to_string(),
                ))
            }
        };
        let request_registry = self
            .request_registry
            .unwrap_or_else(|| Arc::new(InMemoryRequestScopeRegistry::new()));
        let metadata_refresher = self
            .metadata_refresher
            .unwrap_or_else(|| Arc::new(NoopMetadataRefresher));

        let ctx = Arc::new(ServiceContext::new(
            site_repository,
            content_repository,
            account_repository,
            request_registry,
            metadata_refresher,
        ));

        let purge_coordinator = Arc::new(LocalPurgeCoordinator::new(Arc::clone(&ctx)));
        let deletion_service = DeletionService::new(remote, Arc::clone(&purge_coordinator));

        Ok(AppState {
            ctx,
            purge_coordinator,
            deletion_service,
        })
    }
}

impl Default for AppStateBuilder {
    fn default() -> Self {
        Self::new()
    }
}
