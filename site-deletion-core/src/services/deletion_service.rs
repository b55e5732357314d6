//! Site deletion service
//!
//! The single deletion entry point: remote delete, then local purge.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError};

use site_deletion_remote::SiteDeleteRemote;

use crate::error::CoreError;
use crate::types::{DeletionFailure, DeletionOutcome, Site, SiteId};

use super::{DeleteIntent, LocalPurgeCoordinator};

/// Site deletion service
pub struct DeletionService {
    remote: Arc<dyn SiteDeleteRemote>,
    purge_coordinator: Arc<LocalPurgeCoordinator>,
    in_flight: Mutex<HashSet<SiteId>>,
}

impl DeletionService {
    /// Create a deletion service instance
    #[must_use]
    pub fn new(
        remote: Arc<dyn SiteDeleteRemote>,
        purge_coordinator: Arc<LocalPurgeCoordinator>,
    ) -> Self {
        Self {
            remote,
            purge_coordinator,
            in_flight: Mutex::new(HashSet::new()),
        }
    }

    /// Consume a confirmed intent from the confirmation gate.
    pub async fn execute(&self, intent: DeleteIntent) -> DeletionOutcome {
        self.delete_site_for_blog(intent.site()).await
    }

    /// Permanently delete a site.
    ///
    /// Flow: eligibility -> in-flight claim -> remote delete -> local purge.
    /// Local data is only touched after the server confirmed the deletion of
    /// `site.id`; every other path leaves the store as it was.
    pub async fn delete_site_for_blog(&self, site: &Site) -> DeletionOutcome {
        if !site.supports_delete() {
            log::warn!("Refusing to delete site {}: not eligible", site.id);
            return DeletionOutcome::Failed(DeletionFailure::NotEligible { site_id: site.id });
        }

        let Some(_guard) = InFlightGuard::claim(&self.in_flight, site.id) else {
            log::warn!("Deletion of site {} is already in progress", site.id);
            return DeletionOutcome::Failed(DeletionFailure::AlreadyInProgress {
                site_id: site.id,
            });
        };

        // 1. Remote delete
        log::info!("Deleting site {} via {}", site.id, self.remote.id());
        if let Err(e) = self.remote.delete_site(site.id).await {
            if e.is_expected() {
                log::warn!("Remote deletion of site {} failed: {e}", site.id);
            } else {
                log::error!("Remote deletion of site {} failed: {e}", site.id);
            }
            return DeletionOutcome::Failed(DeletionFailure::from_remote(&e));
        }

        // 2. Local purge
        match self.purge_coordinator.purge(site).await {
            Ok(_) => {
                log::info!("Site {} deleted", site.id);
                DeletionOutcome::Deleted
            }
            Err(e) => {
                log::error!("Site {} deleted remotely but local purge failed: {e}", site.id);
                DeletionOutcome::Failed(purge_failure(e))
            }
        }
    }

    /// Whether a deletion of `site_id` is currently outstanding.
    pub fn is_in_flight(&self, site_id: SiteId) -> bool {
        self.in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(&site_id)
    }
}

fn purge_failure(err: CoreError) -> DeletionFailure {
    let detail = match err {
        CoreError::LocalPurgeFailure(detail) => detail,
        other => other.to_string(),
    };
    DeletionFailure::LocalPurgeFailure { detail }
}

/// Marks a site as being deleted until dropped.
struct InFlightGuard<'a> {
    set: &'a Mutex<HashSet<SiteId>>,
    site_id: SiteId,
}

impl<'a> InFlightGuard<'a> {
    fn claim(set: &'a Mutex<HashSet<SiteId>>, site_id: SiteId) -> Option<Self> {
        let inserted = set
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(site_id);
        inserted.then_some(Self { set, site_id })
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.set
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.site_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{create_test_deletion_service, test_site, MockRemote};
    use site_deletion_remote::RemoteError;

    #[tokio::test]
    async fn scenario_deleted_purges_once() {
        let remote = Arc::new(MockRemote::succeeding());
        let (service, ctx, store) = create_test_deletion_service(remote.clone());
        let site = test_site(42);
        store.seed_site_with_content(&site).await;

        let outcome = service.delete_site_for_blog(&site).await;

        assert_eq!(outcome, DeletionOutcome::Deleted);
        assert_eq!(remote.calls(), vec![SiteId(42)]);
        let plans = store.purge_plans().await;
        assert_eq!(plans.len(), 1);
        assert_eq!(plans[0].site_id, SiteId(42));
        assert!(matches!(ctx.site_repository.find_by_id(SiteId(42)).await, Ok(None)));
        let summary = ctx.content_repository.content_summary(SiteId(42)).await;
        assert!(summary.is_ok_and(|s| s.is_empty()));
        assert!(!service.is_in_flight(SiteId(42)));
    }

    #[tokio::test]
    async fn scenario_pending_is_service_rejected() {
        let remote = Arc::new(MockRemote::failing(RemoteError::ServiceRejected {
            site_id: SiteId(42),
            status: Some("pending".to_string()),
        }));
        let (service, ctx, store) = create_test_deletion_service(remote.clone());
        let site = test_site(42);
        store.seed_site_with_content(&site).await;

        let outcome = service.delete_site_for_blog(&site).await;

        assert!(matches!(
            outcome.failure(),
            Some(DeletionFailure::ServiceRejected { .. })
        ));
        assert!(store.purge_plans().await.is_empty());
        assert!(matches!(ctx.site_repository.find_by_id(SiteId(42)).await, Ok(Some(_))));
        let summary = ctx.content_repository.content_summary(SiteId(42)).await;
        assert!(summary.is_ok_and(|s| s.posts == 2));
    }

    #[tokio::test]
    async fn scenario_timeout_is_transport_error() {
        let remote = Arc::new(MockRemote::failing(RemoteError::Timeout {
            detail: "operation timed out".to_string(),
        }));
        let (service, ctx, store) = create_test_deletion_service(remote);
        let site = test_site(42);
        store.seed_site_with_content(&site).await;

        let outcome = service.delete_site_for_blog(&site).await;

        let Some(DeletionFailure::TransportError { detail }) = outcome.failure() else {
            unreachable!("expected a transport error, got {outcome:?}");
        };
        assert!(detail.contains("timed out"));
        assert!(store.purge_plans().await.is_empty());
        assert!(matches!(ctx.site_repository.find_by_id(SiteId(42)).await, Ok(Some(_))));
    }

    #[tokio::test]
    async fn ineligible_site_never_reaches_remote() {
        let remote = Arc::new(MockRemote::succeeding());
        let (service, _, store) = create_test_deletion_service(remote.clone());

        for (is_admin, hosted) in [(false, true), (true, false), (false, false)] {
            let mut site = test_site(42);
            site.is_admin = is_admin;
            site.is_hosted_on_platform = hosted;
            let outcome = service.delete_site_for_blog(&site).await;
            assert_eq!(
                outcome,
                DeletionOutcome::Failed(DeletionFailure::NotEligible { site_id: SiteId(42) })
            );
        }

        assert!(remote.calls().is_empty());
        assert!(store.purge_plans().await.is_empty());
    }

    #[tokio::test]
    async fn purge_failure_is_reported_after_remote_success() {
        let remote = Arc::new(MockRemote::succeeding());
        let (service, ctx, store) = create_test_deletion_service(remote.clone());
        let site = test_site(42);
        store.seed_site_with_content(&site).await;
        store.fail_next_purge("database is locked").await;

        let outcome = service.delete_site_for_blog(&site).await;

        let Some(failure) = outcome.failure() else {
            unreachable!("purge failure must not report success");
        };
        assert!(failure.remote_deleted());
        assert!(failure.reason().contains("database is locked"));
        assert_eq!(remote.calls().len(), 1);
        assert!(matches!(ctx.site_repository.find_by_id(SiteId(42)).await, Ok(Some(_))));
    }

    #[tokio::test]
    async fn concurrent_attempt_is_refused() {
        let remote = Arc::new(MockRemote::succeeding().held());
        let (service, _, store) = create_test_deletion_service(remote.clone());
        let site = test_site(42);
        store.seed_site_with_content(&site).await;

        let first = service.delete_site_for_blog(&site);
        let second = async {
            remote.wait_until_called().await;
            assert!(service.is_in_flight(SiteId(42)));
            let outcome = service.delete_site_for_blog(&site).await;
            remote.release();
            outcome
        };

        let (first, second) = tokio::join!(first, second);

        assert_eq!(first, DeletionOutcome::Deleted);
        assert_eq!(
            second,
            DeletionOutcome::Failed(DeletionFailure::AlreadyInProgress { site_id: SiteId(42) })
        );
        assert_eq!(remote.calls(), vec![SiteId(42)]);
        assert_eq!(store.purge_plans().await.len(), 1);
        assert!(!service.is_in_flight(SiteId(42)));
    }

    #[tokio::test]
    async fn failed_attempt_releases_in_flight_claim() {
        let remote = Arc::new(MockRemote::failing(RemoteError::NetworkError {
            detail: "connection refused".to_string(),
        }));
        let (service, _, _) = create_test_deletion_service(remote.clone());
        let site = test_site(42);

        let first = service.delete_site_for_blog(&site).await;
        let second = service.delete_site_for_blog(&site).await;

        assert!(matches!(first.failure(), Some(DeletionFailure::TransportError { .. })));
        assert!(matches!(second.failure(), Some(DeletionFailure::TransportError { .. })));
        assert_eq!(remote.calls().len(), 2);
    }
}
