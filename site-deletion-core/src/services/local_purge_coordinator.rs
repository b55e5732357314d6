//! Local purge after a confirmed remote deletion
//!
//! Flow: cancel site traffic -> plan (reference count) -> atomic purge -> refresh

use std::sync::Arc;

use chrono::Utc;

use crate::error::{CoreError, CoreResult};
use crate::services::ServiceContext;
use crate::traits::MetadataRefresh;
use crate::types::{PurgePlan, PurgeReport, Site};

/// Local purge coordinator
pub struct LocalPurgeCoordinator {
    ctx: Arc<ServiceContext>,
}

impl LocalPurgeCoordinator {
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self { ctx }
    }

    /// Remove every local representation of `site`.
    ///
    /// Only call this after the server confirmed the deletion of `site.id`.
    ///
    /// # Errors
    /// `CoreError::LocalPurgeFailure` when the plan cannot be computed or the
    /// transaction does not commit. In both cases nothing was removed.
    pub async fn purge(&self, site: &Site) -> CoreResult<PurgeReport> {
        let cancelled_requests = self.ctx.request_registry.cancel_site(site.id).await;
        if cancelled_requests > 0 {
            log::info!("Cancelled {cancelled_requests} in-flight request(s) for site {}", site.id);
        }

        let plan = self.plan(site).await.map_err(into_purge_failure)?;
        log::debug!("Purge plan for site {}: {plan:?}", site.id);

        let rows = self
            .ctx
            .site_repository
            .purge(&plan)
            .await
            .map_err(into_purge_failure)?;

        if !rows.site_removed {
            log::warn!("Site {} was not in the local store at purge time", site.id);
        }

        self.ctx
            .metadata_refresher
            .refresh(MetadataRefresh::SiteRemoved(site.id));

        let report = PurgeReport {
            site_id: site.id,
            posts_removed: rows.posts,
            media_removed: rows.media,
            settings_removed: rows.settings,
            purged_account: plan.purge_account.filter(|_| rows.account_removed),
            cancelled_requests,
            purged_at: Utc::now(),
        };
        log::info!(
            "Purged site {}: {} post(s), {} media, {} setting(s), account: {}",
            report.site_id,
            report.posts_removed,
            report.media_removed,
            report.settings_removed,
            report.purged_account.as_deref().unwrap_or("none"),
        );

        Ok(report)
    }

    /// Decide what the transaction removes.
    ///
    /// The dependent account goes only when no other site references it.
    async fn plan(&self, site: &Site) -> CoreResult<PurgePlan> {
        let Some(account_id) = site.dependent_account_id.clone() else {
            return Ok(PurgePlan::site_only(site.id));
        };

        let other_references = self
            .ctx
            .site_repository
            .count_referencing_account(&account_id, site.id)
            .await?;

        if other_references == 0 {
            Ok(PurgePlan {
                site_id: site.id,
                purge_account: Some(account_id),
                retained_account: None,
            })
        } else {
            log::info!(
                "Keeping account {account_id}: still referenced by {other_references} other site(s)"
            );
            Ok(PurgePlan {
                site_id: site.id,
                purge_account: None,
                retained_account: Some(account_id),
            })
        }
    }
}

fn into_purge_failure(err: CoreError) -> CoreError {
    match err {
        CoreError::LocalPurgeFailure(_) => err,
        other => CoreError::LocalPurgeFailure(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{create_test_context, test_account, test_site};
    use crate::types::SiteId;

    #[tokio::test]
    async fn purge_removes_site_and_exclusive_data() {
        let (ctx, store, refresher) = create_test_context();
        let site = test_site(42);
        store.seed_site_with_content(&site).await;
        store.seed_site_with_content(&test_site(7)).await;

        let coordinator = LocalPurgeCoordinator::new(ctx.clone());
        let report = coordinator.purge(&site).await;
        assert!(report.is_ok());
        let Ok(report) = report else { return };

        assert_eq!(report.site_id, SiteId(42));
        assert_eq!(report.posts_removed, 2);
        assert_eq!(report.media_removed, 1);
        assert_eq!(report.settings_removed, 1);

        assert!(matches!(ctx.site_repository.find_by_id(SiteId(42)).await, Ok(None)));
        let summary = ctx.content_repository.content_summary(SiteId(42)).await;
        assert!(summary.is_ok_and(|s| s.is_empty()));

        // Unrelated site untouched
        assert!(matches!(ctx.site_repository.find_by_id(SiteId(7)).await, Ok(Some(_))));
        let other = ctx.content_repository.content_summary(SiteId(7)).await;
        assert!(other.is_ok_and(|s| s.posts == 2));

        assert_eq!(refresher.events(), vec![MetadataRefresh::SiteRemoved(SiteId(42))]);
    }

    #[tokio::test]
    async fn orphaned_account_is_purged() {
        let (ctx, store, _) = create_test_context();
        let account = test_account("acct-1");
        store.seed_account(&account).await;
        let mut site = test_site(42);
        site.dependent_account_id = Some(account.id.clone());
        store.seed_site_with_content(&site).await;

        let coordinator = LocalPurgeCoordinator::new(ctx.clone());
        let report = coordinator.purge(&site).await;
        assert!(report.is_ok_and(|r| r.purged_account.as_deref() == Some("acct-1")));
        assert!(matches!(ctx.account_repository.find_by_id("acct-1").await, Ok(None)));
    }

    #[tokio::test]
    async fn shared_account_is_retained() {
        let (ctx, store, _) = create_test_context();
        let account = test_account("acct-1");
        store.seed_account(&account).await;
        let mut site = test_site(42);
        site.dependent_account_id = Some(account.id.clone());
        let mut sibling = test_site(43);
        sibling.dependent_account_id = Some(account.id.clone());
        store.seed_site_with_content(&site).await;
        store.seed_site_with_content(&sibling).await;

        let coordinator = LocalPurgeCoordinator::new(ctx.clone());
        let report = coordinator.purge(&site).await;
        assert!(report.is_ok_and(|r| r.purged_account.is_none()));
        assert!(matches!(ctx.account_repository.find_by_id("acct-1").await, Ok(Some(_))));

        let plans = store.purge_plans().await;
        assert_eq!(plans.len(), 1);
        assert_eq!(plans[0].retained_account.as_deref(), Some("acct-1"));

        // Purging the last referencer removes the account
        let report = coordinator.purge(&sibling).await;
        assert!(report.is_ok_and(|r| r.purged_account.as_deref() == Some("acct-1")));
        assert!(matches!(ctx.account_repository.find_by_id("acct-1").await, Ok(None)));
    }

    #[tokio::test]
    async fn failed_commit_leaves_store_unchanged() {
        let (ctx, store, refresher) = create_test_context();
        let account = test_account("acct-1");
        store.seed_account(&account).await;
        let mut site = test_site(42);
        site.dependent_account_id = Some(account.id.clone());
        store.seed_site_with_content(&site).await;
        store.fail_next_purge("disk I/O error").await;

        let coordinator = LocalPurgeCoordinator::new(ctx.clone());
        let result = coordinator.purge(&site).await;
        assert!(matches!(result, Err(CoreError::LocalPurgeFailure(_))));

        assert!(matches!(ctx.site_repository.find_by_id(SiteId(42)).await, Ok(Some(_))));
        assert!(matches!(ctx.account_repository.find_by_id("acct-1").await, Ok(Some(_))));
        let summary = ctx.content_repository.content_summary(SiteId(42)).await;
        assert!(summary.is_ok_and(|s| s.posts == 2 && s.media == 1 && s.settings == 1));
        assert!(refresher.events().is_empty());
    }

    #[tokio::test]
    async fn missing_site_still_succeeds() {
        let (ctx, _, refresher) = create_test_context();
        let coordinator = LocalPurgeCoordinator::new(ctx);
        let report = coordinator.purge(&test_site(42)).await;
        assert!(report.is_ok_and(|r| r.posts_removed == 0));
        assert_eq!(refresher.events().len(), 1);
    }

    #[tokio::test]
    async fn purge_cancels_site_requests() {
        let (ctx, _, _) = create_test_context();
        let (handle, _registration) = futures::future::AbortHandle::new_pair();
        ctx.request_registry.register(SiteId(42), handle.clone()).await;
        let (other, _other_registration) = futures::future::AbortHandle::new_pair();
        ctx.request_registry.register(SiteId(7), other.clone()).await;

        let coordinator = LocalPurgeCoordinator::new(ctx.clone());
        let report = coordinator.purge(&test_site(42)).await;

        assert!(report.is_ok_and(|r| r.cancelled_requests == 1));
        assert!(handle.is_aborted());
        assert!(!other.is_aborted());
        assert_eq!(ctx.request_registry.in_flight(SiteId(7)).await, 1);
    }
}
