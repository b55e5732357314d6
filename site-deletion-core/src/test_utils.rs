//! Test helper module
//!
//! Provides mock implementations and convenient test factory methods.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use chrono::Utc;
use site_deletion_remote::{RemoteError, SiteDeleteRemote};
use tokio::sync::{Notify, RwLock};

use crate::error::{CoreError, CoreResult};
use crate::services::{DeletionService, LocalPurgeCoordinator, ServiceContext};
use crate::traits::{
    AccountRepository, InMemoryRequestScopeRegistry, MetadataRefresh, MetadataRefresher,
    SiteContentRepository, SiteRepository,
};
use crate::types::{
    DependentAccount, MediaItem, Post, PurgePlan, PurgedRows, Site, SiteContentSummary, SiteId,
    SiteSetting,
};

// ===== MockLocalStore =====

#[derive(Clone, Default)]
struct LocalData {
    sites: HashMap<SiteId, Site>,
    posts: Vec<Post>,
    media: Vec<MediaItem>,
    settings: Vec<SiteSetting>,
    accounts: HashMap<String, DependentAccount>,
}

/// In-memory store implementing every repository trait.
///
/// `purge` works on a copy and only swaps it in at the end, so an injected
/// failure leaves the visible data untouched.
#[derive(Default)]
pub struct MockLocalStore {
    data: RwLock<LocalData>,
    /// If Some, the next purge fails with this message after removing some rows
    purge_error: RwLock<Option<String>>,
    purge_plans: RwLock<Vec<PurgePlan>>,
}

impl MockLocalStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `site` with two posts, one media item and one setting.
    pub async fn seed_site_with_content(&self, site: &Site) {
        let mut data = self.data.write().await;
        data.sites.insert(site.id, site.clone());
        let base = site.id.get() * 100;
        for n in 1..=2 {
            data.posts.push(Post {
                id: base + n,
                site_id: site.id,
                title: format!("Post {n}"),
            });
        }
        data.media.push(MediaItem {
            id: base + 1,
            site_id: site.id,
            remote_url: format!("{}/wp-content/uploads/image.png", site.url),
        });
        data.settings.push(SiteSetting {
            site_id: site.id,
            key: "timezone".to_string(),
            value: "UTC".to_string(),
        });
    }

    pub async fn seed_account(&self, account: &DependentAccount) {
        self.data
            .write()
            .await
            .accounts
            .insert(account.id.clone(), account.clone());
    }

    pub async fn fail_next_purge(&self, message: &str) {
        *self.purge_error.write().await = Some(message.to_string());
    }

    /// Plans received by `purge`, in call order.
    pub async fn purge_plans(&self) -> Vec<PurgePlan> {
        self.purge_plans.read().await.clone()
    }
}

#[async_trait]
impl SiteRepository for MockLocalStore {
    async fn find_all(&self) -> CoreResult<Vec<Site>> {
        Ok(self.data.read().await.sites.values().cloned().collect())
    }

    async fn find_by_id(&self, id: SiteId) -> CoreResult<Option<Site>> {
        Ok(self.data.read().await.sites.get(&id).cloned())
    }

    async fn save(&self, site: &Site) -> CoreResult<()> {
        self.data.write().await.sites.insert(site.id, site.clone());
        Ok(())
    }

    async fn count_referencing_account(
        &self,
        account_id: &str,
        excluding: SiteId,
    ) -> CoreResult<u64> {
        let data = self.data.read().await;
        let count = data
            .sites
            .values()
            .filter(|s| s.id != excluding)
            .filter(|s| s.dependent_account_id.as_deref() == Some(account_id))
            .count();
        Ok(count as u64)
    }

    async fn purge(&self, plan: &PurgePlan) -> CoreResult<PurgedRows> {
        self.purge_plans.write().await.push(plan.clone());

        let mut data = self.data.write().await;
        let mut working = data.clone();
        let mut rows = PurgedRows::default();

        if let Some(account_id) = &plan.purge_account {
            rows.account_removed = working.accounts.remove(account_id).is_some();
        }
        let before = working.posts.len();
        working.posts.retain(|p| p.site_id != plan.site_id);
        rows.posts = (before - working.posts.len()) as u64;

        if let Some(message) = self.purge_error.write().await.take() {
            return Err(CoreError::StorageError(message));
        }

        let before = working.media.len();
        working.media.retain(|m| m.site_id != plan.site_id);
        rows.media = (before - working.media.len()) as u64;
        let before = working.settings.len();
        working.settings.retain(|s| s.site_id != plan.site_id);
        rows.settings = (before - working.settings.len()) as u64;
        rows.site_removed = working.sites.remove(&plan.site_id).is_some();

        *data = working;
        Ok(rows)
    }
}

#[async_trait]
impl SiteContentRepository for MockLocalStore {
    async fn save_post(&self, post: &Post) -> CoreResult<()> {
        self.data.write().await.posts.push(post.clone());
        Ok(())
    }

    async fn save_media(&self, media: &MediaItem) -> CoreResult<()> {
        self.data.write().await.media.push(media.clone());
        Ok(())
    }

    async fn save_setting(&self, setting: &SiteSetting) -> CoreResult<()> {
        let mut data = self.data.write().await;
        data.settings
            .retain(|s| !(s.site_id == setting.site_id && s.key == setting.key));
        data.settings.push(setting.clone());
        Ok(())
    }

    async fn content_summary(&self, site_id: SiteId) -> CoreResult<SiteContentSummary> {
        let data = self.data.read().await;
        Ok(SiteContentSummary {
            posts: data.posts.iter().filter(|p| p.site_id == site_id).count() as u64,
            media: data.media.iter().filter(|m| m.site_id == site_id).count() as u64,
            settings: data.settings.iter().filter(|s| s.site_id == site_id).count() as u64,
        })
    }
}

#[async_trait]
impl AccountRepository for MockLocalStore {
    async fn find_all(&self) -> CoreResult<Vec<DependentAccount>> {
        Ok(self.data.read().await.accounts.values().cloned().collect())
    }

    async fn find_by_id(&self, id: &str) -> CoreResult<Option<DependentAccount>> {
        Ok(self.data.read().await.accounts.get(id).cloned())
    }

    async fn save(&self, account: &DependentAccount) -> CoreResult<()> {
        self.seed_account(account).await;
        Ok(())
    }
}

// ===== MockRemote =====

/// Scripted remote client that records every call.
pub struct MockRemote {
    error: Option<RemoteError>,
    calls: Mutex<Vec<SiteId>>,
    hold: bool,
    called: Notify,
    gate: Notify,
}

impl MockRemote {
    /// Every call confirms the deletion.
    pub fn succeeding() -> Self {
        Self::with_result(None)
    }

    /// Every call fails with `error`.
    pub fn failing(error: RemoteError) -> Self {
        Self::with_result(Some(error))
    }

    fn with_result(error: Option<RemoteError>) -> Self {
        Self {
            error,
            calls: Mutex::new(Vec::new()),
            hold: false,
            called: Notify::new(),
            gate: Notify::new(),
        }
    }

    /// Calls block until [`MockRemote::release`].
    pub fn held(mut self) -> Self {
        self.hold = true;
        self
    }

    pub fn calls(&self) -> Vec<SiteId> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub async fn wait_until_called(&self) {
        self.called.notified().await;
    }

    pub fn release(&self) {
        self.gate.notify_one();
    }
}

#[async_trait]
impl SiteDeleteRemote for MockRemote {
    fn id(&self) -> &'static str {
        "mock"
    }

    async fn delete_site(&self, site_id: SiteId) -> site_deletion_remote::Result<()> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(site_id);
        self.called.notify_one();
        if self.hold {
            self.gate.notified().await;
        }
        match &self.error {
            None => Ok(()),
            Some(e) => Err(e.clone()),
        }
    }
}

// ===== CountingRefresher =====

#[derive(Default)]
pub struct CountingRefresher {
    events: Mutex<Vec<MetadataRefresh>>,
}

impl CountingRefresher {
    pub fn events(&self) -> Vec<MetadataRefresh> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl MetadataRefresher for CountingRefresher {
    fn refresh(&self, event: MetadataRefresh) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
    }
}

// ===== Factory methods =====

/// Create a test `ServiceContext` backed by one `MockLocalStore`
pub fn create_test_context() -> (
    Arc<ServiceContext>,
    Arc<MockLocalStore>,
    Arc<CountingRefresher>,
) {
    let store = Arc::new(MockLocalStore::new());
    let refresher = Arc::new(CountingRefresher::default());

    let ctx = Arc::new(ServiceContext::new(
        store.clone(),
        store.clone(),
        store.clone(),
        Arc::new(InMemoryRequestScopeRegistry::new()),
        refresher.clone(),
    ));

    (ctx, store, refresher)
}

/// Create a test `DeletionService` around `remote`
pub fn create_test_deletion_service(
    remote: Arc<MockRemote>,
) -> (DeletionService, Arc<ServiceContext>, Arc<MockLocalStore>) {
    let (ctx, store, _) = create_test_context();
    let coordinator = Arc::new(LocalPurgeCoordinator::new(ctx.clone()));
    (DeletionService::new(remote, coordinator), ctx, store)
}

/// An eligible site at `https://site{id}.example.com`
pub fn test_site(id: u64) -> Site {
    Site {
        id: SiteId(id),
        name: format!("Site {id}"),
        url: format!("https://site{id}.example.com"),
        is_admin: true,
        is_hosted_on_platform: true,
        dependent_account_id: None,
    }
}

pub fn test_account(id: &str) -> DependentAccount {
    DependentAccount {
        id: id.to_string(),
        username: format!("{id}-login"),
        created_at: Utc::now(),
    }
}
