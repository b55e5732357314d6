//! Site persistence abstract Trait

use async_trait::async_trait;

use crate::error::CoreResult;
use crate::types::{
    MediaItem, Post, PurgePlan, PurgedRows, Site, SiteContentSummary, SiteId, SiteSetting,
};

/// Site repository Trait
///
/// Platform implementation:
/// - `SqliteStore` (`SeaORM`)
#[async_trait]
pub trait SiteRepository: Send + Sync {
    /// Get all sites
    async fn find_all(&self) -> CoreResult<Vec<Site>>;

    /// Get site by ID
    async fn find_by_id(&self, id: SiteId) -> CoreResult<Option<Site>>;

    /// Save site (new or update)
    async fn save(&self, site: &Site) -> CoreResult<()>;

    /// Number of sites other than `excluding` that link to `account_id`
    ///
    /// Used for the "last referencer" check before a dependent account is purged.
    async fn count_referencing_account(
        &self,
        account_id: &str,
        excluding: SiteId,
    ) -> CoreResult<u64>;

    /// Remove everything described by `plan` in one atomic transaction
    ///
    /// Order inside the transaction: dependent account, then posts, media,
    /// settings, and finally the site record.
    ///
    /// # Returns
    /// * `Ok(rows)` - every removal committed; `rows.site_removed` is `false`
    ///   when the site was already absent
    /// * `Err(_)` - nothing was removed
    async fn purge(&self, plan: &PurgePlan) -> CoreResult<PurgedRows>;
}

/// Site content repository Trait (posts, media references, settings)
#[async_trait]
pub trait SiteContentRepository: Send + Sync {
    /// Save a post
    async fn save_post(&self, post: &Post) -> CoreResult<()>;

    /// Save a media reference
    async fn save_media(&self, media: &MediaItem) -> CoreResult<()>;

    /// Save a setting (upsert on `site_id` + `key`)
    async fn save_setting(&self, setting: &SiteSetting) -> CoreResult<()>;

    /// Count the cached data owned by a site
    async fn content_summary(&self, site_id: SiteId) -> CoreResult<SiteContentSummary>;
}
