//! Dependent account persistence abstract Trait

use async_trait::async_trait;

use crate::error::CoreResult;
use crate::types::DependentAccount;

/// Dependent account repository Trait
///
/// Accounts are only ever removed through
/// [`SiteRepository::purge`](super::SiteRepository::purge), so that removal
/// shares the site purge transaction. This trait has no `delete`.
///
/// Platform implementation:
/// - `SqliteStore` (`SeaORM`)
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Get all accounts
    async fn find_all(&self) -> CoreResult<Vec<DependentAccount>>;

    /// Get account by ID
    ///
    /// # Arguments
    /// * `id` - Account ID
    async fn find_by_id(&self, id: &str) -> CoreResult<Option<DependentAccount>>;

    /// Save account (new or update)
    ///
    /// # Arguments
    /// * `account` - Account data
    async fn save(&self, account: &DependentAccount) -> CoreResult<()>;
}
