//! SQLite-based unified store using `SeaORM`.
//!
//! A single `SqliteStore` implements `SiteRepository`, `SiteContentRepository`
//! and `AccountRepository`, backed by a local `SQLite` database.

mod account_repo;
mod content_repo;
pub(crate) mod entity;
mod migration;
mod site_repo;

use std::path::Path;

use sea_orm::{Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;
use site_deletion_core::error::{CoreError, CoreResult};
use site_deletion_core::types::SiteId;

use migration::Migrator;

/// SQLite-based unified store.
///
/// Implements all storage traits against a single `SQLite` database file, so
/// a site purge can remove rows from every table in one transaction.
pub struct SqliteStore {
    /// Shared `SeaORM` database connection.
    pub(crate) db: DatabaseConnection,
}

impl SqliteStore {
    /// Create a new `SQLite` store.
    ///
    /// - `db_path`: Path to the `SQLite` database file (created if not exists).
    ///
    /// # Errors
    /// Returns `CoreError::StorageError` if directory creation, database
    /// connection, or schema migration fails.
    pub async fn new(db_path: &Path) -> CoreResult<Self> {
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| CoreError::StorageError(format!("Failed to create directory: {e}")))?;
        }

        let db_url = format!("sqlite://{}?mode=rwc", db_path.display());
        let db = Database::connect(&db_url)
            .await
            .map_err(|e| CoreError::StorageError(format!("Failed to connect to SQLite: {e}")))?;

        let store = Self { db };

        // Ensure schema is up to date before the store is used.
        Migrator::up(&store.db, None)
            .await
            .map_err(|e| CoreError::StorageError(format!("Failed to run migrations: {e}")))?;

        Ok(store)
    }

    /// Underlying connection, for maintenance and diagnostics.
    pub fn connection(&self) -> &DatabaseConnection {
        &self.db
    }
}

/// `SQLite` integers are signed; site IDs above `i64::MAX` cannot be stored.
pub(crate) fn site_key(id: SiteId) -> CoreResult<i64> {
    i64::try_from(id.get())
        .map_err(|_| CoreError::ValidationError(format!("Site ID out of range: {id}")))
}

pub(crate) fn site_id_from_row(raw: i64) -> CoreResult<SiteId> {
    u64::try_from(raw)
        .map(SiteId)
        .map_err(|_| CoreError::SerializationError(format!("Invalid site ID in store: {raw}")))
}

pub(crate) fn storage_error(action: &str) -> impl Fn(sea_orm::DbErr) -> CoreError + '_ {
    move |e| CoreError::StorageError(format!("Failed to {action}: {e}"))
}
