//! Platform-agnostic storage adapters for non-mobile frontends (CLI, tests).

#[cfg(feature = "sqlite-store")]
mod sqlite;

#[cfg(feature = "sqlite-store")]
pub use sqlite::SqliteStore;
