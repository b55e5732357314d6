//! `SeaORM` entities for `SqliteStore`.

pub mod dependent_account;
pub mod media;
pub mod post;
pub mod site;
pub mod site_setting;
