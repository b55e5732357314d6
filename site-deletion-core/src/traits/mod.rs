//! Storage and collaborator abstraction trait definitions

mod account_repository;
mod metadata_refresher;
mod request_scope_registry;
mod site_repository;

pub use account_repository::AccountRepository;
pub use metadata_refresher::{
    BroadcastMetadataRefresher, MetadataRefresh, MetadataRefresher, NoopMetadataRefresher,
};
pub use request_scope_registry::{
    track, InMemoryRequestScopeRegistry, RequestScopeRegistry, RequestTicket,
};
pub use site_repository::{SiteContentRepository, SiteRepository};
