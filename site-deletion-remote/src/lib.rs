//! # site-deletion-remote
//!
//! REST client for permanently deleting a hosted site.
//!
//! The client issues exactly one `POST {api_base}/rest/v1.1/sites/{id}/delete`
//! per call and classifies the reply:
//!
//! | Reply | Result |
//! |-------|--------|
//! | 2xx with `"status": "deleted"` | `Ok(())` |
//! | 2xx with any other or no status | [`RemoteError::ServiceRejected`] |
//! | non-2xx | [`RemoteError::HttpStatus`] |
//! | timeout / connection failure | [`RemoteError::Timeout`] / [`RemoteError::NetworkError`] |
//!
//! ## Feature Flags
//!
//! - **`native-tls`** *(default)* — Use the platform's native TLS implementation.
//! - **`rustls`** — Use rustls. Recommended for cross-compilation and mobile targets.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use site_deletion_remote::{ClientOptions, RestDeleteClient, SiteDeleteRemote, SiteId};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let options = ClientOptions::new("https://public-api.wordpress.com", "your-token");
//!     let client = RestDeleteClient::new(options)?;
//!
//!     match client.delete_site(SiteId(42)).await {
//!         Ok(()) => println!("deleted"),
//!         Err(e) if e.is_transport() => println!("could not reach the server: {e}"),
//!         Err(e) => println!("{e}"),
//!     }
//!     Ok(())
//! }
//! ```
//!
//! Nothing is retried. A failed deletion is reported once and left to the caller.

mod common;
mod error;
mod http_client;
mod rest;
mod traits;
mod types;
mod utils;

// Re-export error types
pub use error::{RemoteError, Result, SITE_NOT_DELETED_MESSAGE};

// Re-export the client trait and the REST implementation
pub use rest::RestDeleteClient;
pub use traits::SiteDeleteRemote;

// Re-export types
pub use types::{
    ClientOptions, DEFAULT_API_BASE, DEFAULT_CONNECT_TIMEOUT, DEFAULT_REQUEST_TIMEOUT, SiteId,
};

// Re-export log helpers
pub use utils::log_sanitizer;
