//! Site-scoped network request registry

use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use futures::future::{AbortHandle, Abortable, Aborted};

use crate::types::SiteId;

/// Ticket identifying one registered request
pub type RequestTicket = u64;

/// Request Scope Registry Trait
///
/// Tracks abort handles for in-flight or queued network operations, indexed by
/// the site they belong to, so a purge can cancel exactly that site's traffic.
/// Provides a default memory implementation `InMemoryRequestScopeRegistry`.
#[async_trait]
pub trait RequestScopeRegistry: Send + Sync {
    /// Register an abort handle for a site-scoped operation
    async fn register(&self, site_id: SiteId, handle: AbortHandle) -> RequestTicket;

    /// Forget a finished or abandoned operation
    ///
    /// Synchronous so it can run when a tracked future is dropped.
    fn release(&self, site_id: SiteId, ticket: RequestTicket);

    /// Abort every registered operation for `site_id`; returns how many were aborted
    async fn cancel_site(&self, site_id: SiteId) -> usize;

    /// Number of operations currently registered for `site_id`
    async fn in_flight(&self, site_id: SiteId) -> usize;
}

/// Run `future` as a cancellable operation scoped to `site_id`.
///
/// Returns `Err(Aborted)` if the site's requests were cancelled before it finished.
/// The registration is released when the operation completes or is dropped.
pub async fn track<F>(
    registry: &dyn RequestScopeRegistry,
    site_id: SiteId,
    future: F,
) -> Result<F::Output, Aborted>
where
    F: Future + Send,
{
    let (handle, registration) = AbortHandle::new_pair();
    let ticket = registry.register(site_id, handle).await;
    let _registration = Registration {
        registry,
        site_id,
        ticket,
    };
    Abortable::new(future, registration).await
}

/// Releases a tracked operation's ticket on drop
struct Registration<'a> {
    registry: &'a dyn RequestScopeRegistry,
    site_id: SiteId,
    ticket: RequestTicket,
}

impl Drop for Registration<'_> {
    fn drop(&mut self) {
        self.registry.release(self.site_id, self.ticket);
    }
}

/// In-memory request scope registry
///
/// Default implementation, available on all platforms.
#[derive(Clone, Default)]
pub struct InMemoryRequestScopeRegistry {
    handles: Arc<Mutex<HashMap<SiteId, HashMap<RequestTicket, AbortHandle>>>>,
    next_ticket: Arc<AtomicU64>,
}

impl InMemoryRequestScopeRegistry {
    /// Create a new memory registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<SiteId, HashMap<RequestTicket, AbortHandle>>> {
        self.handles.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl RequestScopeRegistry for InMemoryRequestScopeRegistry {
    async fn register(&self, site_id: SiteId, handle: AbortHandle) -> RequestTicket {
        let ticket = self.next_ticket.fetch_add(1, Ordering::Relaxed);
        self.lock()
            .entry(site_id)
            .or_default()
            .insert(ticket, handle);
        ticket
    }

    fn release(&self, site_id: SiteId, ticket: RequestTicket) {
        let mut handles = self.lock();
        if let Some(site_handles) = handles.get_mut(&site_id) {
            site_handles.remove(&ticket);
            if site_handles.is_empty() {
                handles.remove(&site_id);
            }
        }
    }

    async fn cancel_site(&self, site_id: SiteId) -> usize {
        let removed = self.lock().remove(&site_id);
        let Some(site_handles) = removed else {
            return 0;
        };
        for handle in site_handles.values() {
            handle.abort();
        }
        site_handles.len()
    }

    async fn in_flight(&self, site_id: SiteId) -> usize {
        self.lock()
            .get(&site_id)
            .map_or(0, HashMap::len)
    }
}
