//! Downstream metadata refresh hook

use tokio::sync::broadcast;

use crate::types::SiteId;

/// Event sent to presentation layers after local data changed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetadataRefresh {
    /// A site and its exclusive data were purged
    SiteRemoved(SiteId),
}

/// Metadata refresher Trait
///
/// Fire-and-forget: implementations must not block and must not fail the caller.
pub trait MetadataRefresher: Send + Sync {
    fn refresh(&self, event: MetadataRefresh);
}

/// Refresher that does nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopMetadataRefresher;

impl MetadataRefresher for NoopMetadataRefresher {
    fn refresh(&self, _event: MetadataRefresh) {}
}

/// Refresher that broadcasts events to any number of subscribers
#[derive(Debug, Clone)]
pub struct BroadcastMetadataRefresher {
    sender: broadcast::Sender<MetadataRefresh>,
}

impl BroadcastMetadataRefresher {
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<MetadataRefresh> {
        self.sender.subscribe()
    }
}

impl Default for BroadcastMetadataRefresher {
    fn default() -> Self {
        Self::new(16)
    }
}

impl MetadataRefresher for BroadcastMetadataRefresher {
    fn refresh(&self, event: MetadataRefresh) {
        // No subscribers is fine.
        if self.sender.send(event).is_err() {
            log::debug!("Metadata refresh {event:?} had no subscribers");
        }
    }
}
