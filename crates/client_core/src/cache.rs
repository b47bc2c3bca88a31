use std::collections::HashSet;
use std::sync::Arc;

use tokio::sync::{broadcast, Mutex};
use tracing::debug;

/// Listing resources whose freshness the dashboard tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryKey {
    Teams,
    Events,
}

impl QueryKey {
    pub fn as_str(self) -> &'static str {
        match self {
            QueryKey::Teams => "teams",
            QueryKey::Events => "events",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheEvent {
    Invalidated(QueryKey),
}

/// Staleness registry for the listing views. One instance exists per running
/// application: [`crate::DashboardClient`] creates it in its constructor,
/// every view consults it through the client, and it is dropped with the
/// client on shutdown. A key that has never been fetched counts as stale, so
/// first visits always load.
pub struct QueryCache {
    fresh: Mutex<HashSet<QueryKey>>,
    events: broadcast::Sender<CacheEvent>,
}

impl QueryCache {
    pub fn new() -> Arc<Self> {
        let (events, _) = broadcast::channel(64);
        Arc::new(Self {
            fresh: Mutex::new(HashSet::new()),
            events,
        })
    }

    /// Marks `key` stale and wakes subscribers so mounted views can refetch.
    pub async fn invalidate(&self, key: QueryKey) {
        self.fresh.lock().await.remove(&key);
        debug!(key = key.as_str(), "cache: invalidated");
        let _ = self.events.send(CacheEvent::Invalidated(key));
    }

    /// Records a completed fetch for `key`.
    pub async fn mark_fresh(&self, key: QueryKey) {
        self.fresh.lock().await.insert(key);
    }

    pub async fn is_stale(&self, key: QueryKey) -> bool {
        !self.fresh.lock().await.contains(&key)
    }

    pub fn subscribe(&self) -> broadcast::Receiver<CacheEvent> {
        self.events.subscribe()
    }
}
