//! Change feed core
//!
//! One broadcast channel per store table, created lazily on first use.
//! The store publishes strictly after commit, so every event carries a row
//! image the store has already durably accepted. The channel buffers a
//! bounded backlog; a subscriber that falls behind observes
//! [`FeedError::Lagged`](super::FeedError) and is expected to re-fetch its
//! snapshot rather than trust the feed to replay.

use std::sync::Arc;

use dashmap::DashMap;
use shared::ticket::ChangeEvent;
use tokio::sync::broadcast;

use super::Subscription;

/// Per-table broadcast fan-out of committed row changes
#[derive(Debug, Clone)]
pub struct ChangeFeed {
    senders: Arc<DashMap<String, broadcast::Sender<ChangeEvent>>>,
    capacity: usize,
}

impl ChangeFeed {
    /// Create a feed whose per-table channels buffer `capacity` events
    pub fn new(capacity: usize) -> Self {
        Self {
            senders: Arc::new(DashMap::new()),
            capacity,
        }
    }

    fn sender(&self, table: &str) -> broadcast::Sender<ChangeEvent> {
        self.senders
            .entry(table.to_string())
            .or_insert_with(|| broadcast::channel(self.capacity).0)
            .clone()
    }

    /// Publish a committed change
    ///
    /// A send error only means nobody is subscribed to this table, which is
    /// not a fault.
    pub fn publish(&self, event: ChangeEvent) {
        let sender = self.sender(&event.table);
        let _ = sender.send(event);
    }

    /// Subscribe to one table, scoped to one restaurant
    ///
    /// Returns a [`Subscription`] acting as its own disposer: dropping it
    /// unsubscribes. Events for other restaurants are filtered out before
    /// the caller sees them.
    pub fn subscribe(&self, table: &str, restaurant_id: &str) -> Subscription {
        Subscription::new(
            table.to_string(),
            restaurant_id.to_string(),
            self.sender(table).subscribe(),
        )
    }

    /// Number of live subscribers on a table (diagnostics)
    pub fn subscriber_count(&self, table: &str) -> usize {
        self.senders
            .get(table)
            .map(|s| s.receiver_count())
            .unwrap_or(0)
    }
}

impl Default for ChangeFeed {
    fn default() -> Self {
        Self::new(1024)
    }
}
