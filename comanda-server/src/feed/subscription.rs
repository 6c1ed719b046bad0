//! Filtered feed subscription

use shared::ticket::ChangeEvent;
use tokio::sync::broadcast;

/// Feed delivery failures visible to a subscriber
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum FeedError {
    /// The subscriber fell behind and `n` events were dropped.
    /// There is no replay: re-fetch the snapshot.
    #[error("subscription lagged, {0} events skipped")]
    Lagged(u64),

    /// The feed side was dropped (server shutting down)
    #[error("feed closed")]
    Closed,
}

/// A live, restaurant-scoped subscription to one table's changes
///
/// Holds the receiving half of the table's broadcast channel; dropping the
/// subscription is the disposer — no explicit unsubscribe call exists.
#[derive(Debug)]
pub struct Subscription {
    table: String,
    restaurant_id: String,
    rx: broadcast::Receiver<ChangeEvent>,
}

impl Subscription {
    pub(super) fn new(
        table: String,
        restaurant_id: String,
        rx: broadcast::Receiver<ChangeEvent>,
    ) -> Self {
        Self {
            table,
            restaurant_id,
            rx,
        }
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    /// Wait for the next event for this subscription's restaurant
    ///
    /// Events for other restaurants on the same table are skipped silently.
    pub async fn recv(&mut self) -> Result<ChangeEvent, FeedError> {
        loop {
            match self.rx.recv().await {
                Ok(ev) if ev.restaurant_id == self.restaurant_id => return Ok(ev),
                Ok(_) => continue,
                Err(broadcast::error::RecvError::Lagged(n)) => return Err(FeedError::Lagged(n)),
                Err(broadcast::error::RecvError::Closed) => return Err(FeedError::Closed),
            }
        }
    }

    /// Non-blocking variant used by synchronous drains in tests
    pub fn try_recv(&mut self) -> Result<Option<ChangeEvent>, FeedError> {
        loop {
            match self.rx.try_recv() {
                Ok(ev) if ev.restaurant_id == self.restaurant_id => return Ok(Some(ev)),
                Ok(_) => continue,
                Err(broadcast::error::TryRecvError::Empty) => return Ok(None),
                Err(broadcast::error::TryRecvError::Lagged(n)) => {
                    return Err(FeedError::Lagged(n))
                }
                Err(broadcast::error::TryRecvError::Closed) => return Err(FeedError::Closed),
            }
        }
    }
}
