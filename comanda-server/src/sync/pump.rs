//! Feed pump
//!
//! One background task per synchronized view: seed with the restaurant's
//! active tickets, then fold feed events in until cancelled. On lag the
//! task re-seeds from the store instead of guessing what it missed.

use std::sync::Arc;

use parking_lot::RwLock;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use super::TicketView;
use crate::db::repository::TicketRepository;
use crate::db::tables;
use crate::feed::{ChangeFeed, FeedError};
use crate::tickets::TicketStats;

/// A live, self-healing ticket view for one restaurant
pub struct ViewSynchronizer {
    view: Arc<RwLock<TicketView>>,
    handle: JoinHandle<()>,
}

impl ViewSynchronizer {
    /// Seed the view and start pumping feed events into it
    ///
    /// Subscribes and seeds before the task starts, so the returned view is
    /// immediately populated; the task only folds events from then on.
    pub fn spawn(
        tickets: TicketRepository,
        feed: ChangeFeed,
        restaurant_id: String,
        cancel: CancellationToken,
    ) -> Self {
        let view = Arc::new(RwLock::new(TicketView::default()));
        let pump_view = view.clone();

        // Subscribe before seeding so nothing can fall between snapshot and
        // first event; duplicates are absorbed by idempotent apply.
        let mut sub = feed.subscribe(tables::KITCHEN_TICKETS, &restaurant_id);
        seed(&view, &tickets, &restaurant_id);

        let handle = tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = cancel.cancelled() => {
                        debug!(restaurant_id = %restaurant_id, "View synchronizer stopped");
                        break;
                    }
                    result = sub.recv() => match result {
                        Ok(event) => pump_view.write().apply(&event),
                        Err(FeedError::Lagged(skipped)) => {
                            warn!(
                                restaurant_id = %restaurant_id,
                                skipped,
                                "View lagged behind the feed, re-seeding"
                            );
                            seed(&pump_view, &tickets, &restaurant_id);
                        }
                        Err(FeedError::Closed) => break,
                    }
                }
            }
        });

        Self { view, handle }
    }

    /// Snapshot of the current view contents
    pub fn snapshot(&self) -> TicketView {
        self.view.read().clone()
    }

    /// Stats over what the view currently shows
    pub fn stats(&self) -> TicketStats {
        self.view.read().stats()
    }

    pub fn abort(&self) {
        self.handle.abort();
    }
}

fn seed(view: &RwLock<TicketView>, tickets: &TicketRepository, restaurant_id: &str) {
    match tickets.find_active(restaurant_id) {
        Ok(snapshot) => view.write().seed(snapshot),
        Err(e) => warn!(restaurant_id = %restaurant_id, error = %e, "View seed failed"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Store;
    use crate::feed::Notifier;
    use crate::tickets::TicketManager;
    use shared::models::{CartSubmit, OrderKind};
    use shared::ticket::{Actor, TicketItemInput, TicketStatus};
    use std::time::Duration;

    async fn settle_in() {
        tokio::time::sleep(Duration::from_millis(50)).await;
    }

    fn cart(label: &str) -> CartSubmit {
        CartSubmit {
            label: label.into(),
            kind: OrderKind::DineIn,
            items: vec![TicketItemInput {
                name: "Pizza".into(),
                quantity: 1,
                price: 250.0,
                note: None,
            }],
        }
    }

    #[tokio::test]
    async fn test_view_follows_store() {
        let feed = ChangeFeed::new(64);
        let store = Arc::new(Store::new(feed.clone()));
        let service = crate::tickets::OrderService::new(store.clone(), 10.0);
        let manager = TicketManager::new(store.clone(), Notifier::new(16));
        let cancel = CancellationToken::new();

        let sync = ViewSynchronizer::spawn(
            TicketRepository::new(store.clone()),
            feed,
            "r1".into(),
            cancel.clone(),
        );
        settle_in().await;

        let (_, ticket) = service.submit_cart("r1", cart("Table 1")).unwrap();
        let ticket = ticket.unwrap();
        settle_in().await;
        assert_eq!(sync.snapshot().len(), 1);

        manager
            .transition(
                "r1",
                &ticket.id,
                TicketStatus::Preparing,
                &Actor::Kitchen {
                    employee_id: "e1".into(),
                },
            )
            .unwrap();
        settle_in().await;

        let view = sync.snapshot();
        assert_eq!(view.get(&ticket.id).unwrap().status, TicketStatus::Preparing);
        assert_eq!(sync.stats().preparing, 1);

        cancel.cancel();
    }

    #[tokio::test]
    async fn test_seed_includes_existing_rows() {
        let feed = ChangeFeed::new(64);
        let store = Arc::new(Store::new(feed.clone()));
        let service = crate::tickets::OrderService::new(store.clone(), 10.0);
        service.submit_cart("r1", cart("Table 1")).unwrap();
        service.submit_cart("r1", cart("Table 2")).unwrap();
        // Other restaurant stays out of this view
        service.submit_cart("r2", cart("Table 9")).unwrap();

        let sync = ViewSynchronizer::spawn(
            TicketRepository::new(store),
            feed,
            "r1".into(),
            CancellationToken::new(),
        );
        settle_in().await;
        assert_eq!(sync.snapshot().len(), 2);
        sync.abort();
    }

    #[tokio::test]
    async fn test_terminal_tickets_leave_the_view() {
        let feed = ChangeFeed::new(64);
        let store = Arc::new(Store::new(feed.clone()));
        let service = crate::tickets::OrderService::new(store.clone(), 10.0);

        // Cancelled before the synchronizer exists: the seed must skip it
        let (cancelled_order, _) = service.submit_cart("r1", cart("Table 1")).unwrap();
        service
            .cancel("r1", &cancelled_order.id, &Actor::System)
            .unwrap();

        let (open_order, _) = service.submit_cart("r1", cart("Table 2")).unwrap();

        let sync = ViewSynchronizer::spawn(
            TicketRepository::new(store),
            feed,
            "r1".into(),
            CancellationToken::new(),
        );
        assert_eq!(sync.snapshot().len(), 1);

        // Cancelled while live: the update event must evict it
        settle_in().await;
        service.cancel("r1", &open_order.id, &Actor::System).unwrap();
        settle_in().await;
        assert!(sync.snapshot().is_empty());
        sync.abort();
    }

    #[tokio::test]
    async fn test_lagged_view_reseeds_to_store_snapshot() {
        // Channel small enough that a burst overflows it while the pump
        // task is not being polled
        let feed = ChangeFeed::new(4);
        let store = Arc::new(Store::new(feed.clone()));
        let service = crate::tickets::OrderService::new(store.clone(), 10.0);

        let sync = ViewSynchronizer::spawn(
            TicketRepository::new(store),
            feed,
            "r1".into(),
            CancellationToken::new(),
        );

        for i in 0..8 {
            service.submit_cart("r1", cart(&format!("Table {i}"))).unwrap();
        }

        settle_in().await;
        assert_eq!(sync.snapshot().len(), 8);
        sync.abort();
    }
}
