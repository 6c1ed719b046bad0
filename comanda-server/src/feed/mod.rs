//! Realtime change feed
//!
//! In-process publish/subscribe over the store's committed changes, plus the
//! front-of-house notifier. Subscribers get per-table, per-restaurant
//! filtered streams; dropping a [`Subscription`] detaches it.

mod bus;
mod notifier;
mod subscription;

pub use bus::ChangeFeed;
pub use notifier::{Notification, NotificationKind, Notifier};
pub use subscription::{FeedError, Subscription};
