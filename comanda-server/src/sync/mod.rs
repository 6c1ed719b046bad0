//! View synchronization
//!
//! Keeps an in-memory ticket view consistent with the store through the
//! change feed: seed from a snapshot, then fold committed events in.
//! Malformed rows are normalized, never fatal; a lagging subscription
//! re-seeds instead of trusting the feed to replay.

mod normalize;
mod pump;
mod view;

pub use normalize::ticket_from_row;
pub use pump::ViewSynchronizer;
pub use view::TicketView;
