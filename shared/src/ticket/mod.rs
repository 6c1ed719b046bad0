//! Kitchen ticket vocabulary
//!
//! The status machine, the ticket record itself, and the change events the
//! realtime feed delivers to subscribed views.

mod event;
mod status;
mod types;

pub use event::{ChangeEvent, ChangeEventType};
pub use status::{Actor, TicketStatus};
pub use types::{KitchenTicket, StatusChange, TicketItem, TicketItemInput};
