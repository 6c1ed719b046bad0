//! Ticket lifecycle domain
//!
//! Everything between an accepted cart and a settled bill: the status state
//! machine and who may drive it ([`machine`]), atomic transitions with order
//! mirroring ([`manager`]), cart submission and settlement ([`service`]),
//! derived statistics ([`stats`]), and bill composition ([`billing`]).

pub mod billing;
mod error;
pub mod machine;
pub mod manager;
pub mod money;
pub mod service;
pub mod stats;

pub use billing::{Bill, BillLine};
pub use error::{TicketError, TicketResult};
pub use manager::TicketManager;
pub use service::OrderService;
pub use stats::TicketStats;
