//! Order Model
//!
//! Customer-facing record of what was ordered and what it costs. Totals are
//! always recomputed from the line items server-side; they are never accepted
//! from a client and never edited independently of the items.

use serde::{Deserialize, Serialize};

use crate::ticket::{TicketItem, TicketItemInput, TicketStatus};

/// How the order entered the system
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderKind {
    #[default]
    DineIn,
    Takeaway,
    /// Back-dated / manually keyed order; carries no kitchen ticket
    Manual,
}

/// Order entity
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Order {
    pub id: String,
    pub restaurant_id: String,
    /// Table label or customer name shown on receipts
    pub label: String,
    pub kind: OrderKind,
    pub items: Vec<TicketItem>,
    /// Σ quantity × unit price, 2dp
    pub subtotal: f64,
    /// Fixed-rate percentage of subtotal, 2dp
    pub tax: f64,
    /// subtotal + tax, 2dp
    pub total: f64,
    pub status: TicketStatus,
    /// Payment method recorded at settlement
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<String>,
    /// Kitchen ticket dispatched for this order, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticket_id: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Cart submission from POS: creates an Order and, unless `Manual`,
/// a paired KitchenTicket
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartSubmit {
    pub label: String,
    #[serde(default)]
    pub kind: OrderKind,
    pub items: Vec<TicketItemInput>,
}
