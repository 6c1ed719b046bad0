//! Kitchen ticket records

use serde::{Deserialize, Serialize};

use super::{Actor, TicketStatus};
use crate::util::{new_id, now_millis};

/// One line on a kitchen ticket
///
/// `price` is captured when the item is added; later menu edits never change
/// tickets already written.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TicketItem {
    pub name: String,
    pub quantity: i32,
    /// Unit price captured at add time
    pub price: f64,
    /// Prep note for the kitchen
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Item input when submitting a cart (before the server captures prices)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TicketItemInput {
    pub name: String,
    pub quantity: i32,
    pub price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// One recorded status transition: who moved the ticket, and when
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StatusChange {
    pub from: Option<TicketStatus>,
    pub to: TicketStatus,
    pub actor: Actor,
    /// Unix millis
    pub at: i64,
}

/// Production-facing ticket shown on the kitchen display
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct KitchenTicket {
    pub id: String,
    pub restaurant_id: String,
    /// Table number, "Takeaway", or a customer name
    pub source: String,
    pub items: Vec<TicketItem>,
    pub status: TicketStatus,
    /// Every transition, in order. Never empty: creation is the first entry.
    #[serde(default)]
    pub status_history: Vec<StatusChange>,
    /// Customer-facing order this ticket was dispatched from, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl KitchenTicket {
    /// Build a new ticket in `New` status with a creation history entry
    pub fn new(restaurant_id: String, source: String, items: Vec<TicketItem>) -> Self {
        let now = now_millis();
        Self {
            id: new_id(),
            restaurant_id,
            source,
            items,
            status: TicketStatus::New,
            status_history: vec![StatusChange {
                from: None,
                to: TicketStatus::New,
                actor: Actor::System,
                at: now,
            }],
            order_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Sum of quantity × captured price, before tax
    pub fn subtotal(&self) -> f64 {
        self.items
            .iter()
            .map(|i| i.price * i.quantity as f64)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_ticket_has_creation_history() {
        let t = KitchenTicket::new("r1".into(), "Table 4".into(), vec![]);
        assert_eq!(t.status, TicketStatus::New);
        assert_eq!(t.status_history.len(), 1);
        assert_eq!(t.status_history[0].to, TicketStatus::New);
        assert_eq!(t.status_history[0].from, None);
    }

    #[test]
    fn test_subtotal() {
        let t = KitchenTicket::new(
            "r1".into(),
            "Takeaway".into(),
            vec![
                TicketItem {
                    name: "Pizza".into(),
                    quantity: 2,
                    price: 250.0,
                    note: None,
                },
                TicketItem {
                    name: "Cola".into(),
                    quantity: 1,
                    price: 40.0,
                    note: None,
                },
            ],
        );
        assert_eq!(t.subtotal(), 540.0);
    }
}
