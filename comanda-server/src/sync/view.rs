//! In-memory ticket view
//!
//! The materialized list a kitchen or orders screen renders: active
//! (non-terminal) tickets only. Applying an event is idempotent and
//! self-healing: a duplicate insert replaces instead of duplicating, an
//! update for an unknown row inserts it, and a transition into a terminal
//! status evicts the ticket, so a view recovers from missed events on its
//! own and never accumulates finished work.

use serde_json::Value;
use shared::ticket::{ChangeEvent, ChangeEventType, KitchenTicket};

use super::ticket_from_row;
use crate::tickets::TicketStats;

/// Ticket list ordered newest first
#[derive(Debug, Default, Clone)]
pub struct TicketView {
    tickets: Vec<KitchenTicket>,
}

impl TicketView {
    /// Replace the whole view with a snapshot; terminal tickets never enter
    pub fn seed(&mut self, snapshot: Vec<KitchenTicket>) {
        self.tickets = snapshot;
        self.tickets.retain(|t| t.status.is_active());
        self.sort();
    }

    /// Fold one committed event in
    pub fn apply(&mut self, event: &ChangeEvent) {
        match event.event_type {
            ChangeEventType::Insert | ChangeEventType::Update => self.upsert(&event.new),
            ChangeEventType::Delete => {
                if let Some(id) = event.row_id() {
                    self.tickets.retain(|t| t.id != id);
                }
            }
        }
    }

    fn upsert(&mut self, row: &Value) {
        let Some(ticket) = ticket_from_row(row) else {
            return;
        };
        if ticket.status.is_terminal() {
            self.tickets.retain(|t| t.id != ticket.id);
            return;
        }
        match self.tickets.iter_mut().find(|t| t.id == ticket.id) {
            Some(existing) => *existing = ticket,
            None => {
                self.tickets.push(ticket);
                self.sort();
            }
        }
    }

    fn sort(&mut self) {
        self.tickets.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    }

    pub fn tickets(&self) -> &[KitchenTicket] {
        &self.tickets
    }

    pub fn get(&self, id: &str) -> Option<&KitchenTicket> {
        self.tickets.iter().find(|t| t.id == id)
    }

    pub fn len(&self) -> usize {
        self.tickets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tickets.is_empty()
    }

    /// Stats over the active tickets this view currently shows
    pub fn stats(&self) -> TicketStats {
        TicketStats::compute(&self.tickets)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::ticket::TicketStatus;

    fn ticket(id: &str, created_at: i64) -> KitchenTicket {
        let mut t = KitchenTicket::new("r1".into(), "Table 1".into(), vec![]);
        t.id = id.to_string();
        t.created_at = created_at;
        t
    }

    fn insert_event(t: &KitchenTicket) -> ChangeEvent {
        ChangeEvent {
            table: "kitchen_tickets".into(),
            event_type: ChangeEventType::Insert,
            restaurant_id: t.restaurant_id.clone(),
            new: serde_json::to_value(t).unwrap(),
            old: None,
        }
    }

    fn update_event(t: &KitchenTicket) -> ChangeEvent {
        ChangeEvent {
            event_type: ChangeEventType::Update,
            ..insert_event(t)
        }
    }

    #[test]
    fn test_insert_is_idempotent() {
        let mut view = TicketView::default();
        let t = ticket("t1", 10);
        view.apply(&insert_event(&t));
        view.apply(&insert_event(&t));
        assert_eq!(view.len(), 1);
    }

    #[test]
    fn test_update_for_unknown_row_inserts() {
        let mut view = TicketView::default();
        let mut t = ticket("t1", 10);
        t.status = TicketStatus::Preparing;
        // The insert event was missed; the update alone must heal the view
        view.apply(&update_event(&t));
        assert_eq!(view.len(), 1);
        assert_eq!(view.get("t1").unwrap().status, TicketStatus::Preparing);
    }

    #[test]
    fn test_newest_first_ordering() {
        let mut view = TicketView::default();
        view.apply(&insert_event(&ticket("old", 1)));
        view.apply(&insert_event(&ticket("new", 99)));
        view.apply(&insert_event(&ticket("mid", 50)));
        let ids: Vec<&str> = view.tickets().iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, ["new", "mid", "old"]);
    }

    #[test]
    fn test_delete_removes() {
        let mut view = TicketView::default();
        let t = ticket("t1", 10);
        view.apply(&insert_event(&t));
        view.apply(&ChangeEvent {
            event_type: ChangeEventType::Delete,
            ..insert_event(&t)
        });
        assert!(view.is_empty());
    }

    #[test]
    fn test_malformed_row_does_not_poison_view() {
        let mut view = TicketView::default();
        view.apply(&insert_event(&ticket("t1", 10)));
        view.apply(&ChangeEvent {
            table: "kitchen_tickets".into(),
            event_type: ChangeEventType::Insert,
            restaurant_id: "r1".into(),
            new: serde_json::json!({ "garbage": true }),
            old: None,
        });
        assert_eq!(view.len(), 1);
    }

    #[test]
    fn test_terminal_update_evicts() {
        let mut view = TicketView::default();
        let mut t = ticket("t1", 10);
        view.apply(&insert_event(&t));
        assert_eq!(view.stats().pending, 1);

        t.status = TicketStatus::Cancelled;
        view.apply(&update_event(&t));
        assert!(view.is_empty());
        assert_eq!(view.stats().pending, 0);
    }

    #[test]
    fn test_seed_drops_terminal_tickets() {
        let mut view = TicketView::default();
        let mut done = ticket("t1", 1);
        done.status = TicketStatus::Completed;
        view.seed(vec![done, ticket("t2", 2)]);
        assert_eq!(view.len(), 1);
        assert!(view.get("t2").is_some());
    }
}
