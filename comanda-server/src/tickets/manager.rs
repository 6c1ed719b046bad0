//! Ticket state transitions
//!
//! The manager is the only writer of ticket status. Legality is checked
//! inside the store transaction, against the row image the write will
//! replace, so two racing transitions can never both commit. When a ticket
//! mirrors an order, the order row moves in the same transaction.

use std::sync::Arc;

use shared::ticket::{Actor, KitchenTicket, StatusChange, TicketStatus};
use shared::util::now_millis;
use tracing::info;

use super::machine;
use super::{TicketError, TicketResult};
use crate::db::Store;
use crate::db::Txn;
use crate::db::repository::{OrderRepository, TicketRepository};
use crate::feed::{Notification, NotificationKind, Notifier};

#[derive(Clone)]
pub struct TicketManager {
    store: Arc<Store>,
    notifier: Notifier,
}

impl TicketManager {
    pub fn new(store: Arc<Store>, notifier: Notifier) -> Self {
        Self { store, notifier }
    }

    /// Move one ticket to `to` on behalf of `actor`
    ///
    /// Atomic with the mirrored order update; the committed images reach
    /// subscribers through the change feed after this returns.
    pub fn transition(
        &self,
        restaurant_id: &str,
        ticket_id: &str,
        to: TicketStatus,
        actor: &Actor,
    ) -> TicketResult<KitchenTicket> {
        let result: TicketResult<KitchenTicket> = self.store.transaction(|txn| {
            let mut ticket = TicketRepository::get_in(txn, restaurant_id, ticket_id)?
                .ok_or_else(|| TicketError::NotFound(ticket_id.to_string()))?;
            apply_transition(txn, &mut ticket, to, actor)?;
            Ok(ticket)
        });
        let ticket = result?;

        info!(
            ticket_id = %ticket.id,
            status = %ticket.status,
            actor = actor.label(),
            "Ticket transitioned"
        );

        match ticket.status {
            TicketStatus::Ready => self.notifier.notify(Notification {
                kind: NotificationKind::TicketReady,
                restaurant_id: restaurant_id.to_string(),
                ticket_id: ticket.id.clone(),
                source: ticket.source.clone(),
            }),
            TicketStatus::Cancelled => self.notifier.notify(Notification {
                kind: NotificationKind::TicketCancelled,
                restaurant_id: restaurant_id.to_string(),
                ticket_id: ticket.id.clone(),
                source: ticket.source.clone(),
            }),
            _ => {}
        }

        Ok(ticket)
    }

    /// Cancel shorthand used by order cancellation and cleanup paths
    pub fn cancel(
        &self,
        restaurant_id: &str,
        ticket_id: &str,
        actor: &Actor,
    ) -> TicketResult<KitchenTicket> {
        self.transition(restaurant_id, ticket_id, TicketStatus::Cancelled, actor)
    }
}

/// Stage a checked transition (ticket + mirrored order) inside `txn`
///
/// Shared with the order service, which completes tickets during settlement
/// in the same transaction that records the payment.
pub(super) fn apply_transition(
    txn: &mut Txn,
    ticket: &mut KitchenTicket,
    to: TicketStatus,
    actor: &Actor,
) -> TicketResult<()> {
    machine::check(ticket.status, to, actor)?;

    let now = now_millis();
    let from = ticket.status;
    ticket.status = to;
    ticket.status_history.push(StatusChange {
        from: Some(from),
        to,
        actor: actor.clone(),
        at: now,
    });
    ticket.updated_at = now;
    TicketRepository::save_in(txn, ticket)?;

    if let Some(order_id) = ticket.order_id.clone() {
        if let Some(mut order) = OrderRepository::get_in(txn, &ticket.restaurant_id, &order_id)? {
            order.status = to;
            order.updated_at = now;
            OrderRepository::save_in(txn, &order)?;
        }
    }

    Ok(())
}
