//! Order service
//!
//! Cart submission, item amendment, and settlement. Every operation that
//! touches both the order and its kitchen ticket runs in one store
//! transaction: a POS client can never observe an order whose ticket does
//! not exist yet, or the other way round.

use std::sync::Arc;

use shared::models::{CartSubmit, Order, OrderKind};
use shared::ticket::{Actor, KitchenTicket, TicketItem, TicketItemInput, TicketStatus};
use shared::util::{new_id, now_millis};
use tracing::info;

use super::manager::apply_transition;
use super::money::validate_line;
use super::{Bill, TicketError, TicketResult};
use crate::db::Store;
use crate::db::repository::{OrderRepository, TicketRepository};

#[derive(Clone)]
pub struct OrderService {
    store: Arc<Store>,
    tax_rate_percent: f64,
}

impl OrderService {
    pub fn new(store: Arc<Store>, tax_rate_percent: f64) -> Self {
        Self {
            store,
            tax_rate_percent,
        }
    }

    pub fn tax_rate_percent(&self) -> f64 {
        self.tax_rate_percent
    }

    /// Accept a cart: create the order and, unless it is a manual order,
    /// dispatch its kitchen ticket in the same transaction
    pub fn submit_cart(
        &self,
        restaurant_id: &str,
        cart: CartSubmit,
    ) -> TicketResult<(Order, Option<KitchenTicket>)> {
        let items = convert_items(cart.items)?;
        let bill = Bill::compose(&items, self.tax_rate_percent);
        let now = now_millis();

        let mut order = Order {
            id: new_id(),
            restaurant_id: restaurant_id.to_string(),
            label: cart.label,
            kind: cart.kind,
            items: items.clone(),
            subtotal: bill.subtotal,
            tax: bill.tax,
            total: bill.total,
            status: TicketStatus::New,
            payment_method: None,
            ticket_id: None,
            created_at: now,
            updated_at: now,
        };

        let ticket = if cart.kind == OrderKind::Manual {
            None
        } else {
            let mut ticket =
                KitchenTicket::new(restaurant_id.to_string(), order.label.clone(), items);
            ticket.order_id = Some(order.id.clone());
            order.ticket_id = Some(ticket.id.clone());
            Some(ticket)
        };

        let result: TicketResult<()> = self.store.transaction(|txn| {
            OrderRepository::insert_in(txn, &order)?;
            if let Some(ticket) = &ticket {
                TicketRepository::insert_in(txn, ticket)?;
            }
            Ok(())
        });
        result?;

        info!(
            order_id = %order.id,
            label = %order.label,
            total = order.total,
            with_ticket = ticket.is_some(),
            "Cart submitted"
        );
        Ok((order, ticket))
    }

    /// Replace an order's items while the kitchen has not started
    ///
    /// Totals are recomputed server-side and the ticket lines move with the
    /// order, atomically.
    pub fn update_items(
        &self,
        restaurant_id: &str,
        order_id: &str,
        items: Vec<TicketItemInput>,
    ) -> TicketResult<Order> {
        let items = convert_items(items)?;
        let bill = Bill::compose(&items, self.tax_rate_percent);
        let now = now_millis();

        self.store.transaction(|txn| {
            let mut order = OrderRepository::get_in(txn, restaurant_id, order_id)?
                .ok_or_else(|| TicketError::NotFound(order_id.to_string()))?;
            if order.status != TicketStatus::New {
                return Err(TicketError::ItemsLocked(order.status));
            }

            order.items = items.clone();
            order.subtotal = bill.subtotal;
            order.tax = bill.tax;
            order.total = bill.total;
            order.updated_at = now;
            OrderRepository::save_in(txn, &order)?;

            if let Some(ticket_id) = order.ticket_id.clone() {
                let mut ticket = TicketRepository::get_in(txn, restaurant_id, &ticket_id)?
                    .ok_or_else(|| TicketError::NotFound(ticket_id.clone()))?;
                ticket.items = items.clone();
                ticket.updated_at = now;
                TicketRepository::save_in(txn, &ticket)?;
            }

            Ok(order)
        })
    }

    /// Settle an order: complete its ticket (must be `Ready`), record the
    /// payment method, and return the composed bill
    pub fn settle(
        &self,
        restaurant_id: &str,
        order_id: &str,
        payment_method: String,
        actor: &Actor,
    ) -> TicketResult<(Order, Bill)> {
        let now = now_millis();

        let order = self.store.transaction(|txn| {
            let mut order = OrderRepository::get_in(txn, restaurant_id, order_id)?
                .ok_or_else(|| TicketError::NotFound(order_id.to_string()))?;

            if let Some(ticket_id) = order.ticket_id.clone() {
                let mut ticket = TicketRepository::get_in(txn, restaurant_id, &ticket_id)?
                    .ok_or_else(|| TicketError::NotFound(ticket_id.clone()))?;
                // Mirrors the order row to Completed as well
                apply_transition(txn, &mut ticket, TicketStatus::Completed, actor)?;
                order = OrderRepository::get_in(txn, restaurant_id, order_id)?
                    .ok_or_else(|| TicketError::NotFound(order_id.to_string()))?;
            } else {
                // Manual orders have no ticket; the order row is the state
                if order.status.is_terminal() {
                    return Err(TicketError::InvalidTransition {
                        from: order.status,
                        to: TicketStatus::Completed,
                    });
                }
                order.status = TicketStatus::Completed;
            }

            order.payment_method = Some(payment_method.clone());
            order.updated_at = now;
            OrderRepository::save_in(txn, &order)?;
            Ok(order)
        })?;

        let bill = Bill::compose(&order.items, self.tax_rate_percent);
        info!(
            order_id = %order.id,
            total = bill.total,
            method = %payment_method,
            "Order settled"
        );
        Ok((order, bill))
    }

    /// Cancel an order and its ticket together
    pub fn cancel(
        &self,
        restaurant_id: &str,
        order_id: &str,
        actor: &Actor,
    ) -> TicketResult<Order> {
        let now = now_millis();
        self.store.transaction(|txn| {
            let mut order = OrderRepository::get_in(txn, restaurant_id, order_id)?
                .ok_or_else(|| TicketError::NotFound(order_id.to_string()))?;

            if let Some(ticket_id) = order.ticket_id.clone() {
                let mut ticket = TicketRepository::get_in(txn, restaurant_id, &ticket_id)?
                    .ok_or_else(|| TicketError::NotFound(ticket_id.clone()))?;
                apply_transition(txn, &mut ticket, TicketStatus::Cancelled, actor)?;
                OrderRepository::get_in(txn, restaurant_id, order_id)?
                    .ok_or_else(|| TicketError::NotFound(order_id.to_string()))
            } else {
                if order.status.is_terminal() {
                    return Err(TicketError::InvalidTransition {
                        from: order.status,
                        to: TicketStatus::Cancelled,
                    });
                }
                order.status = TicketStatus::Cancelled;
                order.updated_at = now;
                OrderRepository::save_in(txn, &order)?;
                Ok(order)
            }
        })
    }

    /// Compose the bill for an order without settling it
    pub fn preview_bill(&self, order: &Order) -> Bill {
        Bill::compose(&order.items, self.tax_rate_percent)
    }
}

/// Validate and capture cart lines
fn convert_items(inputs: Vec<TicketItemInput>) -> TicketResult<Vec<TicketItem>> {
    if inputs.is_empty() {
        return Err(TicketError::EmptyCart);
    }
    inputs
        .into_iter()
        .map(|i| {
            validate_line(&i.name, i.quantity, i.price)?;
            Ok(TicketItem {
                name: i.name,
                quantity: i.quantity,
                price: i.price,
                note: i.note,
            })
        })
        .collect()
}
