//! Order Repository
//!
//! Same split as the ticket repository: plain reads here, writes only
//! through transaction-scoped helpers driven by the order service.

use std::sync::Arc;

use shared::models::Order;

use super::{RepoResult, from_row};
use crate::db::{Filter, Sort, Store, StoreError, StoreResult, Txn, tables};

#[derive(Clone)]
pub struct OrderRepository {
    store: Arc<Store>,
}

impl OrderRepository {
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    pub fn find_all(&self, restaurant_id: &str, limit: Option<usize>) -> RepoResult<Vec<Order>> {
        self.store
            .select(
                tables::ORDERS,
                &Filter::restaurant(restaurant_id),
                Sort::NewestFirst,
                limit,
            )
            .into_iter()
            .map(from_row)
            .collect()
    }

    pub fn find_by_id(&self, restaurant_id: &str, id: &str) -> RepoResult<Option<Order>> {
        self.store
            .get(tables::ORDERS, restaurant_id, id)
            .map(from_row)
            .transpose()
    }

    /// Orders still open on the floor
    pub fn find_open(&self, restaurant_id: &str) -> RepoResult<Vec<Order>> {
        Ok(self
            .find_all(restaurant_id, None)?
            .into_iter()
            .filter(|o| !o.status.is_terminal())
            .collect())
    }

    /// The order mirroring a kitchen ticket, if any
    pub fn find_by_ticket(&self, restaurant_id: &str, ticket_id: &str) -> RepoResult<Option<Order>> {
        self.store
            .select(
                tables::ORDERS,
                &Filter::restaurant(restaurant_id).and_eq("ticket_id", ticket_id),
                Sort::NewestFirst,
                Some(1),
            )
            .into_iter()
            .next()
            .map(from_row)
            .transpose()
    }

    pub fn insert_in(txn: &mut Txn, order: &Order) -> StoreResult<()> {
        let row = serde_json::to_value(order)?;
        txn.insert(tables::ORDERS, row)?;
        Ok(())
    }

    pub fn save_in(txn: &mut Txn, order: &Order) -> StoreResult<()> {
        let row = serde_json::to_value(order)?;
        txn.update(tables::ORDERS, &order.restaurant_id, &order.id, |stored| {
            *stored = row;
            Ok(())
        })?;
        Ok(())
    }

    pub fn get_in(txn: &Txn, restaurant_id: &str, id: &str) -> StoreResult<Option<Order>> {
        txn.get_scoped(tables::ORDERS, restaurant_id, id)
            .map(serde_json::from_value)
            .transpose()
            .map_err(StoreError::from)
    }
}
