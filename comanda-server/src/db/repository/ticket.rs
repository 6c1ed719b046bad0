//! Kitchen Ticket Repository
//!
//! Reads plus transaction-scoped write helpers. Ticket mutations always run
//! inside a ticket manager transaction so the status check and the write
//! land atomically; this module never mutates outside a [`Txn`].

use std::sync::Arc;

use shared::ticket::{KitchenTicket, TicketStatus};

use super::{RepoResult, from_row};
use crate::db::{Filter, Sort, Store, StoreError, StoreResult, Txn, tables};

#[derive(Clone)]
pub struct TicketRepository {
    store: Arc<Store>,
}

impl TicketRepository {
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    /// Newest first, optionally limited; the kitchen screen seeds from this
    pub fn find_all(
        &self,
        restaurant_id: &str,
        limit: Option<usize>,
    ) -> RepoResult<Vec<KitchenTicket>> {
        self.store
            .select(
                tables::KITCHEN_TICKETS,
                &Filter::restaurant(restaurant_id),
                Sort::NewestFirst,
                limit,
            )
            .into_iter()
            .map(from_row)
            .collect()
    }

    pub fn find_by_id(&self, restaurant_id: &str, id: &str) -> RepoResult<Option<KitchenTicket>> {
        self.store
            .get(tables::KITCHEN_TICKETS, restaurant_id, id)
            .map(from_row)
            .transpose()
    }

    pub fn find_by_status(
        &self,
        restaurant_id: &str,
        status: TicketStatus,
    ) -> RepoResult<Vec<KitchenTicket>> {
        Ok(self
            .find_all(restaurant_id, None)?
            .into_iter()
            .filter(|t| t.status == status)
            .collect())
    }

    /// Tickets the kitchen still has to act on
    pub fn find_active(&self, restaurant_id: &str) -> RepoResult<Vec<KitchenTicket>> {
        Ok(self
            .find_all(restaurant_id, None)?
            .into_iter()
            .filter(|t| t.status.is_active())
            .collect())
    }

    /// Stage a new ticket inside a transaction
    pub fn insert_in(txn: &mut Txn, ticket: &KitchenTicket) -> StoreResult<()> {
        let row = serde_json::to_value(ticket)?;
        txn.insert(tables::KITCHEN_TICKETS, row)?;
        Ok(())
    }

    /// Stage a full-row replacement inside a transaction
    pub fn save_in(txn: &mut Txn, ticket: &KitchenTicket) -> StoreResult<()> {
        let row = serde_json::to_value(ticket)?;
        txn.update(
            tables::KITCHEN_TICKETS,
            &ticket.restaurant_id,
            &ticket.id,
            |stored| {
                *stored = row;
                Ok(())
            },
        )?;
        Ok(())
    }

    /// Transaction-scoped read used before staging a status change
    ///
    /// A row that exists but fails to deserialize is an error, not an
    /// absence; callers must not mistake corruption for not-found.
    pub fn get_in(txn: &Txn, restaurant_id: &str, id: &str) -> StoreResult<Option<KitchenTicket>> {
        txn.get_scoped(tables::KITCHEN_TICKETS, restaurant_id, id)
            .map(serde_json::from_value)
            .transpose()
            .map_err(StoreError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::ChangeFeed;
    use shared::ticket::TicketItem;

    fn store() -> Arc<Store> {
        Arc::new(Store::new(ChangeFeed::new(16)))
    }

    fn ticket(rid: &str, source: &str) -> KitchenTicket {
        KitchenTicket::new(
            rid.to_string(),
            source.to_string(),
            vec![TicketItem {
                name: "Espresso".into(),
                quantity: 1,
                price: 2.0,
                note: None,
            }],
        )
    }

    #[test]
    fn test_insert_and_read_back() {
        let store = store();
        let repo = TicketRepository::new(store.clone());
        let t = ticket("r1", "Table 4");
        store
            .transaction(|txn| TicketRepository::insert_in(txn, &t))
            .unwrap();

        let found = repo.find_by_id("r1", &t.id).unwrap().unwrap();
        assert_eq!(found.source, "Table 4");
        assert_eq!(found.status, TicketStatus::New);
    }

    #[test]
    fn test_find_active_excludes_terminal() {
        let store = store();
        let repo = TicketRepository::new(store.clone());
        let mut done = ticket("r1", "Table 1");
        done.status = TicketStatus::Completed;
        let open = ticket("r1", "Table 2");
        store
            .transaction(|txn| {
                TicketRepository::insert_in(txn, &done)?;
                TicketRepository::insert_in(txn, &open)
            })
            .unwrap();

        let active = repo.find_active("r1").unwrap();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].id, open.id);
    }
}
