//! Inventory Repository

use std::sync::Arc;

use shared::models::{InventoryItem, InventoryItemCreate, InventoryItemUpdate};
use shared::util::{new_id, now_millis};

use super::{RepoError, RepoResult, from_row, to_row};
use crate::db::{Filter, Sort, Store, tables};

#[derive(Clone)]
pub struct InventoryRepository {
    store: Arc<Store>,
}

impl InventoryRepository {
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    pub fn find_all(&self, restaurant_id: &str) -> RepoResult<Vec<InventoryItem>> {
        self.store
            .select(
                tables::INVENTORY,
                &Filter::restaurant(restaurant_id),
                Sort::OldestFirst,
                None,
            )
            .into_iter()
            .map(from_row)
            .collect()
    }

    pub fn find_by_id(&self, restaurant_id: &str, id: &str) -> RepoResult<Option<InventoryItem>> {
        self.store
            .get(tables::INVENTORY, restaurant_id, id)
            .map(from_row)
            .transpose()
    }

    /// Items at or below their low-stock threshold
    pub fn find_low_stock(&self, restaurant_id: &str) -> RepoResult<Vec<InventoryItem>> {
        Ok(self
            .find_all(restaurant_id)?
            .into_iter()
            .filter(InventoryItem::is_low)
            .collect())
    }

    pub fn create(&self, restaurant_id: &str, data: InventoryItemCreate) -> RepoResult<InventoryItem> {
        if data.quantity < 0.0 {
            return Err(RepoError::Validation("Quantity must not be negative".into()));
        }
        let now = now_millis();
        let item = InventoryItem {
            id: new_id(),
            restaurant_id: restaurant_id.to_string(),
            name: data.name,
            unit: data.unit,
            quantity: data.quantity,
            low_stock_threshold: data.low_stock_threshold,
            created_at: now,
            updated_at: now,
        };
        self.store.insert_row(tables::INVENTORY, to_row(&item)?)?;
        Ok(item)
    }

    pub fn update(
        &self,
        restaurant_id: &str,
        id: &str,
        data: InventoryItemUpdate,
    ) -> RepoResult<InventoryItem> {
        if matches!(data.quantity, Some(q) if q < 0.0) {
            return Err(RepoError::Validation("Quantity must not be negative".into()));
        }
        let row = self
            .store
            .update_row(tables::INVENTORY, restaurant_id, id, to_row(&data)?)?;
        from_row(row)
    }

    pub fn delete(&self, restaurant_id: &str, id: &str) -> RepoResult<bool> {
        self.store.delete_row(tables::INVENTORY, restaurant_id, id)?;
        Ok(true)
    }
}
