//! Menu Item Repository

use std::sync::Arc;

use shared::models::{MenuItem, MenuItemCreate, MenuItemUpdate};
use shared::util::{new_id, now_millis};

use super::{RepoResult, from_row, to_row};
use crate::db::{Filter, Sort, Store, tables};

#[derive(Clone)]
pub struct MenuItemRepository {
    store: Arc<Store>,
}

impl MenuItemRepository {
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    pub fn find_all(&self, restaurant_id: &str) -> RepoResult<Vec<MenuItem>> {
        self.store
            .select(
                tables::MENU_ITEMS,
                &Filter::restaurant(restaurant_id),
                Sort::OldestFirst,
                None,
            )
            .into_iter()
            .map(from_row)
            .collect()
    }

    /// Only items a POS cart may add
    pub fn find_available(&self, restaurant_id: &str) -> RepoResult<Vec<MenuItem>> {
        self.store
            .select(
                tables::MENU_ITEMS,
                &Filter::restaurant(restaurant_id).and_eq("available", true),
                Sort::OldestFirst,
                None,
            )
            .into_iter()
            .map(from_row)
            .collect()
    }

    pub fn find_by_id(&self, restaurant_id: &str, id: &str) -> RepoResult<Option<MenuItem>> {
        self.store
            .get(tables::MENU_ITEMS, restaurant_id, id)
            .map(from_row)
            .transpose()
    }

    pub fn create(&self, restaurant_id: &str, data: MenuItemCreate) -> RepoResult<MenuItem> {
        let now = now_millis();
        let item = MenuItem {
            id: new_id(),
            restaurant_id: restaurant_id.to_string(),
            name: data.name,
            category: data.category,
            price: data.price,
            available: data.available,
            description: data.description,
            created_at: now,
            updated_at: now,
        };
        self.store.insert_row(tables::MENU_ITEMS, to_row(&item)?)?;
        Ok(item)
    }

    pub fn update(
        &self,
        restaurant_id: &str,
        id: &str,
        data: MenuItemUpdate,
    ) -> RepoResult<MenuItem> {
        let row = self
            .store
            .update_row(tables::MENU_ITEMS, restaurant_id, id, to_row(&data)?)?;
        from_row(row)
    }

    pub fn delete(&self, restaurant_id: &str, id: &str) -> RepoResult<bool> {
        self.store.delete_row(tables::MENU_ITEMS, restaurant_id, id)?;
        Ok(true)
    }
}
