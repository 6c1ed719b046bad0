//! Dining Table Repository

use std::sync::Arc;

use shared::models::{DiningTable, DiningTableCreate, DiningTableUpdate};
use shared::util::{new_id, now_millis};

use super::{RepoError, RepoResult, from_row, to_row};
use crate::db::{Filter, Sort, Store, tables};

#[derive(Clone)]
pub struct DiningTableRepository {
    store: Arc<Store>,
}

impl DiningTableRepository {
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    pub fn find_all(&self, restaurant_id: &str) -> RepoResult<Vec<DiningTable>> {
        self.store
            .select(
                tables::DINING_TABLES,
                &Filter::restaurant(restaurant_id),
                Sort::OldestFirst,
                None,
            )
            .into_iter()
            .map(from_row)
            .collect()
    }

    pub fn find_by_id(&self, restaurant_id: &str, id: &str) -> RepoResult<Option<DiningTable>> {
        self.store
            .get(tables::DINING_TABLES, restaurant_id, id)
            .map(from_row)
            .transpose()
    }

    pub fn create(&self, restaurant_id: &str, data: DiningTableCreate) -> RepoResult<DiningTable> {
        // Labels are what staff see on the floor plan; duplicates are a
        // recipe for misdelivered plates.
        let duplicate = self
            .find_all(restaurant_id)?
            .iter()
            .any(|t| t.label == data.label);
        if duplicate {
            return Err(RepoError::Duplicate(format!(
                "Table '{}' already exists",
                data.label
            )));
        }

        let now = now_millis();
        let table = DiningTable {
            id: new_id(),
            restaurant_id: restaurant_id.to_string(),
            label: data.label,
            zone: data.zone,
            seats: data.seats,
            occupied: false,
            created_at: now,
            updated_at: now,
        };
        self.store
            .insert_row(tables::DINING_TABLES, to_row(&table)?)?;
        Ok(table)
    }

    pub fn update(
        &self,
        restaurant_id: &str,
        id: &str,
        data: DiningTableUpdate,
    ) -> RepoResult<DiningTable> {
        let row = self
            .store
            .update_row(tables::DINING_TABLES, restaurant_id, id, to_row(&data)?)?;
        from_row(row)
    }

    pub fn set_occupied(
        &self,
        restaurant_id: &str,
        id: &str,
        occupied: bool,
    ) -> RepoResult<DiningTable> {
        self.update(
            restaurant_id,
            id,
            DiningTableUpdate {
                occupied: Some(occupied),
                ..Default::default()
            },
        )
    }

    pub fn delete(&self, restaurant_id: &str, id: &str) -> RepoResult<bool> {
        self.store
            .delete_row(tables::DINING_TABLES, restaurant_id, id)?;
        Ok(true)
    }
}
