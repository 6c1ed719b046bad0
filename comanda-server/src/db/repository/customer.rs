//! Customer Repository (CRM / loyalty)

use std::sync::Arc;

use shared::models::{Customer, CustomerCreate, CustomerUpdate};
use shared::util::{new_id, now_millis};

use super::{RepoResult, from_row, to_row};
use crate::db::{Filter, Sort, Store, tables};

#[derive(Clone)]
pub struct CustomerRepository {
    store: Arc<Store>,
}

impl CustomerRepository {
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    pub fn find_all(&self, restaurant_id: &str) -> RepoResult<Vec<Customer>> {
        self.store
            .select(
                tables::CUSTOMERS,
                &Filter::restaurant(restaurant_id),
                Sort::NewestFirst,
                None,
            )
            .into_iter()
            .map(from_row)
            .collect()
    }

    pub fn find_by_id(&self, restaurant_id: &str, id: &str) -> RepoResult<Option<Customer>> {
        self.store
            .get(tables::CUSTOMERS, restaurant_id, id)
            .map(from_row)
            .transpose()
    }

    pub fn create(&self, restaurant_id: &str, data: CustomerCreate) -> RepoResult<Customer> {
        let now = now_millis();
        let customer = Customer {
            id: new_id(),
            restaurant_id: restaurant_id.to_string(),
            name: data.name,
            phone: data.phone,
            loyalty_points: 0,
            visits: 0,
            created_at: now,
            updated_at: now,
        };
        self.store.insert_row(tables::CUSTOMERS, to_row(&customer)?)?;
        Ok(customer)
    }

    pub fn update(
        &self,
        restaurant_id: &str,
        id: &str,
        data: CustomerUpdate,
    ) -> RepoResult<Customer> {
        let row = self
            .store
            .update_row(tables::CUSTOMERS, restaurant_id, id, to_row(&data)?)?;
        from_row(row)
    }

    /// Record a settled visit: +1 visit, one loyalty point per whole
    /// currency unit spent
    pub fn record_visit(&self, restaurant_id: &str, id: &str, spent: f64) -> RepoResult<Customer> {
        let earned = spent.max(0.0).floor() as i64;
        let row = self.store.transaction(|txn| {
            txn.update(tables::CUSTOMERS, restaurant_id, id, |row| {
                let visits = row.get("visits").and_then(serde_json::Value::as_i64).unwrap_or(0);
                let points = row
                    .get("loyalty_points")
                    .and_then(serde_json::Value::as_i64)
                    .unwrap_or(0);
                row["visits"] = (visits + 1).into();
                row["loyalty_points"] = (points + earned).into();
                row["updated_at"] = now_millis().into();
                Ok(())
            })
        })?;
        from_row(row)
    }

    pub fn delete(&self, restaurant_id: &str, id: &str) -> RepoResult<bool> {
        self.store.delete_row(tables::CUSTOMERS, restaurant_id, id)?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::ChangeFeed;

    fn repo() -> CustomerRepository {
        CustomerRepository::new(Arc::new(Store::new(ChangeFeed::new(16))))
    }

    #[test]
    fn test_record_visit_accumulates() {
        let repo = repo();
        let c = repo
            .create(
                "r1",
                CustomerCreate {
                    name: "Mia".into(),
                    phone: None,
                },
            )
            .unwrap();
        let c = repo.record_visit("r1", &c.id, 24.70).unwrap();
        assert_eq!(c.visits, 1);
        assert_eq!(c.loyalty_points, 24);
        let c = repo.record_visit("r1", &c.id, 10.0).unwrap();
        assert_eq!(c.visits, 2);
        assert_eq!(c.loyalty_points, 34);
    }
}
