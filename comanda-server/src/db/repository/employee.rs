//! Employee Repository

use std::sync::Arc;

use shared::models::{Employee, EmployeeCreate, EmployeeUpdate};
use shared::util::{new_id, now_millis};

use super::{RepoError, RepoResult, from_row, to_row};
use crate::auth::hash_password;
use crate::db::{Filter, Sort, Store, tables};

#[derive(Clone)]
pub struct EmployeeRepository {
    store: Arc<Store>,
}

impl EmployeeRepository {
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    pub fn find_all(&self, restaurant_id: &str) -> RepoResult<Vec<Employee>> {
        self.store
            .select(
                tables::EMPLOYEES,
                &Filter::restaurant(restaurant_id),
                Sort::OldestFirst,
                None,
            )
            .into_iter()
            .map(from_row)
            .collect()
    }

    pub fn find_by_id(&self, restaurant_id: &str, id: &str) -> RepoResult<Option<Employee>> {
        self.store
            .get(tables::EMPLOYEES, restaurant_id, id)
            .map(from_row)
            .transpose()
    }

    /// Lookup for login; usernames are unique per restaurant
    pub fn find_by_username(
        &self,
        restaurant_id: &str,
        username: &str,
    ) -> RepoResult<Option<Employee>> {
        self.store
            .select(
                tables::EMPLOYEES,
                &Filter::restaurant(restaurant_id).and_eq("username", username),
                Sort::OldestFirst,
                Some(1),
            )
            .into_iter()
            .next()
            .map(from_row)
            .transpose()
    }

    /// How many employees currently hold a role; gates role deletion
    pub fn count_with_role(&self, restaurant_id: &str, role_id: &str) -> usize {
        self.store.count(
            tables::EMPLOYEES,
            &Filter::restaurant(restaurant_id).and_eq("role_id", role_id),
        )
    }

    pub fn create(&self, restaurant_id: &str, data: EmployeeCreate) -> RepoResult<Employee> {
        if self
            .find_by_username(restaurant_id, &data.username)?
            .is_some()
        {
            return Err(RepoError::Duplicate(format!(
                "Username '{}' already taken",
                data.username
            )));
        }

        let password_hash = hash_password(&data.password)
            .map_err(|e| RepoError::Validation(format!("Invalid password: {e}")))?;

        let now = now_millis();
        let employee = Employee {
            id: new_id(),
            restaurant_id: restaurant_id.to_string(),
            username: data.username,
            display_name: data.display_name,
            password_hash,
            role_id: data.role_id,
            active: true,
            created_at: now,
            updated_at: now,
        };

        // `skip_serializing` on the hash means to_row drops it; store the
        // full row explicitly.
        let mut row = to_row(&employee)?;
        row["password_hash"] = employee.password_hash.clone().into();
        self.store.insert_row(tables::EMPLOYEES, row)?;
        Ok(employee)
    }

    pub fn update(
        &self,
        restaurant_id: &str,
        id: &str,
        data: EmployeeUpdate,
    ) -> RepoResult<Employee> {
        let mut patch = serde_json::json!({});
        if let Some(display_name) = data.display_name {
            patch["display_name"] = display_name.into();
        }
        if let Some(role_id) = data.role_id {
            patch["role_id"] = role_id.into();
        }
        if let Some(active) = data.active {
            patch["active"] = active.into();
        }
        if let Some(password) = data.password {
            let hash = hash_password(&password)
                .map_err(|e| RepoError::Validation(format!("Invalid password: {e}")))?;
            patch["password_hash"] = hash.into();
        }

        let row = self
            .store
            .update_row(tables::EMPLOYEES, restaurant_id, id, patch)?;
        from_row(row)
    }

    pub fn delete(&self, restaurant_id: &str, id: &str) -> RepoResult<bool> {
        self.store.delete_row(tables::EMPLOYEES, restaurant_id, id)?;
        Ok(true)
    }

    /// Raw stored hash for credential checks; the entity skips it on
    /// serialization so it never round-trips
    pub fn password_hash(&self, restaurant_id: &str, id: &str) -> RepoResult<String> {
        let row = self
            .store
            .get(tables::EMPLOYEES, restaurant_id, id)
            .ok_or_else(|| RepoError::NotFound(format!("Employee {id} not found")))?;
        row.get("password_hash")
            .and_then(serde_json::Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| RepoError::Store("employee row has no password hash".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::verify_password;
    use crate::feed::ChangeFeed;

    fn repo() -> EmployeeRepository {
        EmployeeRepository::new(Arc::new(Store::new(ChangeFeed::new(16))))
    }

    fn create(username: &str) -> EmployeeCreate {
        EmployeeCreate {
            username: username.into(),
            display_name: "Test".into(),
            password: "secret123".into(),
            role_id: "role-1".into(),
        }
    }

    #[test]
    fn test_create_stores_verifiable_hash() {
        let repo = repo();
        let emp = repo.create("r1", create("anna")).unwrap();
        let hash = repo.password_hash("r1", &emp.id).unwrap();
        assert!(verify_password("secret123", &hash));
        assert!(!verify_password("wrong", &hash));
    }

    #[test]
    fn test_duplicate_username_rejected() {
        let repo = repo();
        repo.create("r1", create("anna")).unwrap();
        assert!(matches!(
            repo.create("r1", create("anna")),
            Err(RepoError::Duplicate(_))
        ));
    }

    #[test]
    fn test_password_update_rehashes() {
        let repo = repo();
        let emp = repo.create("r1", create("anna")).unwrap();
        repo.update(
            "r1",
            &emp.id,
            EmployeeUpdate {
                password: Some("newpass456".into()),
                ..Default::default()
            },
        )
        .unwrap();
        let hash = repo.password_hash("r1", &emp.id).unwrap();
        assert!(verify_password("newpass456", &hash));
    }

    #[test]
    fn test_count_with_role() {
        let repo = repo();
        repo.create("r1", create("anna")).unwrap();
        repo.create("r1", create("ben")).unwrap();
        assert_eq!(repo.count_with_role("r1", "role-1"), 2);
        assert_eq!(repo.count_with_role("r1", "role-2"), 0);
    }
}
