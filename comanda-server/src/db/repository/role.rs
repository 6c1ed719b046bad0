//! Role Repository
//!
//! Built-in roles (seeded at startup with `deletable = false`) can never be
//! modified or removed; those checks live here so every caller gets them.

use std::sync::Arc;

use shared::models::Role;
use shared::util::{is_uuid, new_id, now_millis};

use super::{RepoError, RepoResult, from_row, to_row};
use crate::db::{Filter, Sort, Store, tables};

#[derive(Clone)]
pub struct RoleRepository {
    store: Arc<Store>,
}

impl RoleRepository {
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    pub fn find_all(&self, restaurant_id: &str) -> RepoResult<Vec<Role>> {
        self.store
            .select(
                tables::ROLES,
                &Filter::restaurant(restaurant_id),
                Sort::OldestFirst,
                None,
            )
            .into_iter()
            .map(from_row)
            .collect()
    }

    pub fn find_by_id(&self, restaurant_id: &str, id: &str) -> RepoResult<Option<Role>> {
        self.store
            .get(tables::ROLES, restaurant_id, id)
            .map(from_row)
            .transpose()
    }

    pub fn find_by_name(&self, restaurant_id: &str, name: &str) -> RepoResult<Option<Role>> {
        self.store
            .select(
                tables::ROLES,
                &Filter::restaurant(restaurant_id).and_eq("name", name),
                Sort::OldestFirst,
                Some(1),
            )
            .into_iter()
            .next()
            .map(from_row)
            .transpose()
    }

    pub fn create(
        &self,
        restaurant_id: &str,
        name: String,
        components: Vec<String>,
    ) -> RepoResult<Role> {
        validate_components(&components)?;
        if name.trim().is_empty() {
            return Err(RepoError::Validation("Role name must not be empty".into()));
        }
        if self.find_by_name(restaurant_id, &name)?.is_some() {
            return Err(RepoError::Duplicate(format!("Role '{name}' already exists")));
        }

        let now = now_millis();
        let role = Role {
            id: new_id(),
            restaurant_id: restaurant_id.to_string(),
            name,
            components,
            deletable: true,
            created_at: now,
            updated_at: now,
        };
        self.store.insert_row(tables::ROLES, to_row(&role)?)?;
        Ok(role)
    }

    /// Seed a built-in role at startup; idempotent on name
    pub fn ensure_builtin(
        &self,
        restaurant_id: &str,
        name: &str,
        components: Vec<String>,
    ) -> RepoResult<Role> {
        if let Some(existing) = self.find_by_name(restaurant_id, name)? {
            return Ok(existing);
        }
        let now = now_millis();
        let role = Role {
            id: new_id(),
            restaurant_id: restaurant_id.to_string(),
            name: name.to_string(),
            components,
            deletable: false,
            created_at: now,
            updated_at: now,
        };
        self.store.insert_row(tables::ROLES, to_row(&role)?)?;
        Ok(role)
    }

    pub fn update(
        &self,
        restaurant_id: &str,
        id: &str,
        name: Option<String>,
        components: Option<Vec<String>>,
    ) -> RepoResult<Role> {
        if let Some(components) = &components {
            validate_components(components)?;
        }
        let existing = self
            .find_by_id(restaurant_id, id)?
            .ok_or_else(|| RepoError::NotFound(format!("Role {id} not found")))?;
        if !existing.deletable {
            return Err(RepoError::Forbidden("Cannot modify built-in role".into()));
        }
        if let Some(name) = &name {
            if let Some(other) = self.find_by_name(restaurant_id, name)? {
                if other.id != *id {
                    return Err(RepoError::Duplicate(format!(
                        "Role '{name}' already exists"
                    )));
                }
            }
        }

        let mut patch = serde_json::json!({});
        if let Some(name) = name {
            patch["name"] = name.into();
        }
        if let Some(components) = components {
            patch["components"] = components.into();
        }
        let row = self.store.update_row(tables::ROLES, restaurant_id, id, patch)?;
        from_row(row)
    }

    /// Delete a role; `in_use` is the number of employees still holding it,
    /// supplied by the caller so this module stays off the employee table
    pub fn delete(&self, restaurant_id: &str, id: &str, in_use: usize) -> RepoResult<bool> {
        let existing = self
            .find_by_id(restaurant_id, id)?
            .ok_or_else(|| RepoError::NotFound(format!("Role {id} not found")))?;
        if !existing.deletable {
            return Err(RepoError::Forbidden("Cannot delete built-in role".into()));
        }
        if in_use > 0 {
            return Err(RepoError::InUse(format!(
                "Role '{}' is assigned to {} employee(s)",
                existing.name, in_use
            )));
        }
        self.store.delete_row(tables::ROLES, restaurant_id, id)?;
        Ok(true)
    }
}

fn validate_components(components: &[String]) -> RepoResult<()> {
    for c in components {
        if !is_uuid(c) {
            return Err(RepoError::Validation(format!(
                "Component id '{c}' is not a UUID"
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::ChangeFeed;

    fn repo() -> RoleRepository {
        RoleRepository::new(Arc::new(Store::new(ChangeFeed::new(16))))
    }

    fn uuid() -> String {
        new_id()
    }

    #[test]
    fn test_create_rejects_non_uuid_component() {
        let repo = repo();
        let result = repo.create("r1", "waiter".into(), vec!["not-a-uuid".into()]);
        assert!(matches!(result, Err(RepoError::Validation(_))));
    }

    #[test]
    fn test_builtin_role_immutable() {
        let repo = repo();
        let role = repo.ensure_builtin("r1", "admin", vec![]).unwrap();
        assert!(matches!(
            repo.update("r1", &role.id, Some("boss".into()), None),
            Err(RepoError::Forbidden(_))
        ));
        assert!(matches!(
            repo.delete("r1", &role.id, 0),
            Err(RepoError::Forbidden(_))
        ));
        // Still there
        assert!(repo.find_by_id("r1", &role.id).unwrap().is_some());
    }

    #[test]
    fn test_delete_blocked_while_in_use() {
        let repo = repo();
        let role = repo.create("r1", "waiter".into(), vec![uuid()]).unwrap();
        assert!(matches!(
            repo.delete("r1", &role.id, 2),
            Err(RepoError::InUse(_))
        ));
        assert!(repo.find_by_id("r1", &role.id).unwrap().is_some());
        assert!(repo.delete("r1", &role.id, 0).unwrap());
    }

    #[test]
    fn test_ensure_builtin_idempotent() {
        let repo = repo();
        let a = repo.ensure_builtin("r1", "admin", vec![]).unwrap();
        let b = repo.ensure_builtin("r1", "admin", vec![]).unwrap();
        assert_eq!(a.id, b.id);
        assert_eq!(repo.find_all("r1").unwrap().len(), 1);
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let repo = repo();
        repo.create("r1", "waiter".into(), vec![]).unwrap();
        assert!(matches!(
            repo.create("r1", "waiter".into(), vec![]),
            Err(RepoError::Duplicate(_))
        ));
    }
}
