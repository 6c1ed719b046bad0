//! Shared server state
//!
//! One [`ServerState`] is built at startup and cloned into every handler.
//! Repositories and services are cheap handles over the shared store, so
//! they are constructed on demand instead of being stored.

use std::sync::Arc;

use anyhow::Result;
use dashmap::DashMap;
use tokio_util::sync::CancellationToken;
use tracing::info;

use super::Config;
use crate::auth::JwtService;
use crate::db::Store;
use crate::db::repository::{
    CustomerRepository, DiningTableRepository, EmployeeRepository, InventoryRepository,
    MenuItemRepository, OrderRepository, RoleRepository, TicketRepository,
};
use crate::feed::{ChangeFeed, Notifier};
use crate::sync::ViewSynchronizer;
use crate::tickets::{OrderService, TicketManager};
use shared::models::EmployeeCreate;

#[derive(Clone)]
pub struct ServerState {
    pub config: Arc<Config>,
    pub store: Arc<Store>,
    pub feed: ChangeFeed,
    pub notifier: Notifier,
    pub jwt: Arc<JwtService>,
    /// Cancelled on shutdown; view synchronizers hang off this
    pub shutdown: CancellationToken,
    /// Live ticket views, one per restaurant, spawned on first use
    views: Arc<DashMap<String, Arc<ViewSynchronizer>>>,
}

impl ServerState {
    /// Build state and seed the built-in roles plus the admin account
    pub fn initialize(config: Config) -> Result<Self> {
        let feed = ChangeFeed::new(config.feed_capacity);
        let store = Arc::new(Store::new(feed.clone()));
        let jwt = Arc::new(JwtService::new(config.jwt.clone()));

        let state = Self {
            config: Arc::new(config),
            store,
            feed,
            notifier: Notifier::default(),
            jwt,
            shutdown: CancellationToken::new(),
            views: Arc::new(DashMap::new()),
        };
        state.seed()?;
        Ok(state)
    }

    fn seed(&self) -> Result<()> {
        let rid = self.config.restaurant_id.clone();
        let roles = self.roles();

        let admin = roles.ensure_builtin(&rid, "admin", vec![])?;
        roles.ensure_builtin(&rid, "kitchen", vec![])?;
        roles.ensure_builtin(&rid, "cashier", vec![])?;

        let employees = self.employees();
        if employees.find_by_username(&rid, "admin")?.is_none() {
            employees.create(
                &rid,
                EmployeeCreate {
                    username: "admin".into(),
                    display_name: "Administrator".into(),
                    password: self.config.default_admin_password.clone(),
                    role_id: admin.id,
                },
            )?;
            info!(restaurant_id = %rid, "Seeded default admin account");
        }
        Ok(())
    }

    pub fn restaurant_id(&self) -> &str {
        &self.config.restaurant_id
    }

    // ---- repositories ----

    pub fn tickets(&self) -> TicketRepository {
        TicketRepository::new(self.store.clone())
    }

    pub fn orders(&self) -> OrderRepository {
        OrderRepository::new(self.store.clone())
    }

    pub fn menu_items(&self) -> MenuItemRepository {
        MenuItemRepository::new(self.store.clone())
    }

    pub fn dining_tables(&self) -> DiningTableRepository {
        DiningTableRepository::new(self.store.clone())
    }

    pub fn employees(&self) -> EmployeeRepository {
        EmployeeRepository::new(self.store.clone())
    }

    pub fn customers(&self) -> CustomerRepository {
        CustomerRepository::new(self.store.clone())
    }

    pub fn inventory(&self) -> InventoryRepository {
        InventoryRepository::new(self.store.clone())
    }

    pub fn roles(&self) -> RoleRepository {
        RoleRepository::new(self.store.clone())
    }

    /// The live ticket view for a restaurant, spawning its synchronizer on
    /// first use. Must be called from within the runtime.
    pub fn view_for(&self, restaurant_id: &str) -> Arc<ViewSynchronizer> {
        self.views
            .entry(restaurant_id.to_string())
            .or_insert_with(|| {
                Arc::new(ViewSynchronizer::spawn(
                    self.tickets(),
                    self.feed.clone(),
                    restaurant_id.to_string(),
                    self.shutdown.child_token(),
                ))
            })
            .clone()
    }

    // ---- services ----

    pub fn ticket_manager(&self) -> TicketManager {
        TicketManager::new(self.store.clone(), self.notifier.clone())
    }

    pub fn order_service(&self) -> OrderService {
        OrderService::new(self.store.clone(), self.config.tax_rate_percent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::JwtConfig;

    fn test_config() -> Config {
        Config {
            http_port: 0,
            environment: "test".into(),
            jwt: JwtConfig {
                secret: "test-secret".into(),
                ttl_hours: 1,
            },
            tax_rate_percent: 10.0,
            restaurant_id: "r-test".into(),
            feed_capacity: 64,
            default_admin_password: "admin".into(),
            log_dir: None,
        }
    }

    #[test]
    fn test_initialize_seeds_roles_and_admin() {
        let state = ServerState::initialize(test_config()).unwrap();

        let roles = state.roles().find_all("r-test").unwrap();
        let names: Vec<&str> = roles.iter().map(|r| r.name.as_str()).collect();
        assert!(names.contains(&"admin"));
        assert!(names.contains(&"kitchen"));
        assert!(names.contains(&"cashier"));
        assert!(roles.iter().all(|r| !r.deletable));

        let admin = state
            .employees()
            .find_by_username("r-test", "admin")
            .unwrap();
        assert!(admin.is_some());
    }

    #[test]
    fn test_initialize_is_idempotent() {
        let state = ServerState::initialize(test_config()).unwrap();
        // A second seed pass must not duplicate anything
        state.seed().unwrap();
        assert_eq!(state.roles().find_all("r-test").unwrap().len(), 3);
        assert_eq!(state.employees().find_all("r-test").unwrap().len(), 1);
    }
}
