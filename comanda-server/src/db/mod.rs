//! Store access layer
//!
//! [`Store`] is the narrow client over the backing row store:
//! `select` / `insert` / `update` / `delete`, all
//! scoped to a restaurant, plus cross-table transactions whose committed
//! changes are published to the [`ChangeFeed`](crate::feed::ChangeFeed).
//! Typed repositories in [`repository`] wrap it per entity so nothing above
//! this layer touches raw rows.

pub mod repository;
mod store;

pub use store::{Filter, Sort, Store, StoreError, StoreResult, Txn};

/// Store table names
pub mod tables {
    pub const KITCHEN_TICKETS: &str = "kitchen_tickets";
    pub const ORDERS: &str = "orders";
    pub const MENU_ITEMS: &str = "menu_items";
    pub const DINING_TABLES: &str = "dining_tables";
    pub const EMPLOYEES: &str = "employees";
    pub const CUSTOMERS: &str = "customers";
    pub const INVENTORY: &str = "inventory_items";
    pub const ROLES: &str = "roles";
}
