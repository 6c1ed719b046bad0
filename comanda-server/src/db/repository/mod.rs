//! Repository Module
//!
//! Typed CRUD access per store table. Each repository owns the mapping
//! between its entity type and the raw rows the [`Store`](super::Store)
//! holds; nothing above this layer deserializes rows by hand.

// Auth
pub mod employee;
pub mod role;

// Menu & floor
pub mod dining_table;
pub mod menu_item;

// Orders & kitchen
pub mod order;
pub mod ticket;

// CRM & stock
pub mod customer;
pub mod inventory;

// Re-exports
pub use customer::CustomerRepository;
pub use dining_table::DiningTableRepository;
pub use employee::EmployeeRepository;
pub use inventory::InventoryRepository;
pub use menu_item::MenuItemRepository;
pub use order::OrderRepository;
pub use role::RoleRepository;
pub use ticket::TicketRepository;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

use super::StoreError;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("In use: {0}")]
    InUse(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Store error: {0}")]
    Store(String),
}

impl From<StoreError> for RepoError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(msg) => RepoError::NotFound(msg),
            StoreError::Conflict(msg) => RepoError::Duplicate(msg),
            StoreError::Malformed(msg) => RepoError::Validation(msg),
            StoreError::Serialization(e) => RepoError::Store(e.to_string()),
        }
    }
}

impl From<serde_json::Error> for RepoError {
    fn from(err: serde_json::Error) -> Self {
        RepoError::Store(err.to_string())
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

impl From<RepoError> for crate::utils::AppError {
    fn from(err: RepoError) -> Self {
        use crate::utils::AppError;
        match err {
            RepoError::NotFound(msg) => AppError::NotFound(msg),
            RepoError::Duplicate(msg) => AppError::Conflict(msg),
            RepoError::InUse(msg) => AppError::Conflict(msg),
            RepoError::Forbidden(msg) => AppError::Forbidden(msg),
            RepoError::Validation(msg) => AppError::Validation(msg),
            RepoError::Store(msg) => AppError::Database(msg),
        }
    }
}

/// Deserialize a stored row into an entity
pub(crate) fn from_row<T: DeserializeOwned>(row: Value) -> RepoResult<T> {
    Ok(serde_json::from_value(row)?)
}

/// Serialize an entity into a row
pub(crate) fn to_row<T: Serialize>(entity: &T) -> RepoResult<Value> {
    Ok(serde_json::to_value(entity)?)
}
