//! API route modules
//!
//! One module per resource, each with its own `router()` and handlers.
//! Everything except [`health`] and the login route sits behind the auth
//! middleware installed in [`core::server`](crate::core).

pub mod auth;
pub mod customers;
pub mod employees;
pub mod health;
pub mod inventory;
pub mod menu_items;
pub mod orders;
pub mod roles;
pub mod stats;
pub mod tables;
pub mod tickets;

use axum::Router;

use crate::core::ServerState;

// Re-export common types for handlers
pub use crate::utils::{AppResponse, AppResult};

/// All API routes, mounted under `/api` by the server
pub fn router() -> Router<ServerState> {
    Router::new()
        .merge(health::router())
        .merge(auth::router())
        .merge(tickets::router())
        .merge(orders::router())
        .merge(stats::router())
        .merge(roles::router())
        .merge(menu_items::router())
        .merge(tables::router())
        .merge(employees::router())
        .merge(customers::router())
        .merge(inventory::router())
}
