//! Shared domain types for the comanda restaurant server
//!
//! This crate holds the entity models and the kitchen-ticket vocabulary
//! (status machine, change events) used by both the server and clients.

pub mod models;
pub mod ticket;
pub mod util;
