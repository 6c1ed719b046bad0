//! comanda-server - restaurant back-of-house server
//!
//! Kitchen-ticket lifecycle state machine, realtime change feed, view
//! synchronizers, derived dashboard stats, billing, and the CRUD surface
//! for menu, tables, staff, customers, inventory and roles.

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod feed;
pub mod sync;
pub mod tickets;
pub mod utils;
