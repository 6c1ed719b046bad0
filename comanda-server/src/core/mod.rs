//! Server core: configuration, shared state, HTTP server lifecycle

mod config;
mod server;
mod state;

pub use config::Config;
pub use server::{build_app, run};
pub use state::ServerState;
