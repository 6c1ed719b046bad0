//! Auth API Module

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/auth/login", post(handler::login))
        .route("/auth/profile", get(handler::profile))
}
