//! Role API Module

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest(
        "/roles",
        Router::new()
            .route("/", get(handler::list))
            .route("/manage", post(handler::manage)),
    )
}
