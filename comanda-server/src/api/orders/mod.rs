//! Order API Module

mod handler;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest(
        "/orders",
        Router::new()
            .route("/", get(handler::list).post(handler::submit))
            .route("/{id}", get(handler::get_by_id))
            .route("/{id}/items", put(handler::update_items))
            .route("/{id}/bill", get(handler::bill))
            .route("/{id}/settle", post(handler::settle))
            .route("/{id}/cancel", post(handler::cancel)),
    )
}
