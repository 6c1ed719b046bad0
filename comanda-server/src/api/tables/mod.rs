//! Dining Table API Module

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest(
        "/tables",
        Router::new()
            .route("/", get(handler::list).post(handler::create))
            .route(
                "/{id}",
                get(handler::get_by_id)
                    .put(handler::update)
                    .delete(handler::delete),
            )
            .route("/{id}/occupy", post(handler::occupy))
            .route("/{id}/release", post(handler::release)),
    )
}
