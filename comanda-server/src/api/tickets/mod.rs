//! Kitchen Ticket API Module

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest(
        "/tickets",
        Router::new()
            .route("/", get(handler::list))
            .route("/board", get(handler::board))
            .route("/{id}", get(handler::get_by_id))
            .route("/{id}/transition", post(handler::transition))
            .route("/{id}/cancel", post(handler::cancel)),
    )
}
