//! Inventory API Module

mod handler;

use axum::{
    Router,
    routing::get,
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest(
        "/inventory",
        Router::new()
            .route("/", get(handler::list).post(handler::create))
            .route("/low-stock", get(handler::low_stock))
            .route(
                "/{id}",
                get(handler::get_by_id)
                    .put(handler::update)
                    .delete(handler::delete),
            ),
    )
}
