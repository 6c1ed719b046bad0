//! Health API Handlers

use axum::extract::State;
use axum::response::IntoResponse;
use serde_json::json;

use crate::core::ServerState;
use crate::utils::ok;

/// GET /api/health - liveness probe, no auth required
pub async fn health(State(state): State<ServerState>) -> impl IntoResponse {
    ok(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "environment": state.config.environment,
        "timestamp": shared::util::now_millis(),
    }))
}
