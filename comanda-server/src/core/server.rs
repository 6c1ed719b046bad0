//! HTTP server assembly and lifecycle

use anyhow::Result;
use axum::{Router, middleware};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use super::ServerState;
use crate::api;
use crate::auth::require_auth;

/// Assemble the full application: routes, auth, and the HTTP middleware
/// stack
pub fn build_app(state: ServerState) -> Router {
    Router::new()
        .nest("/api", api::router())
        .layer(middleware::from_fn_with_state(state.clone(), require_auth))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .with_state(state)
}

/// Bind and serve until ctrl-c
pub async fn run(state: ServerState) -> Result<()> {
    let port = state.config.http_port;
    let shutdown = state.shutdown.clone();
    let app = build_app(state);

    let listener = TcpListener::bind(("0.0.0.0", port)).await?;
    info!(port, "comanda-server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            tokio::select! {
                _ = tokio::signal::ctrl_c() => {}
                _ = shutdown.cancelled() => {}
            }
            shutdown.cancel();
            info!("Shutting down");
        })
        .await?;
    Ok(())
}
