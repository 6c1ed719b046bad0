//! Kitchen Ticket API Handlers

use axum::Extension;
use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use shared::ticket::TicketStatus;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::tickets::TicketStats;
use crate::utils::{AppError, AppResult, ok};

#[derive(Debug, Deserialize)]
pub struct TicketQuery {
    /// Filter to one status
    pub status: Option<TicketStatus>,
    /// Only tickets the kitchen still has to act on
    #[serde(default)]
    pub active: bool,
    pub limit: Option<usize>,
}

/// GET /api/tickets - kitchen display snapshot, newest first
pub async fn list(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Query(query): Query<TicketQuery>,
) -> AppResult<impl IntoResponse> {
    let repo = state.tickets();
    let tickets = if let Some(status) = query.status {
        repo.find_by_status(&user.restaurant_id, status)?
    } else if query.active {
        repo.find_active(&user.restaurant_id)?
    } else {
        repo.find_all(&user.restaurant_id, query.limit)?
    };
    Ok(ok(tickets))
}

/// GET /api/tickets/board - the live kitchen display view
///
/// The ticket list comes from the feed-synchronized view (active tickets
/// only; the first call for a restaurant spawns its synchronizer), the
/// stats from the store so completed and cancelled counts survive eviction.
pub async fn board(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<impl IntoResponse> {
    let view = state.view_for(&user.restaurant_id);
    let snapshot = view.snapshot();
    let all = state.tickets().find_all(&user.restaurant_id, None)?;
    Ok(ok(serde_json::json!({
        "tickets": snapshot.tickets(),
        "stats": TicketStats::compute(&all),
    })))
}

/// GET /api/tickets/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let ticket = state
        .tickets()
        .find_by_id(&user.restaurant_id, &id)?
        .ok_or_else(|| AppError::not_found(format!("Ticket {id} not found")))?;
    Ok(ok(ticket))
}

#[derive(Debug, Deserialize)]
pub struct TransitionRequest {
    pub to: TicketStatus,
}

/// POST /api/tickets/{id}/transition - move a ticket one step
pub async fn transition(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
    Json(payload): Json<TransitionRequest>,
) -> AppResult<impl IntoResponse> {
    let actor = user.actor_for(payload.to);
    let ticket = state
        .ticket_manager()
        .transition(&user.restaurant_id, &id, payload.to, &actor)?;
    Ok(ok(ticket))
}

/// POST /api/tickets/{id}/cancel
pub async fn cancel(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let actor = user.actor_for(TicketStatus::Cancelled);
    let ticket = state
        .ticket_manager()
        .cancel(&user.restaurant_id, &id, &actor)?;
    Ok(ok(ticket))
}
