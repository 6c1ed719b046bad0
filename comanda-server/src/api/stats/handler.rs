//! Statistics API Handlers

use axum::Extension;
use axum::extract::State;
use axum::response::IntoResponse;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::tickets::TicketStats;
use crate::utils::{AppResult, ok};

/// GET /api/stats - dashboard counters derived from current tickets
pub async fn stats(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<impl IntoResponse> {
    let tickets = state.tickets().find_all(&user.restaurant_id, None)?;
    Ok(ok(TicketStats::compute(&tickets)))
}
