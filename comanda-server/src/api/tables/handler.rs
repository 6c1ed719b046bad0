//! Dining Table API Handlers

use axum::Extension;
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;
use shared::models::{DiningTableCreate, DiningTableUpdate};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::utils::{AppError, AppResult, ok, ok_with_message};

/// GET /api/tables
pub async fn list(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<impl IntoResponse> {
    Ok(ok(state.dining_tables().find_all(&user.restaurant_id)?))
}

/// GET /api/tables/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let table = state
        .dining_tables()
        .find_by_id(&user.restaurant_id, &id)?
        .ok_or_else(|| AppError::not_found(format!("Table {id} not found")))?;
    Ok(ok(table))
}

/// POST /api/tables
pub async fn create(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<DiningTableCreate>,
) -> AppResult<impl IntoResponse> {
    if payload.seats <= 0 {
        return Err(AppError::validation("Seats must be positive"));
    }
    Ok(ok(state.dining_tables().create(&user.restaurant_id, payload)?))
}

/// PUT /api/tables/{id}
pub async fn update(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
    Json(payload): Json<DiningTableUpdate>,
) -> AppResult<impl IntoResponse> {
    Ok(ok(state
        .dining_tables()
        .update(&user.restaurant_id, &id, payload)?))
}

/// POST /api/tables/{id}/occupy
pub async fn occupy(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    Ok(ok(state
        .dining_tables()
        .set_occupied(&user.restaurant_id, &id, true)?))
}

/// POST /api/tables/{id}/release
pub async fn release(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    Ok(ok(state
        .dining_tables()
        .set_occupied(&user.restaurant_id, &id, false)?))
}

/// DELETE /api/tables/{id}
pub async fn delete(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    state.dining_tables().delete(&user.restaurant_id, &id)?;
    Ok(ok_with_message(json!({ "id": id }), "Table deleted"))
}
