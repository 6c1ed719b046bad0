//! Inventory API Handlers

use axum::Extension;
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;
use shared::models::{InventoryItemCreate, InventoryItemUpdate};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::utils::{AppError, AppResult, ok, ok_with_message};

/// GET /api/inventory
pub async fn list(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<impl IntoResponse> {
    Ok(ok(state.inventory().find_all(&user.restaurant_id)?))
}

/// GET /api/inventory/low-stock - items at or below their threshold
pub async fn low_stock(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<impl IntoResponse> {
    Ok(ok(state.inventory().find_low_stock(&user.restaurant_id)?))
}

/// GET /api/inventory/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let item = state
        .inventory()
        .find_by_id(&user.restaurant_id, &id)?
        .ok_or_else(|| AppError::not_found(format!("Inventory item {id} not found")))?;
    Ok(ok(item))
}

/// POST /api/inventory
pub async fn create(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<InventoryItemCreate>,
) -> AppResult<impl IntoResponse> {
    Ok(ok(state.inventory().create(&user.restaurant_id, payload)?))
}

/// PUT /api/inventory/{id}
pub async fn update(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
    Json(payload): Json<InventoryItemUpdate>,
) -> AppResult<impl IntoResponse> {
    Ok(ok(state.inventory().update(&user.restaurant_id, &id, payload)?))
}

/// DELETE /api/inventory/{id}
pub async fn delete(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    state.inventory().delete(&user.restaurant_id, &id)?;
    Ok(ok_with_message(json!({ "id": id }), "Inventory item deleted"))
}
