//! Menu Item API Handlers

use axum::Extension;
use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use serde_json::json;
use shared::models::{MenuItemCreate, MenuItemUpdate};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::utils::{AppError, AppResult, ok, ok_with_message};

#[derive(Debug, Deserialize)]
pub struct MenuQuery {
    /// Only items a cart may currently add
    #[serde(default)]
    pub available: bool,
}

/// GET /api/menu-items
pub async fn list(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Query(query): Query<MenuQuery>,
) -> AppResult<impl IntoResponse> {
    let repo = state.menu_items();
    let items = if query.available {
        repo.find_available(&user.restaurant_id)?
    } else {
        repo.find_all(&user.restaurant_id)?
    };
    Ok(ok(items))
}

/// GET /api/menu-items/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let item = state
        .menu_items()
        .find_by_id(&user.restaurant_id, &id)?
        .ok_or_else(|| AppError::not_found(format!("Menu item {id} not found")))?;
    Ok(ok(item))
}

/// POST /api/menu-items
pub async fn create(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<MenuItemCreate>,
) -> AppResult<impl IntoResponse> {
    if payload.price < 0.0 {
        return Err(AppError::validation("Price must not be negative"));
    }
    let item = state.menu_items().create(&user.restaurant_id, payload)?;
    Ok(ok(item))
}

/// PUT /api/menu-items/{id}
pub async fn update(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
    Json(payload): Json<MenuItemUpdate>,
) -> AppResult<impl IntoResponse> {
    if matches!(payload.price, Some(p) if p < 0.0) {
        return Err(AppError::validation("Price must not be negative"));
    }
    let item = state.menu_items().update(&user.restaurant_id, &id, payload)?;
    Ok(ok(item))
}

/// DELETE /api/menu-items/{id}
pub async fn delete(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    state.menu_items().delete(&user.restaurant_id, &id)?;
    Ok(ok_with_message(json!({ "id": id }), "Menu item deleted"))
}
