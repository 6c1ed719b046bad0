//! Customer API Handlers

use axum::Extension;
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use serde_json::json;
use shared::models::{CustomerCreate, CustomerUpdate};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::utils::{AppError, AppResult, ok, ok_with_message};

/// GET /api/customers
pub async fn list(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<impl IntoResponse> {
    Ok(ok(state.customers().find_all(&user.restaurant_id)?))
}

/// GET /api/customers/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let customer = state
        .customers()
        .find_by_id(&user.restaurant_id, &id)?
        .ok_or_else(|| AppError::not_found(format!("Customer {id} not found")))?;
    Ok(ok(customer))
}

/// POST /api/customers
pub async fn create(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<CustomerCreate>,
) -> AppResult<impl IntoResponse> {
    if payload.name.trim().is_empty() {
        return Err(AppError::validation("Name must not be empty"));
    }
    Ok(ok(state.customers().create(&user.restaurant_id, payload)?))
}

/// PUT /api/customers/{id}
pub async fn update(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
    Json(payload): Json<CustomerUpdate>,
) -> AppResult<impl IntoResponse> {
    Ok(ok(state.customers().update(&user.restaurant_id, &id, payload)?))
}

#[derive(Debug, Deserialize)]
pub struct VisitRequest {
    /// Amount spent this visit; drives loyalty points
    pub spent: f64,
}

/// POST /api/customers/{id}/visit - record a settled visit
pub async fn record_visit(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
    Json(payload): Json<VisitRequest>,
) -> AppResult<impl IntoResponse> {
    if payload.spent < 0.0 || !payload.spent.is_finite() {
        return Err(AppError::validation("'spent' must be a non-negative amount"));
    }
    Ok(ok(state
        .customers()
        .record_visit(&user.restaurant_id, &id, payload.spent)?))
}

/// DELETE /api/customers/{id}
pub async fn delete(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    state.customers().delete(&user.restaurant_id, &id)?;
    Ok(ok_with_message(json!({ "id": id }), "Customer deleted"))
}
