//! Employee API Handlers
//!
//! Staff management is admin-only. The password hash never appears in any
//! response; the model skips it on serialization.

use axum::Extension;
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;
use shared::models::{EmployeeCreate, EmployeeUpdate};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::utils::{AppError, AppResult, ok, ok_with_message};

fn require_admin(user: &CurrentUser) -> AppResult<()> {
    if user.role != "admin" {
        return Err(AppError::forbidden("Only admins may manage staff"));
    }
    Ok(())
}

/// GET /api/employees
pub async fn list(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<impl IntoResponse> {
    require_admin(&user)?;
    Ok(ok(state.employees().find_all(&user.restaurant_id)?))
}

/// GET /api/employees/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    require_admin(&user)?;
    let employee = state
        .employees()
        .find_by_id(&user.restaurant_id, &id)?
        .ok_or_else(|| AppError::not_found(format!("Employee {id} not found")))?;
    Ok(ok(employee))
}

/// POST /api/employees
pub async fn create(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<EmployeeCreate>,
) -> AppResult<impl IntoResponse> {
    require_admin(&user)?;
    if payload.password.len() < 4 {
        return Err(AppError::validation("Password too short"));
    }
    // The referenced role must exist before an account points at it
    state
        .roles()
        .find_by_id(&user.restaurant_id, &payload.role_id)?
        .ok_or_else(|| AppError::validation(format!("Role {} does not exist", payload.role_id)))?;

    Ok(ok(state.employees().create(&user.restaurant_id, payload)?))
}

/// PUT /api/employees/{id}
pub async fn update(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
    Json(payload): Json<EmployeeUpdate>,
) -> AppResult<impl IntoResponse> {
    require_admin(&user)?;
    if let Some(role_id) = &payload.role_id {
        state
            .roles()
            .find_by_id(&user.restaurant_id, role_id)?
            .ok_or_else(|| AppError::validation(format!("Role {role_id} does not exist")))?;
    }
    Ok(ok(state.employees().update(&user.restaurant_id, &id, payload)?))
}

/// DELETE /api/employees/{id}
pub async fn delete(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    require_admin(&user)?;
    if id == user.id {
        return Err(AppError::conflict("Cannot delete your own account"));
    }
    state.employees().delete(&user.restaurant_id, &id)?;
    Ok(ok_with_message(json!({ "id": id }), "Employee deleted"))
}
