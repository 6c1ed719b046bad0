//! Auth API Handlers

use axum::Extension;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::auth::{CurrentUser, verify_password};
use crate::core::ServerState;
use crate::utils::{AppError, AppResult, ok};

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub employee_id: String,
    pub display_name: String,
    pub role: String,
}

/// POST /api/auth/login
///
/// Failures are uniform: a wrong username, wrong password, or deactivated
/// account all produce the same response.
pub async fn login(
    State(state): State<ServerState>,
    Json(payload): Json<LoginRequest>,
) -> AppResult<impl IntoResponse> {
    let rid = state.restaurant_id().to_string();

    let employee = state
        .employees()
        .find_by_username(&rid, &payload.username)?
        .ok_or_else(AppError::invalid_credentials)?;
    if !employee.active {
        return Err(AppError::invalid_credentials());
    }

    let hash = state.employees().password_hash(&rid, &employee.id)?;
    if !verify_password(&payload.password, &hash) {
        return Err(AppError::invalid_credentials());
    }

    let role = state
        .roles()
        .find_by_id(&rid, &employee.role_id)?
        .map(|r| r.name)
        .unwrap_or_else(|| "staff".to_string());

    let token = state.jwt.issue(
        &employee.id,
        &employee.username,
        &employee.display_name,
        &rid,
        &role,
    )?;

    info!(employee_id = %employee.id, role = %role, "Login succeeded");
    Ok(ok(LoginResponse {
        token,
        employee_id: employee.id,
        display_name: employee.display_name,
        role,
    }))
}

/// GET /api/auth/profile - the authenticated caller
pub async fn profile(Extension(user): Extension<CurrentUser>) -> impl IntoResponse {
    ok(user)
}
