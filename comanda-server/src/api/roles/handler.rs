//! Role API Handlers
//!
//! Role writes go through one action endpoint, `POST /api/roles/manage`,
//! with the action in the body. Built-in roles reject update and delete; a
//! role still held by employees refuses deletion and stays listed.

use axum::Extension;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;
use shared::models::{Role, RoleAction, RoleManageRequest};
use tracing::info;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::utils::{AppError, AppResult, ok, ok_with_message};

/// GET /api/roles
pub async fn list(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<impl IntoResponse> {
    let roles = state.roles().find_all(&user.restaurant_id)?;
    Ok(ok(roles))
}

/// POST /api/roles/manage - create / update / delete in one endpoint
pub async fn manage(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<RoleManageRequest>,
) -> AppResult<axum::response::Response> {
    if user.role != "admin" {
        return Err(AppError::forbidden("Only admins may manage roles"));
    }

    let rid = &user.restaurant_id;
    let repo = state.roles();

    let response = match payload.action {
        RoleAction::Create => {
            let name = payload
                .name
                .ok_or_else(|| AppError::validation("'name' is required for create"))?;
            let role = repo.create(rid, name, payload.components.unwrap_or_default())?;
            log_action(&user, "create", &role);
            ok(role).into_response()
        }
        RoleAction::Update => {
            let id = require_id(payload.id)?;
            let role = repo.update(rid, &id, payload.name, payload.components)?;
            log_action(&user, "update", &role);
            ok(role).into_response()
        }
        RoleAction::Delete => {
            let id = require_id(payload.id)?;
            let in_use = state.employees().count_with_role(rid, &id);
            repo.delete(rid, &id, in_use)?;
            info!(user_id = %user.id, role_id = %id, "Role deleted");
            ok_with_message(json!({ "id": id }), "Role deleted").into_response()
        }
    };

    Ok(response)
}

fn require_id(id: Option<String>) -> AppResult<String> {
    id.ok_or_else(|| AppError::validation("'id' is required for this action"))
}

fn log_action(user: &CurrentUser, action: &str, role: &Role) {
    info!(
        user_id = %user.id,
        role_id = %role.id,
        role_name = %role.name,
        action,
        "Role managed"
    );
}
