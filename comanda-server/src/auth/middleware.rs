//! Bearer-token authentication middleware

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use super::CurrentUser;
use crate::core::ServerState;
use crate::utils::AppError;

/// Routes reachable without a token
const PUBLIC_PATHS: &[&str] = &["/api/health", "/api/auth/login"];

/// Validate the `Authorization: Bearer` header and inject [`CurrentUser`]
///
/// Public paths pass through untouched; everything else gets 401 without a
/// valid token.
pub async fn require_auth(
    State(state): State<ServerState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let path = request.uri().path();
    if PUBLIC_PATHS.contains(&path) {
        return Ok(next.run(request).await);
    }

    let token = request
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .ok_or(AppError::Unauthorized)?;

    let claims = state.jwt.verify(token)?;
    let user = CurrentUser::from(claims);

    tracing::debug!(user_id = %user.id, role = %user.role, path, "Authenticated request");
    request.extensions_mut().insert(user);

    Ok(next.run(request).await)
}
