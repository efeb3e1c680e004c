//! Caller authentication middleware
//!
//! Token issuance and user identity live in an upstream authorization
//! layer; this middleware is the explicit capability check executed before
//! the member handlers. When no token is configured the check is a
//! pass-through and the deployment is expected to front its own auth.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::error::AppError;
use crate::state::AppState;

/// Middleware that requires a matching bearer token on every request
pub async fn require_auth(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let Some(expected) = state.api_token.as_deref() else {
        return Ok(next.run(request).await);
    };

    let auth_header = request
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(AppError::not_authenticated)?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(AppError::not_authenticated)?;

    if token != expected {
        tracing::debug!("rejected request with invalid API token");
        return Err(AppError::not_authenticated());
    }

    Ok(next.run(request).await)
}
