use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::Response,
};

use crate::app::errors;
use crate::app::services::AppServices;
use crate::context::SessionContext;

#[derive(Clone)]
pub struct AuthState {
    pub services: Arc<AppServices>,
}

/// Reject requests without a valid bearer session token.
pub async fn auth_middleware(
    State(state): State<AuthState>,
    mut req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Result<Response, Response> {
    let token = extract_bearer(req.headers()).ok_or_else(|| {
        errors::json_error(StatusCode::UNAUTHORIZED, "auth_error", "bearer token required")
    })?;

    let identity = state
        .services
        .verify_token(token)
        .map_err(errors::auth_error)?;

    req.extensions_mut().insert(SessionContext::new(identity));

    Ok(next.run(req).await)
}

pub(crate) fn extract_bearer(headers: &HeaderMap) -> Option<&str> {
    let header = headers.get(axum::http::header::AUTHORIZATION)?;
    let header = header.to_str().ok()?;
    let token = header.strip_prefix("Bearer ")?.trim();

    if token.is_empty() {
        return None;
    }
    Some(token)
}
