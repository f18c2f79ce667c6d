use std::sync::Arc;

use axum::{
    extract::{Extension, Query},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};

use crate::app::services::AppServices;
use crate::app::{dto, errors};
use crate::middleware::extract_bearer;

/// Routes reachable without a session.
pub fn router() -> Router {
    Router::new()
        .route("/users/signin", post(sign_in))
        .route("/verifyToken", get(verify_token))
}

pub async fn sign_in(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<serde_json::Value>,
) -> axum::response::Response {
    let body: dto::SignInRequest = match dto::parse_body(body) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    let username = body.username.unwrap_or_default();
    let password = body.password.unwrap_or_default();

    match services.sign_in(&username, &password) {
        Ok((user, token)) => {
            (StatusCode::OK, Json(serde_json::json!({ "user": user, "token": token }))).into_response()
        }
        Err(e) => errors::auth_error(e),
    }
}

/// Check a token passed as `?token=` (or as a bearer header) and echo it
/// back with the current identity.
pub async fn verify_token(
    Extension(services): Extension<Arc<AppServices>>,
    Query(query): Query<dto::VerifyTokenQuery>,
    headers: HeaderMap,
) -> axum::response::Response {
    let token = match query.token.as_deref().or_else(|| extract_bearer(&headers)) {
        Some(t) if !t.trim().is_empty() => t.trim().to_string(),
        _ => {
            return errors::json_error(StatusCode::BAD_REQUEST, "validation_error", "token is required");
        }
    };

    match services.verify_token(&token) {
        Ok(user) => {
            (StatusCode::OK, Json(serde_json::json!({ "user": user, "token": token }))).into_response()
        }
        Err(e) => errors::auth_error(e),
    }
}
