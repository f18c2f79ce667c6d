use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};

use crate::context::SessionContext;

pub async fn health() -> StatusCode {
    StatusCode::OK
}

pub async fn whoami(Extension(session): Extension<SessionContext>) -> impl IntoResponse {
    let identity = session.identity();
    Json(serde_json::json!({
        "message": format!("Welcome {}", identity.name),
        "user": identity,
    }))
}
