use std::sync::Arc;

use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub async fn get_user_details(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    let details = services.directory.current().details();
    (StatusCode::OK, Json(serde_json::json!({ "userData": details }))).into_response()
}

pub async fn update_limit(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<serde_json::Value>,
) -> axum::response::Response {
    let body: dto::UpdateLimitRequest = match dto::parse_body(body) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    let limit = match dto::amount_field("limit", body.limit.as_ref()) {
        Ok(v) => v,
        Err(e) => return errors::ledger_error(e),
    };

    match services.directory.update_limit(limit) {
        Ok(record) => {
            (StatusCode::OK, Json(serde_json::json!({ "userData": record.details() }))).into_response()
        }
        Err(e) => errors::auth_error(e),
    }
}

pub async fn update_user(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<serde_json::Value>,
) -> axum::response::Response {
    let update = match dto::parse_body(body).and_then(dto::to_profile_update) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match services.directory.update_profile(update) {
        Ok(record) => {
            (StatusCode::OK, Json(serde_json::json!({ "userData": record.details() }))).into_response()
        }
        Err(e) => errors::auth_error(e),
    }
}
