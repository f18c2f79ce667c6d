use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use tellerdesk_auth::AuthError;
use tellerdesk_core::ErrorClass;
use tellerdesk_ledger::LedgerError;

pub fn status_for(class: ErrorClass) -> StatusCode {
    match class {
        ErrorClass::Validation => StatusCode::BAD_REQUEST,
        ErrorClass::Auth => StatusCode::UNAUTHORIZED,
        ErrorClass::Configuration | ErrorClass::Consistency => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

pub fn class_error(class: ErrorClass, message: impl Into<String>) -> axum::response::Response {
    let message = message.into();
    if matches!(class, ErrorClass::Configuration | ErrorClass::Consistency) {
        tracing::error!(class = %class, %message, "request aborted");
    }
    json_error(status_for(class), class.as_str(), message)
}

pub fn auth_error(err: AuthError) -> axum::response::Response {
    class_error(err.class(), err.to_string())
}

pub fn ledger_error(err: LedgerError) -> axum::response::Response {
    class_error(err.class(), err.to_string())
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
