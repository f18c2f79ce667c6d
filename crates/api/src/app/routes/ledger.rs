use std::sync::Arc;

use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};

use crate::app::dto::{self, BalanceUpdate};
use crate::app::errors;
use crate::app::services::AppServices;
use crate::context::SessionContext;

pub async fn get_account_details(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.ledger.accounts() {
        Ok(accounts) => {
            (StatusCode::OK, Json(serde_json::json!({ "accountDetails": accounts }))).into_response()
        }
        Err(e) => errors::ledger_error(e),
    }
}

pub async fn get_transaction_list(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<serde_json::Value>,
) -> axum::response::Response {
    let body: dto::TransactionListRequest = match dto::parse_body(body) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    let request = match dto::to_page_request(body) {
        Ok(r) => r,
        Err(e) => return errors::ledger_error(e),
    };

    match services.ledger.read_page(request) {
        Ok(page) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "transactionList": page.items,
                "totalCount": page.total_count,
            })),
        )
            .into_response(),
        Err(e) => errors::ledger_error(e),
    }
}

pub async fn update_balance(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(session): Extension<SessionContext>,
    Json(body): Json<serde_json::Value>,
) -> axum::response::Response {
    let body: dto::UpdateBalanceRequest = match dto::parse_body(body) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    let update = match dto::to_balance_update(body) {
        Ok(u) => u,
        Err(resp) => return resp,
    };

    tracing::debug!(user_id = %session.identity().id, ?update, "balance update requested");

    let result = match update {
        BalanceUpdate::Withdraw { amount, remarks } => services.ledger.withdraw(amount, &remarks),
        BalanceUpdate::Deposit {
            amount,
            remarks,
            kind,
            cheque_number,
        } => services
            .ledger
            .deposit(amount, &remarks, kind, cheque_number.as_deref()),
    };

    match result {
        Ok(receipt) => (StatusCode::OK, Json(receipt)).into_response(),
        Err(e) => errors::ledger_error(e),
    }
}
