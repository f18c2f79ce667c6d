use axum::{
    routing::{get, post},
    Router,
};

pub mod ledger;
pub mod profile;
pub mod session;
pub mod system;

/// Router for all authenticated endpoints.
pub fn router() -> Router {
    Router::new()
        .route("/whoami", get(system::whoami))
        .route("/getUserDetails", get(profile::get_user_details))
        .route("/updateUser", post(profile::update_user))
        .route("/updateLimit", post(profile::update_limit))
        .route("/getAccountDetails", get(ledger::get_account_details))
        .route("/getTransactionList", post(ledger::get_transaction_list))
        .route("/updateBalance", post(ledger::update_balance))
}
