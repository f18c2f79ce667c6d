//! HTTP API application wiring (Axum router + service wiring).
//!
//! - `services.rs`: the shared state container (directory, credentials, ledger)
//! - `seed.rs`: the account holder and accounts the process starts with
//! - `routes/`: HTTP routes + handlers (one file per area)
//! - `dto.rs`: request DTOs and input coercion
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{routing::get, Extension, Router};
use tower::ServiceBuilder;

use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod seed;
pub mod services;

use services::AppServices;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub fn build_app(services: Arc<AppServices>) -> Router {
    let auth_state = middleware::AuthState {
        services: Arc::clone(&services),
    };

    // Protected routes: require a valid session token.
    let protected = routes::router().layer(axum::middleware::from_fn_with_state(
        auth_state,
        middleware::auth_middleware,
    ));

    Router::new()
        .route("/health", get(routes::system::health))
        .merge(routes::session::router())
        .merge(protected)
        .layer(ServiceBuilder::new().layer(Extension(services)))
}
