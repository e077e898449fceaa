//! HTTP application wiring (Axum router + middleware stack).
//!
//! Layout:
//! - `services.rs`: store wiring and the authentication service
//! - `routes/`: HTTP routes + handlers (one file per domain area)
//! - `dto.rs`: request/response DTOs
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{routing::get, Extension, Router};
use tower::ServiceBuilder;

use crate::{middleware, policy};

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router (public entrypoint used by `main.rs` and the
/// black-box tests).
///
/// Every request passes the authenticator first (identity or anonymous,
/// never a rejection) and the access policy second (the only place an
/// unauthorized response is produced); handlers run only after both.
pub fn build_app(services: Arc<services::AppServices>) -> Router {
    let auth_state = middleware::AuthState {
        auth: services.auth.clone(),
    };
    let policy = Arc::new(policy::default_policy());

    Router::new()
        .route("/health", get(routes::system::health))
        .merge(routes::router())
        .layer(
            ServiceBuilder::new()
                .layer(axum::middleware::from_fn_with_state(
                    auth_state,
                    middleware::authenticate,
                ))
                .layer(axum::middleware::from_fn_with_state(policy, policy::enforce)),
        )
        .layer(Extension(services))
}
