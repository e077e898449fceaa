use std::sync::Arc;

use axum::{
    extract::Extension,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};

use cuehall_auth::IdentitySummary;

use crate::app::{dto, errors};
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/login", post(login))
        .route("/refresh", post(refresh))
        .route("/debug/users", get(debug_users))
}

/// Credential login. Any failure — unknown user, wrong secret, inactive
/// account — produces the same fixed unauthorized body.
pub async fn login(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::LoginRequest>,
) -> axum::response::Response {
    match services.auth.login(&body.username, &body.password) {
        Ok(outcome) => (StatusCode::OK, Json(dto::LoginResponse::from(outcome))).into_response(),
        Err(_) => errors::unauthorized(),
    }
}

/// Exchange a refresh token for a fresh pair. Failures are as uniform as
/// login failures.
pub async fn refresh(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::RefreshRequest>,
) -> axum::response::Response {
    match services.auth.refresh(&body.refresh_token) {
        Ok(outcome) => (StatusCode::OK, Json(dto::LoginResponse::from(outcome))).into_response(),
        Err(_) => errors::unauthorized(),
    }
}

/// Owner-gated debug listing. Summaries only; credential digests never
/// leave the store.
pub async fn debug_users(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    let users = services
        .users
        .list()
        .iter()
        .map(IdentitySummary::from)
        .collect::<Vec<_>>();

    (StatusCode::OK, Json(serde_json::json!({ "items": users }))).into_response()
}
