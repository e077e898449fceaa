use std::sync::Arc;

use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};

use cuehall_auth::{password, IdentitySummary, UserDirectory, UserRecord};
use cuehall_core::UserId;

use crate::app::services::AppServices;
use crate::app::{dto, errors};
use crate::context::RequestIdentity;

pub fn router() -> Router {
    Router::new()
        .route("/", post(create_user).get(list_users))
        .route("/me", get(me))
        .route("/test/hash", get(test_hash))
        .route("/:username", get(get_user))
}

pub async fn list_users(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    let items = services
        .users
        .list()
        .iter()
        .map(IdentitySummary::from)
        .collect::<Vec<_>>();

    (StatusCode::OK, Json(serde_json::json!({ "items": items }))).into_response()
}

pub async fn me(
    Extension(identity): Extension<RequestIdentity>,
) -> axum::response::Response {
    // The policy guarantees an identity here; stay closed if it ever doesn't.
    let Some(user) = identity.0 else {
        return errors::unauthorized();
    };

    (
        StatusCode::OK,
        Json(serde_json::json!({
            "id": user.user_id,
            "username": user.username,
            "role": user.role,
            "authority": user.authority(),
            "company_id": user.company_id,
            "club_id": user.club_id,
        })),
    )
        .into_response()
}

pub async fn get_user(
    Extension(services): Extension<Arc<AppServices>>,
    Path(username): Path<String>,
) -> axum::response::Response {
    match services.users.find_by_username(&username) {
        Some(user) => (StatusCode::OK, Json(IdentitySummary::from(&user))).into_response(),
        None => errors::json_error(StatusCode::NOT_FOUND, "not_found", "user not found"),
    }
}

pub async fn create_user(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::CreateUserRequest>,
) -> axum::response::Response {
    if body.username.trim().is_empty() {
        return errors::json_error(StatusCode::BAD_REQUEST, "validation_error", "username must not be empty");
    }

    let password_hash = match password::hash_password(&body.password) {
        Ok(digest) => digest,
        Err(e) => {
            return errors::json_error(StatusCode::INTERNAL_SERVER_ERROR, "hashing_error", e.to_string())
        }
    };

    let user = UserRecord {
        id: UserId::new(),
        username: body.username,
        email: body.email,
        password_hash,
        role: body.role,
        company_id: body.company_id,
        club_id: body.club_id,
        is_active: true,
    };

    match services.users.create(user) {
        Ok(created) => (StatusCode::CREATED, Json(IdentitySummary::from(&created))).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

/// Owner-gated hashing utility for provisioning fixtures by hand.
pub async fn test_hash(
    Query(query): Query<dto::HashQuery>,
) -> axum::response::Response {
    match password::hash_password(&query.password) {
        Ok(digest) => (StatusCode::OK, Json(serde_json::json!({ "digest": digest }))).into_response(),
        Err(e) => errors::json_error(StatusCode::INTERNAL_SERVER_ERROR, "hashing_error", e.to_string()),
    }
}
