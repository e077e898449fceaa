use std::sync::Arc;

use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use chrono::Utc;

use cuehall_core::{ClubId, DomainError};
use cuehall_venues::Club;

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_clubs).post(create_club))
        .route("/:id", get(get_club).put(update_club).delete(delete_club))
}

pub async fn list_clubs(
    Extension(services): Extension<Arc<AppServices>>,
    Query(query): Query<dto::ListClubsQuery>,
) -> axum::response::Response {
    let items = match query.company_id {
        Some(company_id) => services
            .clubs
            .list_filtered(|club| club.company_id == company_id),
        None => services.clubs.list(),
    };

    (StatusCode::OK, Json(serde_json::json!({ "items": items }))).into_response()
}

pub async fn get_club(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: ClubId = match id.parse() {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match services.clubs.get(&id) {
        Some(club) => (StatusCode::OK, Json(club)).into_response(),
        None => errors::json_error(StatusCode::NOT_FOUND, "not_found", "club not found"),
    }
}

pub async fn create_club(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::CreateClubRequest>,
) -> axum::response::Response {
    if services.companies.get(&body.company_id).is_none() {
        return errors::domain_error_to_response(DomainError::validation("unknown company"));
    }

    let club = match Club::new(
        body.company_id,
        body.name,
        body.address,
        body.phone,
        body.email,
        body.opening_hours,
    ) {
        Ok(c) => c,
        Err(e) => return errors::domain_error_to_response(e),
    };

    services.clubs.insert(club.id, club.clone());
    (StatusCode::CREATED, Json(club)).into_response()
}

pub async fn update_club(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Json(body): Json<dto::UpdateClubRequest>,
) -> axum::response::Response {
    let id: ClubId = match id.parse() {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(e),
    };

    if let Some(name) = &body.name {
        if name.trim().is_empty() {
            return errors::domain_error_to_response(DomainError::validation(
                "club name must not be empty",
            ));
        }
    }

    let updated = services.clubs.update(&id, |club| {
        if let Some(name) = body.name {
            club.name = name;
        }
        if body.address.is_some() {
            club.address = body.address;
        }
        if body.phone.is_some() {
            club.phone = body.phone;
        }
        if body.email.is_some() {
            club.email = body.email;
        }
        if body.opening_hours.is_some() {
            club.opening_hours = body.opening_hours;
        }
        club.updated_at = Utc::now();
        club.clone()
    });

    match updated {
        Some(club) => (StatusCode::OK, Json(club)).into_response(),
        None => errors::json_error(StatusCode::NOT_FOUND, "not_found", "club not found"),
    }
}

pub async fn delete_club(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: ClubId = match id.parse() {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(e),
    };

    if services.clubs.remove(&id) {
        StatusCode::NO_CONTENT.into_response()
    } else {
        errors::json_error(StatusCode::NOT_FOUND, "not_found", "club not found")
    }
}
