use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};

use cuehall_bookings::Booking;
use cuehall_core::{BookingId, DomainError};

use crate::app::services::AppServices;
use crate::app::{dto, errors};
use crate::context::RequestIdentity;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_bookings).post(create_booking))
        .route("/:id", get(get_booking).delete(delete_booking))
        .route("/:id/status", post(set_status))
}

pub async fn list_bookings(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    let items = services.bookings.list();
    (StatusCode::OK, Json(serde_json::json!({ "items": items }))).into_response()
}

pub async fn get_booking(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: BookingId = match id.parse() {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match services.bookings.get(&id) {
        Some(booking) => (StatusCode::OK, Json(booking)).into_response(),
        None => errors::json_error(StatusCode::NOT_FOUND, "not_found", "booking not found"),
    }
}

pub async fn create_booking(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(identity): Extension<RequestIdentity>,
    Json(body): Json<dto::CreateBookingRequest>,
) -> axum::response::Response {
    let Some(caller) = identity.0 else {
        return errors::unauthorized();
    };

    if services.tables.get(&body.table_id).is_none() {
        return errors::domain_error_to_response(DomainError::validation("unknown table"));
    }

    let user_id = body.user_id.unwrap_or(caller.user_id);
    let booking = match Booking::new(body.table_id, user_id, body.starts_at, body.ends_at) {
        Ok(b) => b,
        Err(e) => return errors::domain_error_to_response(e),
    };

    services.bookings.insert(booking.id, booking.clone());
    (StatusCode::CREATED, Json(booking)).into_response()
}

pub async fn set_status(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Json(body): Json<dto::BookingStatusRequest>,
) -> axum::response::Response {
    let id: BookingId = match id.parse() {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(e),
    };

    let updated = services.bookings.update(&id, |booking| {
        booking.transition(body.status)?;
        Ok(booking.clone())
    });

    match updated {
        Some(Ok(booking)) => (StatusCode::OK, Json(booking)).into_response(),
        Some(Err(e)) => errors::domain_error_to_response(e),
        None => errors::json_error(StatusCode::NOT_FOUND, "not_found", "booking not found"),
    }
}

pub async fn delete_booking(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: BookingId = match id.parse() {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(e),
    };

    if services.bookings.remove(&id) {
        StatusCode::NO_CONTENT.into_response()
    } else {
        errors::json_error(StatusCode::NOT_FOUND, "not_found", "booking not found")
    }
}
