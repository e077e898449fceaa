use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};

use cuehall_billing::Bill;
use cuehall_core::{BillId, DomainError};

use crate::app::services::AppServices;
use crate::app::{dto, errors};
use crate::context::RequestIdentity;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_bills).post(create_bill))
        .route("/:id", get(get_bill))
        .route("/:id/pay", post(pay_bill))
}

pub async fn list_bills(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    let items = services.bills.list();
    (StatusCode::OK, Json(serde_json::json!({ "items": items }))).into_response()
}

pub async fn get_bill(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: BillId = match id.parse() {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match services.bills.get(&id) {
        Some(bill) => (StatusCode::OK, Json(bill)).into_response(),
        None => errors::json_error(StatusCode::NOT_FOUND, "not_found", "bill not found"),
    }
}

pub async fn create_bill(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(identity): Extension<RequestIdentity>,
    Json(body): Json<dto::CreateBillRequest>,
) -> axum::response::Response {
    let Some(caller) = identity.0 else {
        return errors::unauthorized();
    };

    if services.tables.get(&body.table_id).is_none() {
        return errors::domain_error_to_response(DomainError::validation("unknown table"));
    }

    let user_id = body.user_id.unwrap_or(caller.user_id);
    let bill = match Bill::new(
        body.table_id,
        body.booking_id,
        user_id,
        body.table_fee_cents,
        body.total_cents,
    ) {
        Ok(b) => b,
        Err(e) => return errors::domain_error_to_response(e),
    };

    services.bills.insert(bill.id, bill.clone());
    (StatusCode::CREATED, Json(bill)).into_response()
}

pub async fn pay_bill(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Json(body): Json<dto::PayBillRequest>,
) -> axum::response::Response {
    let id: BillId = match id.parse() {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(e),
    };

    let updated = services.bills.update(&id, |bill| {
        bill.pay(body.method, body.reference.clone())?;
        Ok(bill.clone())
    });

    match updated {
        Some(Ok(bill)) => (StatusCode::OK, Json(bill)).into_response(),
        Some(Err(e)) => errors::domain_error_to_response(e),
        None => errors::json_error(StatusCode::NOT_FOUND, "not_found", "bill not found"),
    }
}
