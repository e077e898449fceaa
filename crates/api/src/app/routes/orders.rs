use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};

use cuehall_billing::{Order, OrderItem};
use cuehall_core::{DomainError, OrderId};

use crate::app::services::AppServices;
use crate::app::{dto, errors};
use crate::context::RequestIdentity;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_orders).post(create_order))
        .route("/:id", get(get_order))
        .route("/:id/items", post(add_item))
        .route("/:id/status", post(set_status))
}

pub async fn list_orders(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    let items = services.orders.list();
    (StatusCode::OK, Json(serde_json::json!({ "items": items }))).into_response()
}

pub async fn get_order(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: OrderId = match id.parse() {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(e),
    };

    let Some(order) = services.orders.get(&id) else {
        return errors::json_error(StatusCode::NOT_FOUND, "not_found", "order not found");
    };

    let lines = services.order_items.list_filtered(|item| item.order_id == id);

    (
        StatusCode::OK,
        Json(serde_json::json!({ "order": order, "items": lines })),
    )
        .into_response()
}

pub async fn create_order(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(identity): Extension<RequestIdentity>,
    Json(body): Json<dto::CreateOrderRequest>,
) -> axum::response::Response {
    let Some(caller) = identity.0 else {
        return errors::unauthorized();
    };

    if services.tables.get(&body.table_id).is_none() {
        return errors::domain_error_to_response(DomainError::validation("unknown table"));
    }

    let order = Order::new(body.table_id, caller.user_id);
    services.orders.insert(order.id, order.clone());
    (StatusCode::CREATED, Json(order)).into_response()
}

/// Add a line to a pending order. The unit price is read from the product
/// catalog at add time.
pub async fn add_item(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Json(body): Json<dto::AddOrderItemRequest>,
) -> axum::response::Response {
    let id: OrderId = match id.parse() {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(e),
    };

    let Some(product) = services.products.get(&body.product_id) else {
        return errors::domain_error_to_response(DomainError::validation("unknown product"));
    };
    if !product.is_available {
        return errors::domain_error_to_response(DomainError::conflict(
            "product is not available",
        ));
    }

    let item = match OrderItem::new(id, product.id, body.quantity, product.price_cents) {
        Ok(i) => i,
        Err(e) => return errors::domain_error_to_response(e),
    };

    let updated = services.orders.update(&id, |order| {
        order.add_line(&item)?;
        Ok(order.total_cents)
    });

    match updated {
        Some(Ok(total_cents)) => {
            services.order_items.insert(item.id, item.clone());
            (
                StatusCode::CREATED,
                Json(serde_json::json!({ "item": item, "order_total_cents": total_cents })),
            )
                .into_response()
        }
        Some(Err(e)) => errors::domain_error_to_response(e),
        None => errors::json_error(StatusCode::NOT_FOUND, "not_found", "order not found"),
    }
}

pub async fn set_status(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Json(body): Json<dto::OrderStatusRequest>,
) -> axum::response::Response {
    let id: OrderId = match id.parse() {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(e),
    };

    let updated = services.orders.update(&id, |order| {
        order.transition(body.status)?;
        Ok(order.clone())
    });

    match updated {
        Some(Ok(order)) => (StatusCode::OK, Json(order)).into_response(),
        Some(Err(e)) => errors::domain_error_to_response(e),
        None => errors::json_error(StatusCode::NOT_FOUND, "not_found", "order not found"),
    }
}
