use std::sync::Arc;

use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use chrono::Utc;

use cuehall_billing::Product;
use cuehall_core::{DomainError, ProductId};

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_products).post(create_product))
        .route("/:id", get(get_product).put(update_product).delete(delete_product))
}

pub async fn list_products(
    Extension(services): Extension<Arc<AppServices>>,
    Query(query): Query<dto::ListProductsQuery>,
) -> axum::response::Response {
    let items = match query.club_id {
        Some(club_id) => services
            .products
            .list_filtered(|product| product.club_id == club_id),
        None => services.products.list(),
    };

    (StatusCode::OK, Json(serde_json::json!({ "items": items }))).into_response()
}

pub async fn get_product(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: ProductId = match id.parse() {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match services.products.get(&id) {
        Some(product) => (StatusCode::OK, Json(product)).into_response(),
        None => errors::json_error(StatusCode::NOT_FOUND, "not_found", "product not found"),
    }
}

pub async fn create_product(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::CreateProductRequest>,
) -> axum::response::Response {
    if services.clubs.get(&body.club_id).is_none() {
        return errors::domain_error_to_response(DomainError::validation("unknown club"));
    }

    let product = match Product::new(
        body.club_id,
        body.name,
        body.description,
        body.category,
        body.price_cents,
    ) {
        Ok(p) => p,
        Err(e) => return errors::domain_error_to_response(e),
    };

    services.products.insert(product.id, product.clone());
    (StatusCode::CREATED, Json(product)).into_response()
}

pub async fn update_product(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Json(body): Json<dto::UpdateProductRequest>,
) -> axum::response::Response {
    let id: ProductId = match id.parse() {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(e),
    };

    if let Some(name) = &body.name {
        if name.trim().is_empty() {
            return errors::domain_error_to_response(DomainError::validation(
                "product name must not be empty",
            ));
        }
    }
    if let Some(price) = body.price_cents {
        if price < 0 {
            return errors::domain_error_to_response(DomainError::validation(
                "price must not be negative",
            ));
        }
    }

    let updated = services.products.update(&id, |product| {
        if let Some(name) = body.name {
            product.name = name;
        }
        if body.description.is_some() {
            product.description = body.description;
        }
        if let Some(category) = body.category {
            product.category = category;
        }
        if let Some(price) = body.price_cents {
            product.price_cents = price;
        }
        if let Some(available) = body.is_available {
            product.is_available = available;
        }
        product.updated_at = Utc::now();
        product.clone()
    });

    match updated {
        Some(product) => (StatusCode::OK, Json(product)).into_response(),
        None => errors::json_error(StatusCode::NOT_FOUND, "not_found", "product not found"),
    }
}

pub async fn delete_product(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: ProductId = match id.parse() {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(e),
    };

    if services.products.remove(&id) {
        StatusCode::NO_CONTENT.into_response()
    } else {
        errors::json_error(StatusCode::NOT_FOUND, "not_found", "product not found")
    }
}
