use std::sync::Arc;

use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;

use cuehall_core::{DomainError, TableId};
use cuehall_venues::Table;

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_tables).post(create_table))
        .route("/:id", get(get_table).put(update_table).delete(delete_table))
        .route("/:id/status", post(set_status))
}

pub async fn list_tables(
    Extension(services): Extension<Arc<AppServices>>,
    Query(query): Query<dto::ListTablesQuery>,
) -> axum::response::Response {
    let items = match query.club_id {
        Some(club_id) => services.tables.list_filtered(|table| table.club_id == club_id),
        None => services.tables.list(),
    };

    (StatusCode::OK, Json(serde_json::json!({ "items": items }))).into_response()
}

pub async fn get_table(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: TableId = match id.parse() {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match services.tables.get(&id) {
        Some(table) => (StatusCode::OK, Json(table)).into_response(),
        None => errors::json_error(StatusCode::NOT_FOUND, "not_found", "table not found"),
    }
}

pub async fn create_table(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::CreateTableRequest>,
) -> axum::response::Response {
    if services.clubs.get(&body.club_id).is_none() {
        return errors::domain_error_to_response(DomainError::validation("unknown club"));
    }

    let table = match Table::new(body.club_id, body.name, body.kind, body.hourly_rate_cents) {
        Ok(t) => t,
        Err(e) => return errors::domain_error_to_response(e),
    };

    services.tables.insert(table.id, table.clone());
    (StatusCode::CREATED, Json(table)).into_response()
}

pub async fn update_table(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Json(body): Json<dto::UpdateTableRequest>,
) -> axum::response::Response {
    let id: TableId = match id.parse() {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(e),
    };

    if let Some(name) = &body.name {
        if name.trim().is_empty() {
            return errors::domain_error_to_response(DomainError::validation(
                "table name must not be empty",
            ));
        }
    }
    if let Some(rate) = body.hourly_rate_cents {
        if rate < 0 {
            return errors::domain_error_to_response(DomainError::validation(
                "hourly rate must not be negative",
            ));
        }
    }

    let updated = services.tables.update(&id, |table| {
        if let Some(name) = body.name {
            table.name = name;
        }
        if let Some(kind) = body.kind {
            table.kind = kind;
        }
        if let Some(rate) = body.hourly_rate_cents {
            table.hourly_rate_cents = rate;
        }
        table.updated_at = Utc::now();
        table.clone()
    });

    match updated {
        Some(table) => (StatusCode::OK, Json(table)).into_response(),
        None => errors::json_error(StatusCode::NOT_FOUND, "not_found", "table not found"),
    }
}

pub async fn set_status(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Json(body): Json<dto::TableStatusRequest>,
) -> axum::response::Response {
    let id: TableId = match id.parse() {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(e),
    };

    let updated = services.tables.update(&id, |table| {
        table.set_status(body.status);
        table.clone()
    });

    match updated {
        Some(table) => (StatusCode::OK, Json(table)).into_response(),
        None => errors::json_error(StatusCode::NOT_FOUND, "not_found", "table not found"),
    }
}

pub async fn delete_table(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: TableId = match id.parse() {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(e),
    };

    if services.tables.remove(&id) {
        StatusCode::NO_CONTENT.into_response()
    } else {
        errors::json_error(StatusCode::NOT_FOUND, "not_found", "table not found")
    }
}
