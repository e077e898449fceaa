use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use chrono::Utc;

use cuehall_core::{CompanyId, DomainError};
use cuehall_venues::Company;

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_companies).post(create_company))
        .route("/:id", get(get_company).put(update_company).delete(delete_company))
}

pub async fn list_companies(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    let items = services.companies.list();
    (StatusCode::OK, Json(serde_json::json!({ "items": items }))).into_response()
}

pub async fn get_company(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: CompanyId = match id.parse() {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match services.companies.get(&id) {
        Some(company) => (StatusCode::OK, Json(company)).into_response(),
        None => errors::json_error(StatusCode::NOT_FOUND, "not_found", "company not found"),
    }
}

pub async fn create_company(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::CreateCompanyRequest>,
) -> axum::response::Response {
    let company = match Company::new(body.name, body.address, body.phone, body.email) {
        Ok(c) => c,
        Err(e) => return errors::domain_error_to_response(e),
    };

    services.companies.insert(company.id, company.clone());
    (StatusCode::CREATED, Json(company)).into_response()
}

pub async fn update_company(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Json(body): Json<dto::UpdateCompanyRequest>,
) -> axum::response::Response {
    let id: CompanyId = match id.parse() {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(e),
    };

    if let Some(name) = &body.name {
        if name.trim().is_empty() {
            return errors::domain_error_to_response(DomainError::validation(
                "company name must not be empty",
            ));
        }
    }

    let updated = services.companies.update(&id, |company| {
        if let Some(name) = body.name {
            company.name = name;
        }
        if body.address.is_some() {
            company.address = body.address;
        }
        if body.phone.is_some() {
            company.phone = body.phone;
        }
        if body.email.is_some() {
            company.email = body.email;
        }
        company.updated_at = Utc::now();
        company.clone()
    });

    match updated {
        Some(company) => (StatusCode::OK, Json(company)).into_response(),
        None => errors::json_error(StatusCode::NOT_FOUND, "not_found", "company not found"),
    }
}

pub async fn delete_company(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: CompanyId = match id.parse() {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(e),
    };

    if services.companies.remove(&id) {
        StatusCode::NO_CONTENT.into_response()
    } else {
        errors::json_error(StatusCode::NOT_FOUND, "not_found", "company not found")
    }
}
