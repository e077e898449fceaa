use axum::Router;

pub mod auth;
pub mod bills;
pub mod bookings;
pub mod clubs;
pub mod companies;
pub mod orders;
pub mod products;
pub mod system;
pub mod tables;
pub mod users;

/// Router for all policy-gated endpoints. (`/health` is wired separately
/// next to the middleware stack.)
pub fn router() -> Router {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/users", users::router())
        .nest("/companies", companies::router())
        .nest("/clubs", clubs::router())
        .nest("/tables", tables::router())
        .nest("/bookings", bookings::router())
        .nest("/orders", orders::router())
        .nest("/billing", bills::router())
        .nest("/products", products::router())
}
