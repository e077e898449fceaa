use serde::{Deserialize, Serialize};

use cuehall_auth::{IdentitySummary, LoginOutcome, Role};
use cuehall_billing::{OrderStatus, PaymentMethod, ProductCategory};
use cuehall_bookings::BookingStatus;
use cuehall_core::{BookingId, ClubId, CompanyId, ProductId, TableId, UserId};
use cuehall_venues::{TableKind, TableStatus};

// -------------------------
// Auth
// -------------------------

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub user: IdentitySummary,
}

impl From<LoginOutcome> for LoginResponse {
    fn from(outcome: LoginOutcome) -> Self {
        Self {
            access_token: outcome.access_token,
            refresh_token: outcome.refresh_token,
            token_type: "Bearer".to_string(),
            expires_in: outcome.expires_in,
            user: outcome.user,
        }
    }
}

// -------------------------
// Users
// -------------------------

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub role: Role,
    pub company_id: Option<CompanyId>,
    pub club_id: Option<ClubId>,
}

#[derive(Debug, Deserialize)]
pub struct HashQuery {
    pub password: String,
}

// -------------------------
// Venues
// -------------------------

#[derive(Debug, Deserialize)]
pub struct CreateCompanyRequest {
    pub name: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateCompanyRequest {
    pub name: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateClubRequest {
    pub company_id: CompanyId,
    pub name: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub opening_hours: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateClubRequest {
    pub name: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub opening_hours: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ListClubsQuery {
    pub company_id: Option<CompanyId>,
}

#[derive(Debug, Deserialize)]
pub struct CreateTableRequest {
    pub club_id: ClubId,
    pub name: String,
    pub kind: TableKind,
    pub hourly_rate_cents: i64,
}

#[derive(Debug, Deserialize)]
pub struct UpdateTableRequest {
    pub name: Option<String>,
    pub kind: Option<TableKind>,
    pub hourly_rate_cents: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct TableStatusRequest {
    pub status: TableStatus,
}

#[derive(Debug, Deserialize)]
pub struct ListTablesQuery {
    pub club_id: Option<ClubId>,
}

// -------------------------
// Bookings
// -------------------------

#[derive(Debug, Deserialize)]
pub struct CreateBookingRequest {
    pub table_id: TableId,
    /// Defaults to the authenticated caller.
    pub user_id: Option<UserId>,
    pub starts_at: chrono::DateTime<chrono::Utc>,
    pub ends_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Deserialize)]
pub struct BookingStatusRequest {
    pub status: BookingStatus,
}

// -------------------------
// Billing
// -------------------------

#[derive(Debug, Deserialize)]
pub struct CreateProductRequest {
    pub club_id: ClubId,
    pub name: String,
    pub description: Option<String>,
    pub category: ProductCategory,
    pub price_cents: i64,
}

#[derive(Debug, Deserialize)]
pub struct UpdateProductRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub category: Option<ProductCategory>,
    pub price_cents: Option<i64>,
    pub is_available: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct ListProductsQuery {
    pub club_id: Option<ClubId>,
}

#[derive(Debug, Deserialize)]
pub struct CreateOrderRequest {
    pub table_id: TableId,
}

#[derive(Debug, Deserialize)]
pub struct AddOrderItemRequest {
    pub product_id: ProductId,
    pub quantity: u32,
}

#[derive(Debug, Deserialize)]
pub struct OrderStatusRequest {
    pub status: OrderStatus,
}

#[derive(Debug, Deserialize)]
pub struct CreateBillRequest {
    pub table_id: TableId,
    pub booking_id: Option<BookingId>,
    /// Defaults to the authenticated caller.
    pub user_id: Option<UserId>,
    pub table_fee_cents: i64,
    pub total_cents: i64,
}

#[derive(Debug, Deserialize)]
pub struct PayBillRequest {
    pub method: PaymentMethod,
    pub reference: Option<String>,
}
