use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use cuehall_core::{ClubId, CompanyId, UserId};

use crate::Role;

/// A user row as seen by the authentication core.
///
/// The core only ever *reads* these; user management (creation, role
/// changes, deactivation) is owned by a separate collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub company_id: Option<CompanyId>,
    pub club_id: Option<ClubId>,
    pub is_active: bool,
}

/// Read-only user lookup contract.
///
/// One keyed read per authentication; the implementation owns its own
/// concurrency discipline.
pub trait UserDirectory: Send + Sync {
    fn find_by_username(&self, username: &str) -> Option<UserRecord>;
}

/// A persisted refresh token, keyed by its own value.
///
/// The expiry column duplicates the claim inside the token so the row can
/// be expired (or revoked) without parsing it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshTokenRecord {
    pub token: String,
    pub user_id: UserId,
    pub expires_at: DateTime<Utc>,
}

/// Storage contract for issued refresh tokens.
pub trait RefreshTokenStore: Send + Sync {
    fn put(&self, record: RefreshTokenRecord);
    fn find(&self, token: &str) -> Option<RefreshTokenRecord>;
    fn remove(&self, token: &str);
}
