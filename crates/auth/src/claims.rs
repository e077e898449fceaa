use chrono::serde::ts_seconds;
use chrono::{DateTime, Duration, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use cuehall_core::{ClubId, CompanyId, UserId};

use crate::{Role, UserRecord};

/// Discriminator embedded in refresh tokens so the two token kinds can
/// never be confused, even though both are signed with the same key.
pub const REFRESH_TOKEN_USE: &str = "refresh";

/// Identity claims carried by an access token.
///
/// Immutable once issued; trusted only after the signature verifies and
/// before `exp`. Role/tenant claims are a snapshot — the authentication
/// service re-reads the live user row before authorizing with them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessClaims {
    /// Subject: the username.
    pub sub: String,

    pub user_id: UserId,

    pub role: Role,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_id: Option<CompanyId>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub club_id: Option<ClubId>,

    /// Issued-at, seconds since epoch on the wire.
    #[serde(with = "ts_seconds")]
    pub iat: DateTime<Utc>,

    /// Expiry, seconds since epoch on the wire.
    #[serde(with = "ts_seconds")]
    pub exp: DateTime<Utc>,
}

impl AccessClaims {
    pub fn for_user(user: &UserRecord, issued_at: DateTime<Utc>, ttl: Duration) -> Self {
        // Whole seconds: the wire format carries no finer resolution, and
        // claims must survive a round trip unchanged.
        let issued_at = issued_at.trunc_subsecs(0);
        Self {
            sub: user.username.clone(),
            user_id: user.id,
            role: user.role,
            company_id: user.company_id,
            club_id: user.club_id,
            iat: issued_at,
            exp: (issued_at + ttl).trunc_subsecs(0),
        }
    }
}

/// Claims carried by a refresh token.
///
/// Deliberately narrow: no role, no tenant ids. A refresh token proves
/// nothing on its own; it must be exchanged through the authentication
/// service for a fresh access token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshClaims {
    pub sub: String,

    pub token_use: String,

    /// Unique per issuance, so two refresh tokens minted within the same
    /// second still rotate independently.
    pub jti: String,

    #[serde(with = "ts_seconds")]
    pub iat: DateTime<Utc>,

    #[serde(with = "ts_seconds")]
    pub exp: DateTime<Utc>,
}

impl RefreshClaims {
    pub fn new(subject: impl Into<String>, issued_at: DateTime<Utc>, ttl: Duration) -> Self {
        let issued_at = issued_at.trunc_subsecs(0);
        Self {
            sub: subject.into(),
            token_use: REFRESH_TOKEN_USE.to_string(),
            jti: Uuid::now_v7().to_string(),
            iat: issued_at,
            exp: (issued_at + ttl).trunc_subsecs(0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> UserRecord {
        UserRecord {
            id: UserId::new(),
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            password_hash: String::new(),
            role: Role::Staff,
            company_id: Some(CompanyId::new()),
            club_id: None,
            is_active: true,
        }
    }

    #[test]
    fn access_claims_snapshot_the_user_row() {
        let user = sample_user();
        let now = Utc::now();
        let claims = AccessClaims::for_user(&user, now, Duration::minutes(15));

        assert_eq!(claims.sub, "alice");
        assert_eq!(claims.user_id, user.id);
        assert_eq!(claims.role, Role::Staff);
        assert_eq!(claims.company_id, user.company_id);
        assert_eq!(
            claims.exp.timestamp(),
            (now + Duration::minutes(15)).timestamp()
        );
    }

    #[test]
    fn timestamps_serialize_as_epoch_seconds() {
        let user = sample_user();
        let now = Utc::now();
        let claims = AccessClaims::for_user(&user, now, Duration::hours(1));
        let json: serde_json::Value = serde_json::to_value(&claims).unwrap();

        assert_eq!(json["iat"], serde_json::json!(now.timestamp()));
        assert_eq!(json["exp"], serde_json::json!((now + Duration::hours(1)).timestamp()));
    }

    #[test]
    fn absent_tenant_ids_are_omitted_from_the_wire() {
        let mut user = sample_user();
        user.company_id = None;
        let claims = AccessClaims::for_user(&user, Utc::now(), Duration::minutes(5));
        let json: serde_json::Value = serde_json::to_value(&claims).unwrap();

        assert!(json.get("company_id").is_none());
        assert!(json.get("club_id").is_none());
    }

    #[test]
    fn refresh_claims_carry_only_the_subject() {
        let claims = RefreshClaims::new("alice", Utc::now(), Duration::days(7));
        let json: serde_json::Value = serde_json::to_value(&claims).unwrap();

        assert_eq!(json["sub"], "alice");
        assert_eq!(json["token_use"], REFRESH_TOKEN_USE);
        assert!(json.get("role").is_none());
    }
}
