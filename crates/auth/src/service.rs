//! Authentication orchestration: credential login, per-request identity
//! resolution, refresh-token exchange.

use std::sync::Arc;

use chrono::{Duration, Utc};
use serde::Serialize;

use cuehall_core::{ClubId, CompanyId, UserId};

use crate::claims::{AccessClaims, RefreshClaims};
use crate::directory::{RefreshTokenRecord, RefreshTokenStore, UserDirectory, UserRecord};
use crate::error::AuthError;
use crate::password;
use crate::token::TokenCodec;
use crate::Role;

/// User summary returned to the client after a successful login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IdentitySummary {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub role: Role,
    pub company_id: Option<CompanyId>,
    pub club_id: Option<ClubId>,
}

impl From<&UserRecord> for IdentitySummary {
    fn from(user: &UserRecord) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            role: user.role,
            company_id: user.company_id,
            club_id: user.club_id,
        }
    }
}

/// Result of a successful login or refresh: a token pair plus a summary
/// suitable for client display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginOutcome {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in: i64,
    pub user: IdentitySummary,
}

/// Stateless authentication orchestrator.
///
/// Shares nothing mutable between requests beyond the read-only user
/// directory and refresh-token store; token work is pure computation over
/// the immutable signing secret.
pub struct AuthService {
    directory: Arc<dyn UserDirectory>,
    refresh_tokens: Arc<dyn RefreshTokenStore>,
    codec: TokenCodec,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl AuthService {
    pub fn new(
        directory: Arc<dyn UserDirectory>,
        refresh_tokens: Arc<dyn RefreshTokenStore>,
        secret: &[u8],
        access_ttl: Duration,
        refresh_ttl: Duration,
    ) -> Self {
        Self {
            directory,
            refresh_tokens,
            codec: TokenCodec::new(secret),
            access_ttl,
            refresh_ttl,
        }
    }

    /// Verify credentials and issue a token pair.
    ///
    /// Every failure leg returns the same `InvalidCredentials` so callers
    /// cannot distinguish an unknown username from a wrong secret or a
    /// deactivated account.
    pub fn login(&self, username: &str, password: &str) -> Result<LoginOutcome, AuthError> {
        let Some(user) = self.directory.find_by_username(username) else {
            tracing::debug!(username, "login rejected: unknown user");
            return Err(AuthError::InvalidCredentials);
        };

        if !user.is_active {
            tracing::debug!(username, "login rejected: user inactive");
            return Err(AuthError::InvalidCredentials);
        }

        if !password::verify_password(password, &user.password_hash) {
            tracing::debug!(username, "login rejected: credential mismatch");
            return Err(AuthError::InvalidCredentials);
        }

        self.issue_token_pair(&user)
    }

    /// Resolve an access token to the *live* user record.
    ///
    /// Claims embedded in the token are not trusted for authorization: the
    /// user is re-fetched so role changes and deactivation take effect
    /// without waiting for the token to expire.
    pub fn resolve_identity(&self, access_token: &str) -> Result<UserRecord, AuthError> {
        let claims = self.codec.parse_access_token(access_token)?;

        let Some(user) = self.directory.find_by_username(&claims.sub) else {
            return Err(AuthError::StaleOrInactiveUser);
        };
        if !user.is_active {
            return Err(AuthError::StaleOrInactiveUser);
        }

        Ok(user)
    }

    /// Exchange a refresh token for a fresh token pair.
    ///
    /// The presented token must verify, must have a live store row, and its
    /// subject must still be an active user. The row is rotated: the old
    /// token stops working the moment the new pair is issued. Failures are
    /// as uniform as login failures.
    pub fn refresh(&self, refresh_token: &str) -> Result<LoginOutcome, AuthError> {
        let claims = self.codec.parse_refresh_token(refresh_token).map_err(|err| {
            tracing::debug!(%err, "refresh rejected: token invalid");
            AuthError::InvalidCredentials
        })?;

        let Some(row) = self.refresh_tokens.find(refresh_token) else {
            tracing::debug!(subject = %claims.sub, "refresh rejected: token not on record");
            return Err(AuthError::InvalidCredentials);
        };
        if row.expires_at <= Utc::now() {
            self.refresh_tokens.remove(refresh_token);
            tracing::debug!(subject = %claims.sub, "refresh rejected: record expired");
            return Err(AuthError::InvalidCredentials);
        }

        let Some(user) = self.directory.find_by_username(&claims.sub) else {
            tracing::debug!(subject = %claims.sub, "refresh rejected: unknown subject");
            return Err(AuthError::InvalidCredentials);
        };
        if !user.is_active {
            tracing::debug!(subject = %claims.sub, "refresh rejected: user inactive");
            return Err(AuthError::InvalidCredentials);
        }

        self.refresh_tokens.remove(refresh_token);
        self.issue_token_pair(&user)
    }

    fn issue_token_pair(&self, user: &UserRecord) -> Result<LoginOutcome, AuthError> {
        let now = Utc::now();

        let access_claims = AccessClaims::for_user(user, now, self.access_ttl);
        let access_token = self.codec.issue_access_token(&access_claims)?;

        let refresh_claims = RefreshClaims::new(&user.username, now, self.refresh_ttl);
        let refresh_token = self.codec.issue_refresh_token(&refresh_claims)?;

        self.refresh_tokens.put(RefreshTokenRecord {
            token: refresh_token.clone(),
            user_id: user.id,
            expires_at: refresh_claims.exp,
        });

        tracing::debug!(username = %user.username, role = %user.role, "token pair issued");

        Ok(LoginOutcome {
            access_token,
            refresh_token,
            expires_in: self.access_ttl.num_seconds(),
            user: IdentitySummary::from(user),
        })
    }
}
