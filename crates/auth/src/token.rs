//! Signed-token issuance and parsing (HS256).
//!
//! Symmetric signing keeps verification cheap and local, which suits the
//! per-request validation path. The secret is process-wide configuration:
//! loaded once at startup, one active key, no runtime rotation.

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use thiserror::Error;

use crate::claims::{AccessClaims, RefreshClaims, REFRESH_TOKEN_USE};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("token has expired")]
    Expired,

    #[error("token signature is invalid")]
    SignatureInvalid,

    #[error("token is malformed")]
    Malformed,
}

/// Encoder/decoder for both token variants.
///
/// Holds only key material; lifetimes are decided by the caller when
/// building claims.
pub struct TokenCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl TokenCodec {
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
        }
    }

    pub fn issue_access_token(&self, claims: &AccessClaims) -> Result<String, TokenError> {
        jsonwebtoken::encode(&Header::new(Algorithm::HS256), claims, &self.encoding)
            .map_err(|_| TokenError::Malformed)
    }

    pub fn issue_refresh_token(&self, claims: &RefreshClaims) -> Result<String, TokenError> {
        jsonwebtoken::encode(&Header::new(Algorithm::HS256), claims, &self.encoding)
            .map_err(|_| TokenError::Malformed)
    }

    /// Verify and decode an access token.
    ///
    /// The signature is checked before any claim is inspected; expiry is a
    /// strict comparison with zero leeway (clock skew is not compensated).
    pub fn parse_access_token(&self, token: &str) -> Result<AccessClaims, TokenError> {
        let data = jsonwebtoken::decode::<AccessClaims>(token, &self.decoding, &validation())
            .map_err(map_jwt_error)?;
        Ok(data.claims)
    }

    /// Verify and decode a refresh token.
    ///
    /// Rejects access tokens: the decoded claims must carry the refresh
    /// discriminator.
    pub fn parse_refresh_token(&self, token: &str) -> Result<RefreshClaims, TokenError> {
        let data = jsonwebtoken::decode::<RefreshClaims>(token, &self.decoding, &validation())
            .map_err(map_jwt_error)?;

        if data.claims.token_use != REFRESH_TOKEN_USE {
            return Err(TokenError::Malformed);
        }

        Ok(data.claims)
    }

    /// Convenience wrapper that swallows the failure reason.
    pub fn is_valid(&self, token: &str) -> bool {
        self.parse_access_token(token).is_ok()
    }
}

fn validation() -> Validation {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;
    validation
}

fn map_jwt_error(err: jsonwebtoken::errors::Error) -> TokenError {
    use jsonwebtoken::errors::ErrorKind;

    match err.kind() {
        ErrorKind::ExpiredSignature => TokenError::Expired,
        ErrorKind::InvalidSignature => TokenError::SignatureInvalid,
        _ => TokenError::Malformed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use cuehall_core::{CompanyId, UserId};

    use crate::{Role, UserRecord};

    const SECRET: &[u8] = b"test-signing-secret";

    fn codec() -> TokenCodec {
        TokenCodec::new(SECRET)
    }

    fn user(username: &str, role: Role) -> UserRecord {
        UserRecord {
            id: UserId::new(),
            username: username.to_string(),
            email: format!("{username}@example.com"),
            password_hash: String::new(),
            role,
            company_id: Some(CompanyId::new()),
            club_id: None,
            is_active: true,
        }
    }

    /// Flip one character of the signature segment, staying within the
    /// base64url alphabet so the failure is cryptographic, not syntactic.
    fn tamper_signature(token: &str) -> String {
        let sig_start = token.rfind('.').unwrap() + 1;
        let mut bytes = token.as_bytes().to_vec();
        let target = &mut bytes[sig_start];
        *target = if *target == b'A' { b'B' } else { b'A' };
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn access_token_round_trip() {
        let codec = codec();
        let user = user("alice", Role::Staff);
        let claims = AccessClaims::for_user(&user, Utc::now(), Duration::minutes(15));

        let token = codec.issue_access_token(&claims).unwrap();
        let parsed = codec.parse_access_token(&token).unwrap();

        assert_eq!(parsed, claims);
    }

    #[test]
    fn refresh_token_round_trip() {
        let codec = codec();
        let claims = RefreshClaims::new("alice", Utc::now(), Duration::days(7));

        let token = codec.issue_refresh_token(&claims).unwrap();
        let parsed = codec.parse_refresh_token(&token).unwrap();

        assert_eq!(parsed, claims);
    }

    #[test]
    fn tampered_signature_fails_as_signature_error() {
        let codec = codec();
        let user = user("alice", Role::Staff);
        let claims = AccessClaims::for_user(&user, Utc::now(), Duration::hours(1));
        let token = codec.issue_access_token(&claims).unwrap();

        let tampered = tamper_signature(&token);
        assert_ne!(tampered, token);
        assert_eq!(
            codec.parse_access_token(&tampered),
            Err(TokenError::SignatureInvalid)
        );
    }

    #[test]
    fn token_signed_with_another_secret_is_rejected() {
        let other = TokenCodec::new(b"some-other-secret");
        let user = user("alice", Role::Staff);
        let claims = AccessClaims::for_user(&user, Utc::now(), Duration::hours(1));
        let token = other.issue_access_token(&claims).unwrap();

        assert_eq!(
            codec().parse_access_token(&token),
            Err(TokenError::SignatureInvalid)
        );
    }

    #[test]
    fn expired_token_is_rejected() {
        let codec = codec();
        let user = user("alice", Role::Staff);
        let mut claims = AccessClaims::for_user(&user, Utc::now() - Duration::minutes(10), Duration::minutes(5));
        claims.exp = Utc::now() - Duration::seconds(1);

        let token = codec.issue_access_token(&claims).unwrap();
        assert_eq!(codec.parse_access_token(&token), Err(TokenError::Expired));
        assert!(!codec.is_valid(&token));
    }

    #[test]
    fn token_expiring_in_an_hour_is_accepted() {
        let codec = codec();
        let user = user("alice", Role::Staff);
        let claims = AccessClaims::for_user(&user, Utc::now(), Duration::hours(1));

        let token = codec.issue_access_token(&claims).unwrap();
        assert!(codec.is_valid(&token));
    }

    #[test]
    fn garbage_is_malformed() {
        assert_eq!(
            codec().parse_access_token("definitely.not.a-token"),
            Err(TokenError::Malformed)
        );
        assert!(!codec().is_valid(""));
    }

    #[test]
    fn refresh_token_is_not_an_access_token() {
        let codec = codec();
        let refresh = RefreshClaims::new("alice", Utc::now(), Duration::days(7));
        let token = codec.issue_refresh_token(&refresh).unwrap();

        // Missing identity claims: rejected before any identity can be built.
        assert_eq!(codec.parse_access_token(&token), Err(TokenError::Malformed));
    }

    #[test]
    fn access_token_is_not_a_refresh_token() {
        let codec = codec();
        let user = user("alice", Role::Owner);
        let claims = AccessClaims::for_user(&user, Utc::now(), Duration::minutes(15));
        let token = codec.issue_access_token(&claims).unwrap();

        assert_eq!(codec.parse_refresh_token(&token), Err(TokenError::Malformed));
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        fn role_strategy() -> impl Strategy<Value = Role> {
            prop_oneof![
                Just(Role::Owner),
                Just(Role::ClubManager),
                Just(Role::Staff),
                Just(Role::Customer),
            ]
        }

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 256,
                ..ProptestConfig::default()
            })]

            /// Property: parse(issue(claims)) == claims for any subject,
            /// role and positive ttl, evaluated before expiry.
            #[test]
            fn round_trip_law(
                username in "[a-z][a-z0-9_.-]{0,31}",
                role in role_strategy(),
                ttl_secs in 30i64..86_400,
            ) {
                let codec = codec();
                let user = user(&username, role);
                let claims = AccessClaims::for_user(&user, Utc::now(), Duration::seconds(ttl_secs));

                let token = codec.issue_access_token(&claims).unwrap();
                let parsed = codec.parse_access_token(&token).unwrap();

                prop_assert_eq!(&parsed.sub, &username);
                prop_assert_eq!(parsed.role, role);
                prop_assert_eq!(parsed, claims);
            }
        }
    }
}
