//! `cuehall-auth` — pure authentication/authorization boundary (zero-trust).
//!
//! This crate is intentionally decoupled from HTTP and storage: the user
//! directory and refresh-token store are contracts implemented elsewhere,
//! and token/credential verification is pure computation over the
//! process-wide signing secret.

pub mod claims;
pub mod directory;
pub mod error;
pub mod password;
pub mod roles;
pub mod service;
pub mod token;

pub use claims::{AccessClaims, RefreshClaims};
pub use directory::{RefreshTokenRecord, RefreshTokenStore, UserDirectory, UserRecord};
pub use error::AuthError;
pub use roles::Role;
pub use service::{AuthService, IdentitySummary, LoginOutcome};
pub use token::{TokenCodec, TokenError};
