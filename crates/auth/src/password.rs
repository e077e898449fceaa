//! Credential hashing and verification (Argon2id, PHC string format).

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PasswordError {
    #[error("password hashing failed")]
    Hashing,
}

/// Hash a secret with a fresh random salt.
///
/// Cost parameters are the argon2 crate defaults; raise them via a custom
/// `Argon2` instance if hardware allows.
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);

    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|_| PasswordError::Hashing)?;

    Ok(hash.to_string())
}

/// Verify a secret against a stored digest.
///
/// Never errors: a malformed digest, like a mismatch, is simply no match.
/// The underlying comparison is constant-time over the full digest, so
/// the position of a mismatch does not influence timing.
pub fn verify_password(password: &str, digest: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(digest) else {
        return false;
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}
