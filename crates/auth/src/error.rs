use thiserror::Error;

use crate::token::TokenError;

/// Authentication failure as seen by callers of the service.
///
/// Unknown user, inactive user and credential mismatch all collapse into
/// `InvalidCredentials` before leaving the service — the caller gets no
/// discriminating signal. The specific leg is logged at debug level only.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error(transparent)]
    Token(#[from] TokenError),

    /// Token is cryptographically valid but its subject no longer exists
    /// or has been deactivated since issuance.
    #[error("token subject no longer exists or is inactive")]
    StaleOrInactiveUser,
}
