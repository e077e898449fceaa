use std::sync::Arc;

use axum::{
    extract::State,
    http::HeaderMap,
    middleware::Next,
    response::Response,
};

use cuehall_auth::AuthService;

use crate::context::{CurrentUser, RequestIdentity};

#[derive(Clone)]
pub struct AuthState {
    pub auth: Arc<AuthService>,
}

/// Request authenticator. Runs once per request, before any handler.
///
/// Establishes identity but never rejects: an absent, malformed or
/// unverifiable credential leaves the request anonymous, and the access
/// policy decides whether anonymous is good enough for the target. This
/// keeps public endpoints free of token handling and denies attackers a
/// signal distinguishing bad, expired and stale tokens.
pub async fn authenticate(
    State(state): State<AuthState>,
    mut req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Response {
    let identity = bearer_token(req.headers()).and_then(|token| {
        match state.auth.resolve_identity(token) {
            Ok(user) => Some(CurrentUser::from(user)),
            Err(err) => {
                tracing::debug!(%err, "bearer token did not resolve to an identity");
                None
            }
        }
    });

    req.extensions_mut().insert(RequestIdentity(identity));
    next.run(req).await
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let header = headers.get(axum::http::header::AUTHORIZATION)?;
    let token = header.to_str().ok()?.strip_prefix("Bearer ")?.trim();
    if token.is_empty() {
        return None;
    }
    Some(token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::header::AUTHORIZATION;

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, value.parse().unwrap());
        headers
    }

    #[test]
    fn extracts_the_token_after_the_bearer_prefix() {
        assert_eq!(bearer_token(&headers("Bearer abc.def.ghi")), Some("abc.def.ghi"));
    }

    #[test]
    fn missing_or_malformed_header_is_anonymous() {
        assert_eq!(bearer_token(&HeaderMap::new()), None);
        assert_eq!(bearer_token(&headers("Basic dXNlcjpwdw==")), None);
        assert_eq!(bearer_token(&headers("Bearer ")), None);
        assert_eq!(bearer_token(&headers("bearer abc")), None);
    }
}
