//! Path-based access policy, evaluated after authentication and before
//! any handler.
//!
//! The policy is an explicit ordered list: entries are checked top-down
//! and the first matching pattern wins, so more specific patterns must be
//! declared before the general ones that would shadow them. Paths no
//! entry matches require authentication (fail closed).

use std::sync::Arc;

use axum::{extract::State, middleware::Next, response::Response};

use cuehall_auth::Role;

use crate::app::errors;
use crate::context::{CurrentUser, RequestIdentity};

/// What a request target demands of the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessRequirement {
    /// No identity needed; token parsing is never consulted.
    Public,
    /// Any resolved identity.
    Authenticated,
    /// A resolved identity holding exactly this role.
    Role(Role),
}

/// `/a/b` matches only itself; `/a/b/**` matches `/a/b` and everything
/// below it.
#[derive(Debug, Clone)]
struct PathPattern {
    prefix: String,
    wildcard: bool,
}

impl PathPattern {
    fn parse(pattern: &str) -> Self {
        match pattern.strip_suffix("/**") {
            Some(prefix) => Self {
                prefix: prefix.to_string(),
                wildcard: true,
            },
            None => Self {
                prefix: pattern.to_string(),
                wildcard: false,
            },
        }
    }

    fn matches(&self, path: &str) -> bool {
        if !self.wildcard {
            return path == self.prefix;
        }
        match path.strip_prefix(self.prefix.as_str()) {
            Some(rest) => rest.is_empty() || rest.starts_with('/'),
            None => false,
        }
    }
}

/// Ordered (pattern, requirement) table.
#[derive(Debug, Clone)]
pub struct AccessPolicy {
    entries: Vec<(PathPattern, AccessRequirement)>,
}

impl AccessPolicy {
    pub fn new(entries: &[(&str, AccessRequirement)]) -> Self {
        Self {
            entries: entries
                .iter()
                .map(|(pattern, requirement)| (PathPattern::parse(pattern), *requirement))
                .collect(),
        }
    }

    /// First match wins; unmatched paths default to `Authenticated`.
    pub fn requirement_for(&self, path: &str) -> AccessRequirement {
        self.entries
            .iter()
            .find(|(pattern, _)| pattern.matches(path))
            .map(|(_, requirement)| *requirement)
            .unwrap_or(AccessRequirement::Authenticated)
    }

    pub fn allows(&self, path: &str, identity: Option<&CurrentUser>) -> bool {
        match self.requirement_for(path) {
            AccessRequirement::Public => true,
            AccessRequirement::Authenticated => identity.is_some(),
            AccessRequirement::Role(role) => identity.is_some_and(|user| user.role == role),
        }
    }
}

/// The policy table for this API.
///
/// Ordering: public login/liveness endpoints first, then the role-gated
/// debug utilities (more specific than their `/auth/**` and `/users/**`
/// siblings), then the authenticated domain areas.
pub fn default_policy() -> AccessPolicy {
    use AccessRequirement::*;

    AccessPolicy::new(&[
        ("/auth/login", Public),
        ("/auth/refresh", Public),
        ("/health", Public),
        ("/auth/debug/**", Role(cuehall_auth::Role::Owner)),
        ("/users/test/**", Role(cuehall_auth::Role::Owner)),
        ("/companies/**", Authenticated),
        ("/clubs/**", Authenticated),
        ("/users/**", Authenticated),
        ("/tables/**", Authenticated),
        ("/bookings/**", Authenticated),
        ("/orders/**", Authenticated),
        ("/billing/**", Authenticated),
        ("/products/**", Authenticated),
    ])
}

/// Policy-enforcement middleware: the only place a user-visible
/// authentication failure is produced, and it is always the same fixed
/// body no matter why identity was missing or insufficient.
pub async fn enforce(
    State(policy): State<Arc<AccessPolicy>>,
    req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Response {
    let allowed = {
        let identity = req
            .extensions()
            .get::<RequestIdentity>()
            .and_then(|identity| identity.0.as_ref());
        policy.allows(req.uri().path(), identity)
    };

    if !allowed {
        tracing::warn!(path = %req.uri().path(), "request denied by access policy");
        return errors::unauthorized();
    }

    next.run(req).await
}
