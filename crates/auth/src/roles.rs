use core::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Role granted to a user within their tenant.
///
/// Roles are a closed set and are matched exhaustively by the policy layer;
/// there is no dynamic role-to-permission indirection.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Owner,
    ClubManager,
    Staff,
    Customer,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown role: {0}")]
pub struct UnknownRole(String);

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Owner => "OWNER",
            Role::ClubManager => "CLUB_MANAGER",
            Role::Staff => "STAFF",
            Role::Customer => "CUSTOMER",
        }
    }

    /// The single authority granted to a request authenticated with this
    /// role: the role name, uppercase, with no tenant information mixed in.
    /// Tenant scoping is business logic, not an authority.
    pub fn authority(&self) -> &'static str {
        self.as_str()
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "OWNER" => Ok(Role::Owner),
            "CLUB_MANAGER" => Ok(Role::ClubManager),
            "STAFF" => Ok(Role::Staff),
            "CUSTOMER" => Ok(Role::Customer),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}
