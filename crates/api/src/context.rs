use cuehall_auth::{Role, UserRecord};
use cuehall_core::{ClubId, CompanyId, UserId};

/// The resolved identity of the current request's caller.
///
/// Built from the *live* user row at resolution time, not from token
/// claims, so role and tenant reflect the directory's current state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    pub user_id: UserId,
    pub username: String,
    pub role: Role,
    pub company_id: Option<CompanyId>,
    pub club_id: Option<ClubId>,
}

impl CurrentUser {
    /// The single granted authority: the role name, uppercase. Tenant ids
    /// are deliberately not turned into authorities.
    pub fn authority(&self) -> &'static str {
        self.role.authority()
    }
}

impl From<UserRecord> for CurrentUser {
    fn from(user: UserRecord) -> Self {
        Self {
            user_id: user.id,
            username: user.username,
            role: user.role,
            company_id: user.company_id,
            club_id: user.club_id,
        }
    }
}

/// Request-scoped identity slot.
///
/// Installed exactly once per request by the authentication middleware
/// (a single extension insert); `None` is an anonymous request. Never
/// shared across requests — there is no ambient/global identity.
#[derive(Debug, Clone, Default)]
pub struct RequestIdentity(pub Option<CurrentUser>);
