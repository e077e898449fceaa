use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use cuehall_core::{ClubId, CompanyId, DomainError, DomainResult};

/// A club: a physical venue belonging to a company (sub-tenant scope).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Club {
    pub id: ClubId,
    pub company_id: CompanyId,
    pub name: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub opening_hours: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Club {
    pub fn new(
        company_id: CompanyId,
        name: impl Into<String>,
        address: Option<String>,
        phone: Option<String>,
        email: Option<String>,
        opening_hours: Option<String>,
    ) -> DomainResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("club name must not be empty"));
        }

        let now = Utc::now();
        Ok(Self {
            id: ClubId::new(),
            company_id,
            name,
            address,
            phone,
            email,
            opening_hours,
            created_at: now,
            updated_at: now,
        })
    }
}
