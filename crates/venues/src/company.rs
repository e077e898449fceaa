use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use cuehall_core::{CompanyId, DomainError, DomainResult};

/// A company: the top-level tenant owning one or more clubs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    pub id: CompanyId,
    pub name: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Company {
    pub fn new(
        name: impl Into<String>,
        address: Option<String>,
        phone: Option<String>,
        email: Option<String>,
    ) -> DomainResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("company name must not be empty"));
        }

        let now = Utc::now();
        Ok(Self {
            id: CompanyId::new(),
            name,
            address,
            phone,
            email,
            created_at: now,
            updated_at: now,
        })
    }
}
