use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use cuehall_core::{ClubId, DomainError, DomainResult, ProductId};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProductCategory {
    Food,
    Beverage,
    Snack,
    Other,
}

/// A catalog item sold at a club.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub club_id: ClubId,
    pub name: String,
    pub description: Option<String>,
    pub category: ProductCategory,
    pub price_cents: i64,
    pub is_available: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    pub fn new(
        club_id: ClubId,
        name: impl Into<String>,
        description: Option<String>,
        category: ProductCategory,
        price_cents: i64,
    ) -> DomainResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("product name must not be empty"));
        }
        if price_cents < 0 {
            return Err(DomainError::validation("price must not be negative"));
        }

        let now = Utc::now();
        Ok(Self {
            id: ProductId::new(),
            club_id,
            name,
            description,
            category,
            price_cents,
            is_available: true,
            created_at: now,
            updated_at: now,
        })
    }
}
