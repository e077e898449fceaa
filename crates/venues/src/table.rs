use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use cuehall_core::{ClubId, DomainError, DomainResult, TableId};

/// Kind of billiard table.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TableKind {
    #[serde(rename = "POOL_8_BALL")]
    Pool8Ball,
    #[serde(rename = "POOL_9_BALL")]
    Pool9Ball,
    Snooker,
    Carom,
}

/// Operational status of a table.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TableStatus {
    Available,
    Occupied,
    Maintenance,
    Reserved,
}

/// A billiard table within a club.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    pub id: TableId,
    pub club_id: ClubId,
    pub name: String,
    pub kind: TableKind,
    pub status: TableStatus,
    /// Rate charged per hour, in minor currency units.
    pub hourly_rate_cents: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Table {
    pub fn new(
        club_id: ClubId,
        name: impl Into<String>,
        kind: TableKind,
        hourly_rate_cents: i64,
    ) -> DomainResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("table name must not be empty"));
        }
        if hourly_rate_cents < 0 {
            return Err(DomainError::validation("hourly rate must not be negative"));
        }

        let now = Utc::now();
        Ok(Self {
            id: TableId::new(),
            club_id,
            name,
            kind,
            status: TableStatus::Available,
            hourly_rate_cents,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn set_status(&mut self, status: TableStatus) {
        self.status = status;
        self.updated_at = Utc::now();
    }
}
