use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use cuehall_core::{BookingId, DomainError, DomainResult, TableId, UserId};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
    Completed,
}

impl BookingStatus {
    fn is_terminal(self) -> bool {
        matches!(self, BookingStatus::Cancelled | BookingStatus::Completed)
    }
}

/// A reservation of a table for a time window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    pub id: BookingId,
    pub table_id: TableId,
    pub user_id: UserId,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Booking {
    pub fn new(
        table_id: TableId,
        user_id: UserId,
        starts_at: DateTime<Utc>,
        ends_at: DateTime<Utc>,
    ) -> DomainResult<Self> {
        if ends_at <= starts_at {
            return Err(DomainError::validation("booking must end after it starts"));
        }

        let now = Utc::now();
        Ok(Self {
            id: BookingId::new(),
            table_id,
            user_id,
            starts_at,
            ends_at,
            status: BookingStatus::Pending,
            created_at: now,
            updated_at: now,
        })
    }

    /// Move the booking to a new status. Terminal states cannot be left.
    pub fn transition(&mut self, status: BookingStatus) -> DomainResult<()> {
        if self.status.is_terminal() {
            return Err(DomainError::conflict(format!(
                "booking is already {:?}",
                self.status
            )));
        }

        self.status = status;
        self.updated_at = Utc::now();
        Ok(())
    }
}
