use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use cuehall_core::{BillId, BookingId, DomainError, DomainResult, TableId, UserId};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BillStatus {
    Pending,
    Paid,
    Cancelled,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    Cash,
    Momo,
    ZaloPay,
    BankTransfer,
}

/// A bill covering table time plus any orders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bill {
    pub id: BillId,
    pub table_id: TableId,
    pub booking_id: Option<BookingId>,
    pub user_id: UserId,
    pub table_fee_cents: i64,
    pub total_cents: i64,
    pub status: BillStatus,
    pub payment_method: Option<PaymentMethod>,
    pub payment_reference: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Bill {
    pub fn new(
        table_id: TableId,
        booking_id: Option<BookingId>,
        user_id: UserId,
        table_fee_cents: i64,
        total_cents: i64,
    ) -> DomainResult<Self> {
        if table_fee_cents < 0 || total_cents < 0 {
            return Err(DomainError::validation("amounts must not be negative"));
        }
        if total_cents < table_fee_cents {
            return Err(DomainError::validation(
                "total cannot be less than the table fee",
            ));
        }

        let now = Utc::now();
        Ok(Self {
            id: BillId::new(),
            table_id,
            booking_id,
            user_id,
            table_fee_cents,
            total_cents,
            status: BillStatus::Pending,
            payment_method: None,
            payment_reference: None,
            created_at: now,
            updated_at: now,
        })
    }

    /// Settle the bill. Only a pending bill can be paid, exactly once.
    pub fn pay(
        &mut self,
        method: PaymentMethod,
        reference: Option<String>,
    ) -> DomainResult<()> {
        if self.status != BillStatus::Pending {
            return Err(DomainError::conflict(format!(
                "bill is already {:?}",
                self.status
            )));
        }

        self.status = BillStatus::Paid;
        self.payment_method = Some(method);
        self.payment_reference = reference;
        self.updated_at = Utc::now();
        Ok(())
    }
}
