use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use cuehall_core::{DomainError, DomainResult, OrderId, OrderItemId, ProductId, TableId, UserId};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Pending,
    Preparing,
    Ready,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    fn is_terminal(self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }
}

/// One line of an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    pub id: OrderItemId,
    pub order_id: OrderId,
    pub product_id: ProductId,
    pub quantity: u32,
    pub unit_price_cents: i64,
}

impl OrderItem {
    pub fn new(
        order_id: OrderId,
        product_id: ProductId,
        quantity: u32,
        unit_price_cents: i64,
    ) -> DomainResult<Self> {
        if quantity == 0 {
            return Err(DomainError::validation("quantity must be at least 1"));
        }
        if unit_price_cents < 0 {
            return Err(DomainError::validation("unit price must not be negative"));
        }

        Ok(Self {
            id: OrderItemId::new(),
            order_id,
            product_id,
            quantity,
            unit_price_cents,
        })
    }

    pub fn line_total_cents(&self) -> i64 {
        self.unit_price_cents * i64::from(self.quantity)
    }
}

/// A food/beverage order placed at a table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub table_id: TableId,
    pub user_id: UserId,
    pub status: OrderStatus,
    pub total_cents: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Order {
    pub fn new(table_id: TableId, user_id: UserId) -> Self {
        let now = Utc::now();
        Self {
            id: OrderId::new(),
            table_id,
            user_id,
            status: OrderStatus::Pending,
            total_cents: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Account for a newly added line. Only open orders accept lines.
    pub fn add_line(&mut self, item: &OrderItem) -> DomainResult<()> {
        if self.status != OrderStatus::Pending {
            return Err(DomainError::conflict(format!(
                "order is {:?}, lines can only be added while pending",
                self.status
            )));
        }

        self.total_cents += item.line_total_cents();
        self.updated_at = Utc::now();
        Ok(())
    }

    pub fn transition(&mut self, status: OrderStatus) -> DomainResult<()> {
        if self.status.is_terminal() {
            return Err(DomainError::conflict(format!(
                "order is already {:?}",
                self.status
            )));
        }

        self.status = status;
        self.updated_at = Utc::now();
        Ok(())
    }
}
