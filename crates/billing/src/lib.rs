//! `cuehall-billing` — products, food/beverage orders and bills.
//!
//! All monetary amounts are integer minor currency units (cents); floats
//! never touch money.

pub mod bill;
pub mod order;
pub mod product;

pub use bill::{Bill, BillStatus, PaymentMethod};
pub use order::{Order, OrderItem, OrderStatus};
pub use product::{Product, ProductCategory};
