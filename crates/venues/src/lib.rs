//! `cuehall-venues` — companies, clubs and tables.

pub mod club;
pub mod company;
pub mod table;

pub use club::Club;
pub use company::Company;
pub use table::{Table, TableKind, TableStatus};
