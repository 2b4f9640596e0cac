//! Domain models for the Meridian customer data layer

pub mod audit;
pub mod balance;
pub mod counter;
pub mod customer;
pub mod product;

pub use audit::AuditSegment;
pub use balance::BalanceGroup;
pub use counter::{Counter, CounterGroup};
pub use customer::CustInfo;
pub use product::{CustProductInfo, ProductList};
