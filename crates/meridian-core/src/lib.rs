//! Meridian Core Library
//!
//! This crate provides the in-memory customer data model for the Meridian
//! mediation engine. It includes:
//!
//! - Balance tracking (Counter, CounterGroup, BalanceGroup)
//! - Product subscriptions (CustProductInfo, ProductList)
//! - Time-versioned customer state (AuditSegment, CustInfo)
//! - Unified error handling
//! - Application configuration

pub mod config;
pub mod error;
pub mod models;
pub mod time;

pub use config::AppConfig;
pub use error::AppError;

/// Result type alias using AppError
pub type AppResult<T> = Result<T, AppError>;
