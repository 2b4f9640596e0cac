//! Unified error handling for Meridian
//!
//! Absent lookups throughout the model return `Option` rather than an
//! error; only genuine faults (invalid validity windows, malformed digit
//! strings, bad dial-plan data, I/O) surface as `AppError`.

use thiserror::Error;

/// Main application error type
///
/// All fallible operations in the Meridian crates return this type.
#[derive(Error, Debug)]
pub enum AppError {
    // ==================== Model Errors ====================
    #[error("Invalid validity window: valid_from {valid_from} is not before valid_to {valid_to}")]
    InvalidValidity { valid_from: i64, valid_to: i64 },

    #[error("Product index {index} out of bounds (list holds {len})")]
    ProductIndex { index: usize, len: usize },

    // ==================== Routing Errors ====================
    #[error("Invalid digit '{ch}' at position {position}")]
    InvalidDigit { ch: char, position: usize },

    #[error("Malformed dial plan entry at line {line}: {reason}")]
    DialPlan { line: usize, reason: String },

    // ==================== Internal Errors ====================
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Returns the stable error code for logs and diagnostics
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::InvalidValidity { .. } => "invalid_validity",
            AppError::ProductIndex { .. } => "product_index",
            AppError::InvalidDigit { .. } => "invalid_digit",
            AppError::DialPlan { .. } => "dial_plan_error",
            AppError::Io(_) => "io_error",
            AppError::Config(_) => "config_error",
            AppError::Internal(_) => "internal_error",
        }
    }
}
