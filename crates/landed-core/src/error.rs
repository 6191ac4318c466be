//! # Error Types
//!
//! Domain-specific error types for landed-core.
//!
//! ## Where Errors Can Occur
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Calculators (currency, landed_cost, sales_price, freight)              │
//! │  └── NEVER fail. Bad numbers are coerced to 0.                          │
//! │                                                                         │
//! │  Parameters and identifiers (validation module)                         │
//! │  ├── ValidationError  - a single field is unusable                      │
//! │  └── CoreError        - wraps it for callers                            │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ConfigError (cli) → exit           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Errors raised outside the calculators themselves.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Pricing parameters can't be used for a pass.
    ///
    /// ## When This Occurs
    /// - Exchange rate is zero, negative or not a number
    /// - Interest rate is not a number
    #[error("Invalid pricing parameters: {0}")]
    InvalidParams(ValidationError),

    /// Two records in one catalog share a SKU.
    #[error("Duplicate SKU in catalog: {0}")]
    DuplicateSku(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// A single field failed a check.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must be a finite number.
    #[error("{field} must be a finite number")]
    NotFinite { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: f64, max: f64 },

    /// Invalid format.
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;
