//! # Validation Module
//!
//! Checks for pricing parameters and record identity.
//!
//! ## What Gets Validated
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  PricingParams (once per pass)        → rejected if unusable            │
//! │  ├── exchange_rate       finite, > 0                                    │
//! │  └── annual_interest_pct finite, 0..=100                                │
//! │                                                                         │
//! │  ProductRecord.sku (once per record)  → reported, never blocks pricing  │
//! │                                                                         │
//! │  Numeric record fields                → NOT validated: coerced to 0     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use landed_core::types::PricingParams;
//! use landed_core::validation::validate_params;
//!
//! assert!(validate_params(&PricingParams::new(1.2, 12.0)).is_ok());
//! assert!(validate_params(&PricingParams::new(0.0, 12.0)).is_err());
//! ```

use std::collections::HashSet;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::types::{PricingParams, ProductRecord};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Upper bound for the annual interest percent.
pub const MAX_ANNUAL_INTEREST_PCT: f64 = 100.0;

/// Maximum SKU length.
pub const MAX_SKU_LEN: usize = 64;

// =============================================================================
// Parameter Validators
// =============================================================================

/// Validates the secondary to base currency rate.
pub fn validate_exchange_rate(rate: f64) -> ValidationResult<()> {
    let field = "exchange_rate";

    if !rate.is_finite() {
        return Err(ValidationError::NotFinite {
            field: field.to_string(),
        });
    }

    if rate <= 0.0 {
        return Err(ValidationError::MustBePositive {
            field: field.to_string(),
        });
    }

    Ok(())
}

/// Validates the global annual interest percent.
///
/// Zero is allowed and means interest-free financing.
pub fn validate_interest_pct(pct: f64) -> ValidationResult<()> {
    let field = "annual_interest_pct";

    if !pct.is_finite() {
        return Err(ValidationError::NotFinite {
            field: field.to_string(),
        });
    }

    if !(0.0..=MAX_ANNUAL_INTEREST_PCT).contains(&pct) {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0.0,
            max: MAX_ANNUAL_INTEREST_PCT,
        });
    }

    Ok(())
}

/// Validates both process-wide parameters.
pub fn validate_params(params: &PricingParams) -> CoreResult<()> {
    validate_exchange_rate(params.exchange_rate).map_err(CoreError::InvalidParams)?;
    validate_interest_pct(params.annual_interest_pct).map_err(CoreError::InvalidParams)?;
    Ok(())
}

// =============================================================================
// Identity Validators
// =============================================================================

/// Validates a SKU.
///
/// ## Rules
/// - Must not be empty
/// - At most 64 characters
/// - Letters, digits, hyphens, underscores, dots and slashes only
///
/// ## Example
/// ```rust
/// use landed_core::validation::validate_sku;
///
/// assert!(validate_sku("EXC-BKT-01").is_ok());
/// assert!(validate_sku("").is_err());
/// assert!(validate_sku("has space").is_err());
/// ```
pub fn validate_sku(sku: &str) -> ValidationResult<()> {
    let sku = sku.trim();

    if sku.is_empty() {
        return Err(ValidationError::Required {
            field: "sku".to_string(),
        });
    }

    if sku.len() > MAX_SKU_LEN {
        return Err(ValidationError::TooLong {
            field: "sku".to_string(),
            max: MAX_SKU_LEN,
        });
    }

    if !sku
        .chars()
        .all(|c| c.is_alphanumeric() || matches!(c, '-' | '_' | '.' | '/'))
    {
        return Err(ValidationError::InvalidFormat {
            field: "sku".to_string(),
            reason: "must contain only letters, numbers, hyphens, underscores, dots and slashes"
                .to_string(),
        });
    }

    Ok(())
}

/// Checks every SKU in a catalog and rejects duplicates.
///
/// Returns the first problem found, in record order.
pub fn validate_catalog(records: &[ProductRecord]) -> CoreResult<()> {
    let mut seen = HashSet::with_capacity(records.len());

    for record in records {
        validate_sku(&record.sku)?;

        let sku = record.sku.trim();
        if !seen.insert(sku) {
            return Err(CoreError::DuplicateSku(sku.to_string()));
        }
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
