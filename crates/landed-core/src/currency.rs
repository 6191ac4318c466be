//! # Currency Normalizer
//!
//! Converts a purchase price quoted in the secondary currency into the
//! pipeline's base currency.
//!
//! ```text
//! price ──► is_secondary_currency? ──yes──► price × exchange_rate
//!                     │
//!                     no ─────────────────► price
//! ```
//!
//! The exchange rate is owned by the caller's settings and must be the
//! same for every record priced in one pass.

use crate::coerce;

/// Returns `price` in base currency units.
///
/// Non-finite inputs count as `0`.
///
/// ## Example
/// ```rust
/// use landed_core::currency::normalize;
///
/// assert!((normalize(100.0, true, 1.20) - 120.0).abs() < 1e-9);
/// assert_eq!(normalize(100.0, false, 1.20), 100.0);
/// ```
pub fn normalize(price: f64, is_secondary_currency: bool, exchange_rate: f64) -> f64 {
    let price = coerce(price);
    if is_secondary_currency {
        price * coerce(exchange_rate)
    } else {
        price
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_converts_secondary_currency() {
        assert!((normalize(100.0, true, 1.20) - 120.0).abs() < 1e-9);
    }

    #[test]
    fn test_base_currency_passes_through() {
        for price in [0.0, 1.0, 99.99, -15.0, 1e9] {
            for rate in [0.0, 1.2, f64::NAN, -3.0] {
                assert_eq!(normalize(price, false, rate), price);
            }
        }
    }

    #[test]
    fn test_invalid_values_count_as_zero() {
        assert_eq!(normalize(f64::NAN, true, 1.2), 0.0);
        assert_eq!(normalize(100.0, true, f64::INFINITY), 0.0);
        assert_eq!(normalize(f64::NAN, false, 1.2), 0.0);
    }
}
