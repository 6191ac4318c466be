//! # Landed Cost Calculator
//!
//! Accumulates destination-side costs on top of the normalized purchase
//! price.
//!
//! ## Formula
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  fob       = price_base + freight                                       │
//! │  guarantee = fob × 3%                                                   │
//! │  customs   = fob × customs_pct / 100                                    │
//! │                                                                         │
//! │  kst = fob + bank_fee + customs + service_fee                           │
//! │            + guarantee + training_fee + extra_fee                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Negative components are accepted as rebates and flow through unchanged.

use crate::coerce;
use crate::types::{LandedCost, Surcharges};
use crate::GUARANTEE_RATE;

/// Computes FOB, guarantee, customs and landed cost (KST).
///
/// ## Example
/// ```rust
/// use landed_core::landed_cost::landed_cost;
/// use landed_core::types::Surcharges;
///
/// let costs = landed_cost(120.0, Surcharges { freight: 50.0, ..Default::default() });
/// assert_eq!(costs.fob, 170.0);
/// ```
pub fn landed_cost(price_base: f64, surcharges: Surcharges) -> LandedCost {
    let fob = coerce(price_base) + coerce(surcharges.freight);
    let guarantee = fob * GUARANTEE_RATE;
    let customs = fob * (coerce(surcharges.customs_pct) / 100.0);

    let kst = fob
        + coerce(surcharges.bank_fee)
        + customs
        + coerce(surcharges.service_fee)
        + guarantee
        + coerce(surcharges.training_fee)
        + coerce(surcharges.extra_fee);

    LandedCost {
        fob,
        guarantee,
        customs,
        kst,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn sample() -> Surcharges {
        Surcharges {
            freight: 50.0,
            bank_fee: 10.0,
            customs_pct: 5.0,
            service_fee: 20.0,
            training_fee: 0.0,
            extra_fee: 0.0,
        }
    }

    #[test]
    fn test_reference_scenario() {
        let costs = landed_cost(120.0, sample());
        assert!(approx(costs.fob, 170.0));
        assert!(approx(costs.guarantee, 5.1));
        assert!(approx(costs.customs, 8.5));
        assert!(approx(costs.kst, 213.6));
    }

    #[test]
    fn test_training_and_extra_fees_add_straight_through() {
        let with_fees = landed_cost(
            120.0,
            Surcharges {
                training_fee: 7.0,
                extra_fee: 3.0,
                ..sample()
            },
        );
        assert!(approx(with_fees.kst, 223.6));
        // fees outside FOB don't move guarantee or customs
        assert!(approx(with_fees.guarantee, 5.1));
        assert!(approx(with_fees.customs, 8.5));
    }

    #[test]
    fn test_all_zero() {
        let costs = landed_cost(0.0, Surcharges::default());
        assert_eq!(costs, LandedCost::default());
    }

    #[test]
    fn test_negative_rebate_propagates() {
        let costs = landed_cost(
            100.0,
            Surcharges {
                extra_fee: -20.0,
                ..Surcharges::default()
            },
        );
        assert!(approx(costs.kst, 100.0 + 3.0 - 20.0));
    }

    #[test]
    fn test_non_finite_components_count_as_zero() {
        let costs = landed_cost(
            f64::NAN,
            Surcharges {
                freight: 50.0,
                bank_fee: f64::INFINITY,
                ..Surcharges::default()
            },
        );
        assert!(approx(costs.fob, 50.0));
        assert!(approx(costs.kst, 51.5));
    }

    #[test]
    fn test_idempotent() {
        let a = landed_cost(120.0, sample());
        let b = landed_cost(120.0, sample());
        assert_eq!(a.kst.to_bits(), b.kst.to_bits());
        assert_eq!(a, b);
    }
}
