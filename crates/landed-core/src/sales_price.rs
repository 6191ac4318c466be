//! # Sales Price Calculator
//!
//! Derives cash and financed sale prices from a landed cost.
//!
//! ## Pricing Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  fixed_price > 0 ? ──yes──► cash_net = fixed_price                      │
//! │        │                                                                │
//! │        no ──────────────► cash_net = kst × (1 + margin_pct / 100)       │
//! │                                                                         │
//! │  cash_with_tax = cash_net × 1.10                                        │
//! │                                                                         │
//! │  ┌──────────────────────┐        ┌──────────────────────────────────┐  │
//! │  │ initial payment 50%  │        │ financed 50% over 12 months      │  │
//! │  └──────────────────────┘        │ (amortization engine)            │  │
//! │                                  └──────────────────────────────────┘  │
//! │  financed_total = initial_payment + installment × 12                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::coerce;
use crate::types::{active_override, SalesPrice};
use crate::{FINANCING_TERM_MONTHS, INITIAL_PAYMENT_SHARE, VAT_RATE};

/// Prices a unit from its landed cost.
///
/// `fixed_price` only takes effect when it is a finite value above zero;
/// anything else falls back to the margin formula.
///
/// ## Example
/// ```rust
/// use landed_core::sales_price::sales_price;
///
/// let sale = sales_price(200.0, 0.0, 0.0, Some(500.0));
/// assert!(sale.used_fixed_price);
/// assert_eq!(sale.net_profit, 300.0);
/// ```
pub fn sales_price(
    kst: f64,
    margin_pct: f64,
    annual_interest_pct: f64,
    fixed_price: Option<f64>,
) -> SalesPrice {
    let kst = coerce(kst);
    let fixed = active_override(fixed_price);

    let cash_net = match fixed {
        Some(price) => price,
        None => kst * (1.0 + coerce(margin_pct) / 100.0),
    };
    let cash_with_tax = cash_net * (1.0 + VAT_RATE);

    let initial_payment = cash_with_tax * INITIAL_PAYMENT_SHARE;
    let financed_amount = cash_with_tax * (1.0 - INITIAL_PAYMENT_SHARE);

    let installment =
        amortization::installment(financed_amount, annual_interest_pct, FINANCING_TERM_MONTHS);
    let financed_total = initial_payment + installment * f64::from(FINANCING_TERM_MONTHS);

    SalesPrice {
        cash_net,
        cash_with_tax,
        initial_payment,
        financed_amount,
        installment,
        financed_total,
        net_profit: cash_net - kst,
        used_fixed_price: fixed.is_some(),
    }
}

/// Fixed-payment loan math.
pub mod amortization {
    use crate::coerce;

    /// Monthly rate for an annual percent (12 -> 0.01).
    #[inline]
    pub fn monthly_rate(annual_interest_pct: f64) -> f64 {
        coerce(annual_interest_pct) / 100.0 / 12.0
    }

    /// Share of the principal paid each period under an annuity.
    ///
    /// `r(1+r)^n / ((1+r)^n - 1)`. Only meaningful for `r > 0`.
    pub fn annuity_factor(monthly_rate: f64, periods: u32) -> f64 {
        let growth = (1.0 + monthly_rate).powi(periods as i32);
        monthly_rate * growth / (growth - 1.0)
    }

    /// Level payment that repays `amount` over `periods` months.
    ///
    /// A non-positive rate switches to straight-line repayment, which also
    /// keeps the annuity formula away from its zero-rate singularity.
    /// Zero periods yields a zero installment.
    pub fn installment(amount: f64, annual_interest_pct: f64, periods: u32) -> f64 {
        if periods == 0 {
            return 0.0;
        }

        let amount = coerce(amount);
        let annual_interest_pct = coerce(annual_interest_pct);

        if annual_interest_pct > 0.0 {
            amount * annuity_factor(monthly_rate(annual_interest_pct), periods)
        } else {
            amount / f64::from(periods)
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::amortization::*;
    use super::*;

    fn approx(a: f64, b: f64, tolerance: f64) -> bool {
        (a - b).abs() < tolerance
    }

    #[test]
    fn test_margin_pricing_with_interest() {
        let sale = sales_price(213.6, 30.0, 12.0, None);

        assert!(!sale.used_fixed_price);
        assert!(approx(sale.cash_net, 277.68, 1e-9));
        assert!(approx(sale.cash_with_tax, 305.448, 1e-9));
        assert!(approx(sale.initial_payment, 152.724, 1e-9));
        assert!(approx(sale.financed_amount, 152.724, 1e-9));
        assert!(approx(sale.installment, 13.569342, 1e-5));
        assert!(approx(sale.financed_total, 315.556109, 1e-5));
        assert!(approx(sale.net_profit, 277.68 - 213.6, 1e-9));
    }

    #[test]
    fn test_fixed_price_overrides_margin() {
        let sale = sales_price(200.0, 0.0, 0.0, Some(500.0));

        assert!(sale.used_fixed_price);
        assert_eq!(sale.cash_net, 500.0);
        assert_eq!(sale.net_profit, 300.0);
        assert!(approx(sale.cash_with_tax, 550.0, 1e-9));
        assert!(approx(sale.installment, 275.0 / 12.0, 1e-12));
        assert!(approx(sale.financed_total, 550.0, 1e-9));
    }

    #[test]
    fn test_zero_or_negative_fixed_price_means_unset() {
        let baseline = sales_price(213.6, 30.0, 12.0, None);

        for sentinel in [Some(0.0), Some(-50.0), Some(f64::NAN)] {
            let sale = sales_price(213.6, 30.0, 12.0, sentinel);
            assert!(!sale.used_fixed_price);
            assert_eq!(sale, baseline);
        }
    }

    #[test]
    fn test_zero_interest_is_straight_line() {
        let sale = sales_price(213.6, 30.0, 0.0, None);
        assert_eq!(sale.installment, sale.financed_amount / 12.0);
        assert!(approx(sale.financed_total, sale.cash_with_tax, 1e-9));
    }

    #[test]
    fn test_negative_interest_is_straight_line() {
        let sale = sales_price(100.0, 10.0, -5.0, None);
        assert_eq!(sale.installment, sale.financed_amount / 12.0);
    }

    #[test]
    fn test_monthly_rate() {
        assert!(approx(monthly_rate(12.0), 0.01, 1e-15));
        assert_eq!(monthly_rate(f64::NAN), 0.0);
    }

    #[test]
    fn test_annuity_installment_repays_principal() {
        // Discounting every payment at the monthly rate gets the principal back
        let amount = 10_000.0;
        let pmt = installment(amount, 18.0, 12);
        let r = monthly_rate(18.0);
        let present_value: f64 = (1..=12).map(|k| pmt / (1.0 + r).powi(k)).sum();
        assert!(approx(present_value, amount, 1e-6));
    }

    #[test]
    fn test_zero_periods() {
        assert_eq!(installment(1000.0, 12.0, 0), 0.0);
        assert_eq!(installment(1000.0, 0.0, 0), 0.0);
    }

    #[test]
    fn test_idempotent() {
        let a = sales_price(213.6, 30.0, 12.0, None);
        let b = sales_price(213.6, 30.0, 12.0, None);
        assert_eq!(a.installment.to_bits(), b.installment.to_bits());
        assert_eq!(a.financed_total.to_bits(), b.financed_total.to_bits());
    }
}
