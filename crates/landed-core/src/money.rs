//! # Money Module
//!
//! Rounding to cents at the presentation boundary.
//!
//! ## Where Rounding Happens
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  calculators (f64, full precision)                                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ProductQuote ──► QuoteView::from ──► Money (2 decimals)     ◄── HERE   │
//! │                                           │                             │
//! │                                           ▼                             │
//! │                                  export / display layer                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Calculators never round. Rounding an intermediate (say the installment)
//! and then multiplying it by 12 would drift from the unrounded total, so
//! every field is rounded independently from its full-precision value.
//!
//! Locale formatting (separators, grouping, symbols) belongs to the
//! display layer; [`Money`]'s `Display` is plain `1234.56`.

use serde::{Serialize, Serializer};
use std::fmt;
use std::ops::Add;
use ts_rs::TS;

use crate::coerce;
use crate::types::ProductQuote;

// =============================================================================
// Money Type
// =============================================================================

/// A presentation amount rounded to hundredths of the base currency.
///
/// Stays in `f64` so amounts of any magnitude round instead of clamping.
/// Serializes as a decimal number with at most two fractional digits.
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd)]
pub struct Money(f64);

impl Money {
    /// Rounds a calculated amount to the nearest cent, halves away from zero.
    ///
    /// ## Example
    /// ```rust
    /// use landed_core::money::Money;
    ///
    /// assert_eq!(Money::from_amount(305.448).amount(), 305.45);
    /// assert_eq!(Money::from_amount(-0.125).amount(), -0.13);
    /// assert_eq!(Money::from_amount(f64::NAN).amount(), 0.0);
    /// ```
    pub fn from_amount(amount: f64) -> Self {
        // `+ 0.0` folds -0.0 into 0.0 so tiny negatives print as "0.00"
        Money((coerce(amount) * 100.0).round() / 100.0 + 0.0)
    }

    /// The rounded amount, for JSON and spreadsheets.
    #[inline]
    pub fn amount(&self) -> f64 {
        self.0
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.0)
    }
}

/// Sums re-round so totals keep two decimals.
impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money::from_amount(self.0 + other.0)
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::default(), Add::add)
    }
}

// =============================================================================
// Quote View
// =============================================================================

/// A [`ProductQuote`] rounded for display and export.
///
/// Weights are rounded to two decimals like amounts.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
pub struct QuoteView {
    pub sku: String,
    pub name: Option<String>,
    #[ts(type = "number")]
    pub price_base: Money,
    #[ts(type = "number")]
    pub fob: Money,
    #[ts(type = "number")]
    pub guarantee: Money,
    #[ts(type = "number")]
    pub customs: Money,
    #[ts(type = "number")]
    pub landed_cost: Money,
    #[ts(type = "number")]
    pub cash_net: Money,
    #[ts(type = "number")]
    pub cash_with_tax: Money,
    #[ts(type = "number")]
    pub initial_payment: Money,
    #[ts(type = "number")]
    pub installment: Money,
    #[ts(type = "number")]
    pub financed_total: Money,
    #[ts(type = "number")]
    pub net_profit: Money,
    pub used_fixed_price: bool,
    #[ts(type = "number")]
    pub volumetric_weight: Money,
    #[ts(type = "number")]
    pub freight_real_cost: Money,
    #[ts(type = "number")]
    pub freight_vol_cost: Money,
    #[ts(type = "number")]
    pub freight_total: Money,
    #[ts(type = "number")]
    pub freight_difference: Money,
    pub used_fixed_freight_price: bool,
}

impl From<&ProductQuote> for QuoteView {
    fn from(quote: &ProductQuote) -> Self {
        let p = &quote.pricing;
        let f = &quote.freight;

        QuoteView {
            sku: quote.sku.clone(),
            name: quote.name.clone(),
            price_base: Money::from_amount(p.price_base),
            fob: Money::from_amount(p.fob),
            guarantee: Money::from_amount(p.guarantee),
            customs: Money::from_amount(p.customs),
            landed_cost: Money::from_amount(p.landed_cost),
            cash_net: Money::from_amount(p.cash_net),
            cash_with_tax: Money::from_amount(p.cash_with_tax),
            initial_payment: Money::from_amount(p.initial_payment),
            installment: Money::from_amount(p.installment),
            financed_total: Money::from_amount(p.financed_total),
            net_profit: Money::from_amount(p.net_profit),
            used_fixed_price: p.used_fixed_price,
            volumetric_weight: Money::from_amount(f.volumetric_weight),
            freight_real_cost: Money::from_amount(f.real_cost),
            freight_vol_cost: Money::from_amount(f.vol_cost),
            freight_total: Money::from_amount(f.total_cost),
            freight_difference: Money::from_amount(f.difference),
            used_fixed_freight_price: f.used_fixed_price,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
