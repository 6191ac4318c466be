//! # landed-core: Pure Pricing Logic for Imported Equipment
//!
//! Turns a raw purchase price plus surcharges into a landed cost, the landed
//! cost plus a margin into cash and financed sale prices, and shipment
//! geometry into a freight estimate.
//!
//! ## Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Per-Record Pipeline                             │
//! │                                                                         │
//! │   ProductRecord                                                         │
//! │        │                                                                │
//! │        ├──► currency ──► landed_cost ──► sales_price ──► PricingResult │
//! │        │    (normalize)  (FOB, KST)      (cash, financed)               │
//! │        │                                                                │
//! │        └──► freight ─────────────────────────────────► FreightResult   │
//! │             (volumetric vs real weight)                                 │
//! │                                                                         │
//! │   NO I/O • NO GLOBALS • SAME INPUT = SAME OUTPUT                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Records, parameters and results
//! - [`currency`] - Secondary to base currency conversion
//! - [`landed_cost`] - FOB, guarantee, customs and landed cost (KST)
//! - [`sales_price`] - Cash price, tax and the 12-month amortization engine
//! - [`freight`] - Volumetric weight and freight cost estimation
//! - [`quote`] - Runs the whole pipeline for one record or a catalog
//! - [`money`] - Rounding to cents at the presentation boundary
//! - [`validation`] - Parameter and identifier checks
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: every calculator is deterministic and side-effect free
//! 2. **Explicit Parameters**: exchange rate and interest rate are passed in,
//!    never read from process-wide state
//! 3. **Coerce, Don't Fail**: malformed numeric input becomes `0`
//! 4. **Round Late**: values stay `f64` until [`money::Money`] formats them
//!
//! ## Example Usage
//!
//! ```rust
//! use landed_core::landed_cost::landed_cost;
//! use landed_core::types::Surcharges;
//!
//! let costs = landed_cost(
//!     120.0,
//!     Surcharges {
//!         freight: 50.0,
//!         bank_fee: 10.0,
//!         customs_pct: 5.0,
//!         service_fee: 20.0,
//!         ..Surcharges::default()
//!     },
//! );
//!
//! assert!((costs.kst - 213.6).abs() < 1e-9);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod currency;
pub mod error;
pub mod freight;
pub mod landed_cost;
pub mod money;
pub mod quote;
pub mod sales_price;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use quote::{price_catalog, price_product};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Guarantee provision charged on FOB (3%).
pub const GUARANTEE_RATE: f64 = 0.03;

/// Sales tax (VAT) applied to the cash net price (10%).
pub const VAT_RATE: f64 = 0.10;

/// Share of the taxed price paid up front; the rest is financed.
pub const INITIAL_PAYMENT_SHARE: f64 = 0.5;

/// Number of monthly installments for financed sales.
pub const FINANCING_TERM_MONTHS: u32 = 12;

/// Carrier divisor used when a record has no volumetric coefficient.
pub const DEFAULT_VOLUMETRIC_COEFFICIENT: f64 = 5000.0;

/// Applies the zero-on-invalid policy to a single numeric input.
///
/// NaN and infinities become `0.0`. Every calculator runs its inputs
/// through this, so a bad field never poisons the rest of a quote.
#[inline]
pub fn coerce(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}
