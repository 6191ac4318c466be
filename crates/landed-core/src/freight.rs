//! # Freight Cost Estimator
//!
//! Estimates what a carrier will bill for a shipment. Runs off the same
//! record as the price pipeline but never reads landed cost.
//!
//! ## Billing Rule
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  volumetric_weight = height × width × depth / coefficient               │
//! │                                                                         │
//! │  real_cost = real_weight       × price_per_kg_real                      │
//! │  vol_cost  = volumetric_weight × price_per_kg_vol                       │
//! │                                                                         │
//! │  total = fixed_freight_price > 0 ? fixed : max(real_cost, vol_cost)     │
//! │  difference = vol_cost - real_cost                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A positive difference means volumetric billing is the worse deal, which
//! is what gets flagged when disputing a carrier invoice.

use crate::coerce;
use crate::types::{active_override, FreightGeometry, FreightResult};
use crate::DEFAULT_VOLUMETRIC_COEFFICIENT;

/// Billable volumetric weight of a box.
///
/// A zero (or non-finite) coefficient falls back to 5000.
pub fn volumetric_weight(height: f64, width: f64, depth: f64, coefficient: f64) -> f64 {
    let coefficient = match coerce(coefficient) {
        c if c == 0.0 => DEFAULT_VOLUMETRIC_COEFFICIENT,
        c => c,
    };
    coerce(height) * coerce(width) * coerce(depth) / coefficient
}

/// Estimates the freight bill for one shipment.
///
/// ## Example
/// ```rust
/// use landed_core::freight::freight_cost;
/// use landed_core::types::FreightGeometry;
///
/// let geometry = FreightGeometry {
///     height: 50.0,
///     width: 40.0,
///     depth: 30.0,
///     real_weight: 20.0,
///     coefficient: 5000.0,
///     price_per_kg_real: 3.0,
///     price_per_kg_vol: 4.0,
/// };
///
/// let freight = freight_cost(&geometry, None);
/// assert_eq!(freight.total_cost, 60.0);
/// assert_eq!(freight.difference, -12.0);
/// ```
pub fn freight_cost(geometry: &FreightGeometry, fixed_freight_price: Option<f64>) -> FreightResult {
    let volumetric_weight = volumetric_weight(
        geometry.height,
        geometry.width,
        geometry.depth,
        geometry.coefficient,
    );

    let real_cost = coerce(geometry.real_weight) * coerce(geometry.price_per_kg_real);
    let vol_cost = volumetric_weight * coerce(geometry.price_per_kg_vol);

    let fixed = active_override(fixed_freight_price);
    let total_cost = fixed.unwrap_or_else(|| real_cost.max(vol_cost));

    FreightResult {
        volumetric_weight,
        real_cost,
        vol_cost,
        total_cost,
        difference: vol_cost - real_cost,
        used_fixed_price: fixed.is_some(),
    }
}
