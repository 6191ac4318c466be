//! # Domain Types
//!
//! Records, parameters and results that flow through the pricing pipeline.
//!
//! ## Type Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  INPUTS (owned by the record store)     OUTPUTS (recomputed per read)   │
//! │  ┌─────────────────┐                    ┌─────────────────┐             │
//! │  │ ProductRecord   │                    │  ProductQuote   │             │
//! │  │  sku, name      │  ── quote ──►      │  sku, name      │             │
//! │  │  PricingInput   │                    │  PricingResult  │             │
//! │  │  FreightGeometry│                    │  FreightResult  │             │
//! │  └─────────────────┘                    └─────────────────┘             │
//! │                                                                         │
//! │  PricingParams: exchange rate + annual interest (explicit, per call)    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Lenient Decoding
//! Input records come from spreadsheets and forms. Every numeric field
//! decodes from a number, a numeric string, `null` or a missing key, and
//! anything unusable becomes `0`. See [`lenient`].

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::DEFAULT_VOLUMETRIC_COEFFICIENT;

// =============================================================================
// Pricing Parameters
// =============================================================================

/// The two process-wide scalars every quote depends on.
///
/// Callers load these once per pass (from settings, env, etc.) and hand the
/// same value to every record so all quotes in a pass agree.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PricingParams {
    /// Secondary currency to base currency multiplier.
    pub exchange_rate: f64,

    /// Annual interest percent for financed sales (12 = 12%).
    pub annual_interest_pct: f64,
}

impl PricingParams {
    pub const fn new(exchange_rate: f64, annual_interest_pct: f64) -> Self {
        PricingParams {
            exchange_rate,
            annual_interest_pct,
        }
    }
}

impl Default for PricingParams {
    fn default() -> Self {
        PricingParams::new(1.0, 0.0)
    }
}

// =============================================================================
// Pricing Input
// =============================================================================

/// Cost and margin fields of one SKU.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingInput {
    /// Purchase price, in base currency unless `is_secondary_currency`.
    #[serde(deserialize_with = "lenient::number")]
    pub purchase_price: f64,

    /// Marks `purchase_price` as expressed in the secondary currency.
    #[serde(deserialize_with = "lenient::flag")]
    pub is_secondary_currency: bool,

    #[serde(deserialize_with = "lenient::number")]
    pub freight: f64,

    #[serde(deserialize_with = "lenient::number")]
    pub bank_fee: f64,

    /// Import duty as a percent of FOB.
    #[serde(deserialize_with = "lenient::number")]
    pub customs_pct: f64,

    #[serde(deserialize_with = "lenient::number")]
    pub service_fee: f64,

    #[serde(deserialize_with = "lenient::number")]
    pub training_fee: f64,

    /// Contingency / extra fee.
    #[serde(deserialize_with = "lenient::number")]
    pub extra_fee: f64,

    #[serde(deserialize_with = "lenient::number")]
    pub margin_pct: f64,

    /// Manual cash net price. `None` or `<= 0` means "use the margin".
    #[serde(deserialize_with = "lenient::optional_number")]
    pub fixed_price: Option<f64>,

    /// Negotiated freight price. `None` or `<= 0` means "estimate it".
    #[serde(deserialize_with = "lenient::optional_number")]
    pub fixed_freight_price: Option<f64>,
}

impl PricingInput {
    /// The surcharges that sit on top of the normalized price.
    pub fn surcharges(&self) -> Surcharges {
        Surcharges {
            freight: self.freight,
            bank_fee: self.bank_fee,
            customs_pct: self.customs_pct,
            service_fee: self.service_fee,
            training_fee: self.training_fee,
            extra_fee: self.extra_fee,
        }
    }
}

/// Cost components accumulated by the landed cost calculator.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Surcharges {
    pub freight: f64,
    pub bank_fee: f64,
    pub customs_pct: f64,
    pub service_fee: f64,
    pub training_fee: f64,
    pub extra_fee: f64,
}

// =============================================================================
// Freight Geometry
// =============================================================================

/// Shipment dimensions, weight and carrier tariffs of one SKU.
///
/// Dimensions share one linear unit; the coefficient is the carrier's
/// volumetric divisor for that unit (5000 for centimetres).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FreightGeometry {
    #[serde(deserialize_with = "lenient::number")]
    pub height: f64,

    #[serde(deserialize_with = "lenient::number")]
    pub width: f64,

    #[serde(deserialize_with = "lenient::number")]
    pub depth: f64,

    #[serde(deserialize_with = "lenient::number")]
    pub real_weight: f64,

    #[serde(deserialize_with = "lenient::number")]
    pub coefficient: f64,

    #[serde(deserialize_with = "lenient::number")]
    pub price_per_kg_real: f64,

    #[serde(deserialize_with = "lenient::number")]
    pub price_per_kg_vol: f64,
}

impl Default for FreightGeometry {
    fn default() -> Self {
        FreightGeometry {
            height: 0.0,
            width: 0.0,
            depth: 0.0,
            real_weight: 0.0,
            coefficient: DEFAULT_VOLUMETRIC_COEFFICIENT,
            price_per_kg_real: 0.0,
            price_per_kg_vol: 0.0,
        }
    }
}

// =============================================================================
// Product Record
// =============================================================================

/// One SKU as supplied by the record store.
///
/// In JSON the pricing and freight fields sit at the top level next to
/// `sku` and `name`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ProductRecord {
    /// Stock Keeping Unit - business identifier.
    #[serde(default)]
    pub sku: String,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(flatten)]
    pub pricing: PricingInput,

    #[serde(flatten)]
    pub geometry: FreightGeometry,
}

// =============================================================================
// Results
// =============================================================================

/// FOB, guarantee, customs and landed cost of one unit.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LandedCost {
    pub fob: f64,
    pub guarantee: f64,
    pub customs: f64,
    /// Landed cost (KST).
    pub kst: f64,
}

/// Cash and financed sale prices derived from a landed cost.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SalesPrice {
    pub cash_net: f64,
    pub cash_with_tax: f64,
    pub initial_payment: f64,
    pub financed_amount: f64,
    pub installment: f64,
    pub financed_total: f64,
    pub net_profit: f64,
    pub used_fixed_price: bool,
}

/// Everything the display and export layers show for a SKU's price.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PricingResult {
    /// Purchase price in base currency.
    pub price_base: f64,
    pub fob: f64,
    pub guarantee: f64,
    pub customs: f64,
    pub landed_cost: f64,
    pub cash_net: f64,
    pub cash_with_tax: f64,
    pub initial_payment: f64,
    pub financed_amount: f64,
    pub financed_total: f64,
    pub installment: f64,
    pub net_profit: f64,
    pub used_fixed_price: bool,
}

impl PricingResult {
    /// Assembles the result from the outputs of each pipeline stage.
    pub fn from_stages(price_base: f64, costs: LandedCost, sale: SalesPrice) -> Self {
        PricingResult {
            price_base,
            fob: costs.fob,
            guarantee: costs.guarantee,
            customs: costs.customs,
            landed_cost: costs.kst,
            cash_net: sale.cash_net,
            cash_with_tax: sale.cash_with_tax,
            initial_payment: sale.initial_payment,
            financed_amount: sale.financed_amount,
            financed_total: sale.financed_total,
            installment: sale.installment,
            net_profit: sale.net_profit,
            used_fixed_price: sale.used_fixed_price,
        }
    }
}

/// Freight estimate for a SKU.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FreightResult {
    pub volumetric_weight: f64,
    pub real_cost: f64,
    pub vol_cost: f64,
    pub total_cost: f64,
    /// `vol_cost - real_cost`; positive means volumetric billing costs more.
    pub difference: f64,
    pub used_fixed_price: bool,
}

/// A fully priced SKU.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProductQuote {
    pub sku: String,
    pub name: Option<String>,
    pub pricing: PricingResult,
    pub freight: FreightResult,
}

// =============================================================================
// Manual Overrides
// =============================================================================

/// Resolves a manual price override.
///
/// Only a finite value strictly above zero counts as set; `None`, zero,
/// negatives and non-finite values all mean "compute it".
#[inline]
pub fn active_override(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite() && *v > 0.0)
}

// =============================================================================
// Lenient Decoding
// =============================================================================

/// Serde helpers implementing the zero-on-invalid input policy.
pub mod lenient {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    use crate::coerce;

    /// Decodes a number, numeric string, or anything else as `0`.
    pub fn number<'de, D>(deserializer: D) -> Result<f64, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<Value>::deserialize(deserializer)?;
        Ok(value.as_ref().map(to_number).unwrap_or(0.0))
    }

    /// Like [`number`], but keeps `null` as `None`.
    pub fn optional_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<Value>::deserialize(deserializer)?;
        Ok(match value {
            None | Some(Value::Null) => None,
            Some(v) => Some(to_number(&v)),
        })
    }

    /// Decodes `true`, `1`, `"true"`, `"yes"` or `"1"` as set.
    pub fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<Value>::deserialize(deserializer)?;
        Ok(match value {
            Some(Value::Bool(b)) => b,
            Some(Value::Number(n)) => n.as_f64().map(|v| v != 0.0).unwrap_or(false),
            Some(Value::String(s)) => matches!(
                s.trim().to_ascii_lowercase().as_str(),
                "true" | "yes" | "1"
            ),
            _ => false,
        })
    }

    fn to_number(value: &Value) -> f64 {
        match value {
            Value::Number(n) => n.as_f64().map(coerce).unwrap_or(0.0),
            Value::String(s) => parse_decimal(s),
            _ => 0.0,
        }
    }

    /// Parses `"12.5"`, `"12,5"`, `"1,250"` and `"1,250.75"`.
    ///
    /// Commas are thousands separators when a dot is present or when every
    /// comma is followed by exactly three digits (`"1,250"`, `"2,500,000"`).
    /// Otherwise a single comma is the decimal separator.
    pub fn parse_decimal(text: &str) -> f64 {
        let trimmed = text.trim();
        let normalized = if trimmed.contains('.') || is_grouped(trimmed) {
            trimmed.replace(',', "")
        } else {
            trimmed.replace(',', ".")
        };
        normalized.parse::<f64>().map(coerce).unwrap_or(0.0)
    }

    /// `[-+]d{1,3}(,ddd)+`
    fn is_grouped(text: &str) -> bool {
        let digits = text.strip_prefix(['-', '+']).unwrap_or(text);
        let mut groups = digits.split(',');
        let lead = groups.next().unwrap_or_default();
        let is_digits = |g: &str| g.bytes().all(|b| b.is_ascii_digit());

        let mut rest = groups.peekable();
        rest.peek().is_some()
            && (1..=3).contains(&lead.len())
            && is_digits(lead)
            && rest.all(|g| g.len() == 3 && is_digits(g))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
