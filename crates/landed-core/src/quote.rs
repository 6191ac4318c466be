//! # Quote Pipeline
//!
//! Runs every calculator for a product record.
//!
//! ```text
//! ProductRecord + PricingParams
//!      │
//!      ├──► normalize ──► landed_cost ──► sales_price ──┐
//!      │                                                ├──► ProductQuote
//!      └──► freight_cost ───────────────────────────────┘
//! ```
//!
//! Records never see each other, so a catalog can be priced in any order
//! or split across threads.

use crate::currency::normalize;
use crate::freight::freight_cost;
use crate::landed_cost::landed_cost;
use crate::sales_price::sales_price;
use crate::types::{PricingInput, PricingParams, PricingResult, ProductQuote, ProductRecord};

/// Runs the price pipeline (currency → landed cost → sale price).
pub fn price(input: &PricingInput, params: &PricingParams) -> PricingResult {
    let price_base = normalize(
        input.purchase_price,
        input.is_secondary_currency,
        params.exchange_rate,
    );
    let costs = landed_cost(price_base, input.surcharges());
    let sale = sales_price(
        costs.kst,
        input.margin_pct,
        params.annual_interest_pct,
        input.fixed_price,
    );

    PricingResult::from_stages(price_base, costs, sale)
}

/// Prices one record and estimates its freight.
pub fn price_product(record: &ProductRecord, params: &PricingParams) -> ProductQuote {
    ProductQuote {
        sku: record.sku.clone(),
        name: record.name.clone(),
        pricing: price(&record.pricing, params),
        freight: freight_cost(&record.geometry, record.pricing.fixed_freight_price),
    }
}

/// Prices a catalog with one set of parameters, keeping input order.
pub fn price_catalog(records: &[ProductRecord], params: &PricingParams) -> Vec<ProductQuote> {
    records
        .iter()
        .map(|record| price_product(record, params))
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FreightGeometry;

    fn approx(a: f64, b: f64, tolerance: f64) -> bool {
        (a - b).abs() < tolerance
    }

    /// 100 in the secondary currency, landed at 213.6 with rate 1.20.
    fn excavator_bucket() -> ProductRecord {
        ProductRecord {
            sku: "EXC-BKT-01".to_string(),
            name: Some("Excavator bucket".to_string()),
            pricing: PricingInput {
                purchase_price: 100.0,
                is_secondary_currency: true,
                freight: 50.0,
                bank_fee: 10.0,
                customs_pct: 5.0,
                service_fee: 20.0,
                margin_pct: 30.0,
                ..PricingInput::default()
            },
            geometry: FreightGeometry {
                height: 50.0,
                width: 40.0,
                depth: 30.0,
                real_weight: 20.0,
                coefficient: 5000.0,
                price_per_kg_real: 3.0,
                price_per_kg_vol: 4.0,
            },
        }
    }

    fn params() -> PricingParams {
        PricingParams::new(1.20, 12.0)
    }

    #[test]
    fn test_full_pipeline() {
        let quote = price_product(&excavator_bucket(), &params());
        let p = quote.pricing;

        assert_eq!(quote.sku, "EXC-BKT-01");
        assert!(approx(p.price_base, 120.0, 1e-9));
        assert!(approx(p.fob, 170.0, 1e-9));
        assert!(approx(p.guarantee, 5.1, 1e-9));
        assert!(approx(p.customs, 8.5, 1e-9));
        assert!(approx(p.landed_cost, 213.6, 1e-9));
        assert!(approx(p.cash_net, 277.68, 1e-9));
        assert!(approx(p.cash_with_tax, 305.448, 1e-9));
        assert!(approx(p.installment, 13.569342, 1e-5));
        assert!(approx(p.net_profit, 64.08, 1e-9));
        assert!(!p.used_fixed_price);

        assert_eq!(quote.freight.total_cost, 60.0);
    }

    #[test]
    fn test_fixed_freight_price_from_record() {
        let mut record = excavator_bucket();
        record.pricing.fixed_freight_price = Some(75.0);

        let quote = price_product(&record, &params());
        assert_eq!(quote.freight.total_cost, 75.0);
        assert!(quote.freight.used_fixed_price);
        // freight override never touches landed cost
        assert!(approx(quote.pricing.landed_cost, 213.6, 1e-9));
    }

    #[test]
    fn test_exchange_rate_applies_to_whole_catalog() {
        let mut local = excavator_bucket();
        local.sku = "LOCAL-01".to_string();
        local.pricing.is_secondary_currency = false;
        local.pricing.purchase_price = 120.0;

        let quotes = price_catalog(&[excavator_bucket(), local], &params());

        assert_eq!(quotes.len(), 2);
        assert_eq!(quotes[0].sku, "EXC-BKT-01");
        assert_eq!(quotes[1].sku, "LOCAL-01");
        assert!(approx(
            quotes[0].pricing.landed_cost,
            quotes[1].pricing.landed_cost,
            1e-9
        ));
    }

    #[test]
    fn test_idempotent_and_order_independent() {
        let records = vec![excavator_bucket(), ProductRecord::default()];
        let forward = price_catalog(&records, &params());

        let reversed: Vec<ProductRecord> = records.iter().rev().cloned().collect();
        let mut backward = price_catalog(&reversed, &params());
        backward.reverse();

        assert_eq!(forward, backward);
        assert_eq!(forward, price_catalog(&records, &params()));
    }

    #[test]
    fn test_empty_record_prices_to_zero() {
        let quote = price_product(&ProductRecord::default(), &params());
        assert_eq!(quote.pricing.landed_cost, 0.0);
        assert_eq!(quote.pricing.cash_with_tax, 0.0);
        assert_eq!(quote.pricing.installment, 0.0);
        assert_eq!(quote.freight.total_cost, 0.0);
    }

    #[test]
    fn test_decoded_record_matches_typed_record() {
        let record: ProductRecord = serde_json::from_str(
            r#"{
                "sku": "EXC-BKT-01",
                "name": "Excavator bucket",
                "purchase_price": "100",
                "is_secondary_currency": "true",
                "freight": 50,
                "bank_fee": 10,
                "customs_pct": 5,
                "service_fee": "20",
                "margin_pct": 30,
                "fixed_price": 0,
                "height": 50, "width": 40, "depth": 30,
                "real_weight": 20,
                "coefficient": 5000,
                "price_per_kg_real": 3,
                "price_per_kg_vol": 4
            }"#,
        )
        .unwrap();

        let decoded = price_product(&record, &params());
        let typed = price_product(&excavator_bucket(), &params());
        assert_eq!(decoded.pricing, typed.pricing);
        assert_eq!(decoded.freight, typed.freight);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_pricing_is_bit_identical() {
        let records: Vec<ProductRecord> = (0..64)
            .map(|i| {
                let mut record = excavator_bucket();
                record.sku = format!("SKU-{i}");
                record.pricing.margin_pct = i as f64;
                record
            })
            .collect();
        let expected = price_catalog(&records, &params());

        let mut handles = Vec::new();
        for record in records.clone() {
            handles.push(tokio::spawn(async move {
                price_product(&record, &params())
            }));
        }

        for (handle, want) in handles.into_iter().zip(expected.iter()) {
            let got = handle.await.unwrap();
            assert_eq!(got.sku, want.sku);
            assert_eq!(
                got.pricing.financed_total.to_bits(),
                want.pricing.financed_total.to_bits()
            );
            assert_eq!(got, *want);
        }
    }
}
