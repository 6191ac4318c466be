//! Report rendering.
//!
//! Quotes are rounded through [`QuoteView`] here and nowhere earlier.

use std::fmt::Write as _;

use chrono::{DateTime, Utc};
use landed_core::money::QuoteView;
use landed_core::{Money, PricingParams, ProductQuote};
use serde::Serialize;

/// What a run writes to stdout.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub generated_at: DateTime<Utc>,
    pub params: PricingParams,
    pub count: usize,
    pub quotes: Vec<QuoteView>,
}

impl Report {
    pub fn new(params: PricingParams, quotes: &[ProductQuote], generated_at: DateTime<Utc>) -> Self {
        Report {
            generated_at,
            params,
            count: quotes.len(),
            quotes: quotes.iter().map(QuoteView::from).collect(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Fixed-width table with a totals row.
    pub fn to_text(&self) -> String {
        let mut out = String::new();

        let _ = writeln!(
            out,
            "Quotes generated {} (exchange rate {}, interest {}%)",
            self.generated_at.format("%Y-%m-%d %H:%M UTC"),
            self.params.exchange_rate,
            self.params.annual_interest_pct
        );
        let _ = writeln!(
            out,
            "{:<20} {:>12} {:>12} {:>12} {:>10} {:>12} {:>10}",
            "SKU", "LANDED", "CASH NET", "CASH+VAT", "MONTHLY", "FINANCED", "FREIGHT"
        );

        for q in &self.quotes {
            let marker = if q.used_fixed_price { "*" } else { "" };
            let _ = writeln!(
                out,
                "{:<20} {:>12} {:>12} {:>12} {:>10} {:>12} {:>10}",
                q.sku,
                q.landed_cost.to_string(),
                format!("{}{}", q.cash_net, marker),
                q.cash_with_tax.to_string(),
                q.installment.to_string(),
                q.financed_total.to_string(),
                q.freight_total.to_string(),
            );
        }

        let landed: Money = self.quotes.iter().map(|q| q.landed_cost).sum();
        let cash: Money = self.quotes.iter().map(|q| q.cash_with_tax).sum();
        let profit: Money = self.quotes.iter().map(|q| q.net_profit).sum();
        let _ = writeln!(
            out,
            "{} SKUs, landed {}, cash with VAT {}, net profit {}",
            self.count, landed, cash, profit
        );

        out
    }
}
