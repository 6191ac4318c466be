//! # landed-quote
//!
//! Prices a catalog of imported equipment SKUs.
//!
//! ## Usage
//! ```bash
//! # Price a catalog exported by the record store
//! LANDED_EXCHANGE_RATE=1.2 LANDED_ANNUAL_INTEREST_PCT=12 \
//!     landed-quote --input catalog.json
//!
//! # Human-readable table, rate given on the command line
//! landed-quote -i catalog.json --exchange-rate 1.18 --format text
//! ```
//!
//! ## Run
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. Parse flags, load PricingConfig (env → flags), validate params      │
//! │  2. Read a JSON array; undecodable entries are logged and skipped       │
//! │  3. Check SKUs (warn, or fail with --strict)                            │
//! │  4. price_catalog with one PricingParams for the whole pass             │
//! │  5. Round through QuoteView, write JSON or text to stdout               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod args;
mod config;
mod report;

use std::fs::File;
use std::io::{self, BufReader, Read, Write};

use anyhow::{Context, Result};
use chrono::Utc;
use landed_core::validation::validate_catalog;
use landed_core::{price_catalog, ProductRecord};
use serde_json::Value;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use crate::args::{parse_args, OutputFormat, USAGE};
use crate::config::PricingConfig;
use crate::report::Report;

fn main() -> Result<()> {
    init_tracing();

    let args = parse_args(std::env::args().skip(1))?;
    if args.show_help {
        println!("{USAGE}");
        return Ok(());
    }

    let config = PricingConfig::load()?.with_overrides(&args);
    let params = config.params()?;
    info!(
        exchange_rate = params.exchange_rate,
        annual_interest_pct = params.annual_interest_pct,
        "Configuration loaded"
    );

    let raw = match &args.input {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open {}", path.display()))?;
            read_to_string(BufReader::new(file))?
        }
        None => read_to_string(io::stdin().lock())?,
    };
    let records = decode_records(&raw)?;
    info!(count = records.len(), "Records read");

    if let Err(e) = validate_catalog(&records) {
        if args.strict {
            return Err(e).context("Catalog rejected");
        }
        warn!(error = %e, "Catalog has SKU problems, pricing anyway");
    }

    let quotes = price_catalog(&records, &params);
    for quote in quotes.iter().filter(|q| q.pricing.used_fixed_price) {
        debug!(sku = %quote.sku, "Manual sale price in effect");
    }
    for quote in quotes.iter().filter(|q| q.freight.used_fixed_price) {
        debug!(sku = %quote.sku, "Negotiated freight price in effect");
    }
    info!(count = quotes.len(), "Records priced");

    let report = Report::new(params, &quotes, Utc::now());
    let rendered = match args.format {
        OutputFormat::Json => report.to_json().context("Failed to encode report")?,
        OutputFormat::Text => report.to_text(),
    };

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{rendered}")?;
    Ok(())
}

fn read_to_string<R: Read>(mut reader: R) -> Result<String> {
    let mut buf = String::new();
    reader
        .read_to_string(&mut buf)
        .context("Failed to read records")?;
    Ok(buf)
}

/// Decodes a JSON array of records.
///
/// Entries that are not objects can't become records; they are skipped
/// with a warning so one broken row doesn't block the catalog.
fn decode_records(raw: &str) -> Result<Vec<ProductRecord>> {
    let entries: Vec<Value> =
        serde_json::from_str(raw).context("Records must be a JSON array")?;

    let mut records = Vec::with_capacity(entries.len());
    for (index, entry) in entries.into_iter().enumerate() {
        match serde_json::from_value::<ProductRecord>(entry) {
            Ok(record) => records.push(record),
            Err(e) => warn!(index, error = %e, "Skipping undecodable record"),
        }
    }

    Ok(records)
}

/// Initializes the tracing subscriber for structured logging.
///
/// Logs go to stderr so stdout carries only the report.
/// - `RUST_LOG=debug` - Show override usage per SKU
/// - Default: INFO level
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
