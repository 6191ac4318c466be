//! Pricing configuration.
//!
//! Loaded from environment variables with fallback to defaults, then
//! overridden by command line flags.

use std::env;

use landed_core::validation::validate_params;
use landed_core::{CoreError, PricingParams};
use serde::{Deserialize, Serialize};

use crate::args::CliArgs;

pub const EXCHANGE_RATE_VAR: &str = "LANDED_EXCHANGE_RATE";
pub const INTEREST_VAR: &str = "LANDED_ANNUAL_INTEREST_PCT";

/// Process-wide pricing settings for one run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricingConfig {
    /// Secondary to base currency rate (default: 1.0)
    pub exchange_rate: f64,

    /// Annual interest percent for financed sales (default: 0)
    pub annual_interest_pct: f64,
}

impl PricingConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn load_from<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(PricingConfig {
            exchange_rate: lookup(EXCHANGE_RATE_VAR)
                .unwrap_or_else(|| "1.0".to_string())
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue(EXCHANGE_RATE_VAR.to_string()))?,

            annual_interest_pct: lookup(INTEREST_VAR)
                .unwrap_or_else(|| "0".to_string())
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue(INTEREST_VAR.to_string()))?,
        })
    }

    /// Applies command line overrides.
    pub fn with_overrides(mut self, args: &CliArgs) -> Self {
        if let Some(rate) = args.exchange_rate {
            self.exchange_rate = rate;
        }
        if let Some(pct) = args.annual_interest_pct {
            self.annual_interest_pct = pct;
        }
        self
    }

    /// Validated parameters to hand to every quote in the run.
    pub fn params(&self) -> Result<PricingParams, ConfigError> {
        let params = PricingParams::new(self.exchange_rate, self.annual_interest_pct);
        validate_params(&params)?;
        Ok(params)
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error(transparent)]
    Rejected(#[from] CoreError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = PricingConfig::load_from(lookup(&[])).unwrap();
        assert_eq!(config.exchange_rate, 1.0);
        assert_eq!(config.annual_interest_pct, 0.0);
        assert_eq!(config.params().unwrap(), PricingParams::default());
    }

    #[test]
    fn test_reads_environment() {
        let config = PricingConfig::load_from(lookup(&[
            (EXCHANGE_RATE_VAR, " 1.20 "),
            (INTEREST_VAR, "12"),
        ]))
        .unwrap();
        assert_eq!(config.params().unwrap(), PricingParams::new(1.2, 12.0));
    }

    #[test]
    fn test_unparseable_value() {
        let err = PricingConfig::load_from(lookup(&[(INTEREST_VAR, "12%")])).unwrap_err();
        assert_eq!(err.to_string(), format!("Invalid value for {INTEREST_VAR}"));
    }

    #[test]
    fn test_flags_override_environment() {
        let args = CliArgs {
            annual_interest_pct: Some(18.0),
            ..CliArgs::default()
        };
        let config = PricingConfig::load_from(lookup(&[
            (EXCHANGE_RATE_VAR, "1.2"),
            (INTEREST_VAR, "12"),
        ]))
        .unwrap()
        .with_overrides(&args);

        assert_eq!(config.exchange_rate, 1.2);
        assert_eq!(config.annual_interest_pct, 18.0);
    }

    #[test]
    fn test_rejects_unusable_params() {
        let config = PricingConfig {
            exchange_rate: 0.0,
            annual_interest_pct: 12.0,
        };
        assert!(matches!(config.params(), Err(ConfigError::Rejected(_))));
    }
}
