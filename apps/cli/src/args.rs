//! Command line parsing.
//!
//! Flags override the matching environment variables.

use std::path::PathBuf;

/// Report output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Json,
    Text,
}

/// Parsed command line.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CliArgs {
    /// Records file; stdin when absent.
    pub input: Option<PathBuf>,
    pub format: OutputFormat,
    pub exchange_rate: Option<f64>,
    pub annual_interest_pct: Option<f64>,
    /// Fail on invalid or duplicate SKUs instead of warning.
    pub strict: bool,
    pub show_help: bool,
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ArgsError {
    #[error("Missing value for {0}")]
    MissingValue(String),

    #[error("Invalid value for {flag}: '{value}'")]
    InvalidValue { flag: String, value: String },

    #[error("Unknown argument: {0}")]
    Unknown(String),
}

pub const USAGE: &str = "\
landed-quote - price imported equipment SKUs

Usage: landed-quote [OPTIONS]

Options:
  -i, --input <PATH>         JSON array of product records (default: stdin)
  -f, --format <json|text>   Report format (default: json)
      --exchange-rate <R>    Secondary to base currency rate (env: LANDED_EXCHANGE_RATE)
      --interest <PCT>       Annual interest percent (env: LANDED_ANNUAL_INTEREST_PCT)
      --strict               Reject catalogs with invalid or duplicate SKUs
  -h, --help                 Show this help message";

/// Parses arguments, excluding the program name.
pub fn parse_args<I>(args: I) -> Result<CliArgs, ArgsError>
where
    I: IntoIterator<Item = String>,
{
    let mut parsed = CliArgs::default();
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-i" | "--input" => {
                parsed.input = Some(PathBuf::from(value_for(&arg, args.next())?));
            }
            "-f" | "--format" => {
                let value = value_for(&arg, args.next())?;
                parsed.format = match value.to_ascii_lowercase().as_str() {
                    "json" => OutputFormat::Json,
                    "text" => OutputFormat::Text,
                    _ => return Err(invalid(&arg, value)),
                };
            }
            "--exchange-rate" => {
                parsed.exchange_rate = Some(number_for(&arg, args.next())?);
            }
            "--interest" => {
                parsed.annual_interest_pct = Some(number_for(&arg, args.next())?);
            }
            "--strict" => parsed.strict = true,
            "-h" | "--help" => parsed.show_help = true,
            _ => return Err(ArgsError::Unknown(arg)),
        }
    }

    Ok(parsed)
}

fn value_for(flag: &str, value: Option<String>) -> Result<String, ArgsError> {
    value.ok_or_else(|| ArgsError::MissingValue(flag.to_string()))
}

fn number_for(flag: &str, value: Option<String>) -> Result<f64, ArgsError> {
    let value = value_for(flag, value)?;
    value.trim().parse().map_err(|_| invalid(flag, value))
}

fn invalid(flag: &str, value: String) -> ArgsError {
    ArgsError::InvalidValue {
        flag: flag.to_string(),
        value,
    }
}
