//! Command-line arguments and how they layer over environment config.
//!
//! ## Precedence
//! 1. Flags on the command line
//! 2. Environment variables (`CATALOG_*`, `.env` included)
//! 3. Defaults

use clap::Parser;
use std::path::PathBuf;

use catalog_core::MapperConfig;

/// Normalize billing-service product records for the storefront.
#[derive(Debug, Parser)]
#[command(name = "catalog-normalize", version)]
pub struct Args {
    /// JSON file holding one raw product or an array of them; stdin if omitted.
    pub input: Option<PathBuf>,

    /// Language-region tag, e.g. "en-GB".
    #[arg(long)]
    pub language: Option<String>,

    /// ISO 4217 currency code, e.g. "USD".
    #[arg(long)]
    pub currency: Option<String>,

    /// Show prices with tax included.
    #[arg(long)]
    pub prices_include_tax: Option<bool>,

    /// Decimal places derived tax amounts are rounded to.
    #[arg(long)]
    pub rounding_scale: Option<u32>,

    /// Leave out products with no price in the requested currency instead
    /// of failing the whole run.
    #[arg(long)]
    pub skip_unpriced: bool,

    /// Pretty-print the JSON output.
    #[arg(long)]
    pub pretty: bool,
}

impl Args {
    /// Applies flag values on top of an environment-derived config.
    pub fn apply_to(&self, mut config: MapperConfig) -> MapperConfig {
        if let Some(language) = &self.language {
            config.language = language.clone();
        }
        if let Some(currency) = &self.currency {
            config.currency = currency.clone();
        }
        if let Some(include_tax) = self.prices_include_tax {
            config.prices_include_tax = include_tax;
        }
        if let Some(scale) = self.rounding_scale {
            config.rounding_scale = scale;
        }
        config
    }
}
