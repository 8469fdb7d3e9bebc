//! # catalog-normalize
//!
//! Reads raw billing products as JSON, maps them with catalog-core and
//! writes the normalized products to stdout as a JSON array.
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. Load .env (dotenvy), initialize logging (stderr, RUST_LOG)          │
//! │  2. MapperConfig::from_env(), then flag overrides                       │
//! │  3. Build ProductMapper (preferences resolved once)                     │
//! │  4. Read products from file or stdin                                    │
//! │  5. Map every product, report currency misses                           │
//! │  6. Print normalized JSON                                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod cli;
mod input;

use anyhow::{bail, Context, Result};
use clap::Parser;
use std::io::Write;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use catalog_core::{CoreResult, MapperConfig, NormalizedProduct, ProductMapper};
use cli::Args;

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let args = Args::parse();
    let config = args.apply_to(MapperConfig::from_env().context("invalid environment")?);
    info!(
        language = %config.language,
        currency = %config.currency,
        prices_include_tax = config.prices_include_tax,
        "Starting catalog normalization"
    );

    let mapper = ProductMapper::from_config(&config).context("invalid mapper configuration")?;
    let raws = input::read_products(args.input.as_deref())?;
    info!(count = raws.len(), "Raw products loaded");

    let products = collect_products(mapper.map_all(&raws), args.skip_unpriced)?;
    info!(
        mapped = products.len(),
        skipped = raws.len() - products.len(),
        "Normalization finished"
    );

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    if args.pretty {
        serde_json::to_writer_pretty(&mut out, &products)?;
    } else {
        serde_json::to_writer(&mut out, &products)?;
    }
    writeln!(out)?;
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// Logs go to stderr so stdout stays valid JSON.
/// - `RUST_LOG=debug` - Show resolution decisions
/// - Default: `info,catalog=debug`
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,catalog=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Collects mapping results.
///
/// A product with no price in the requested currency is skipped (with a
/// warning) when `skip_unpriced` is set; every other error stops the run.
fn collect_products(
    results: Vec<CoreResult<NormalizedProduct>>,
    skip_unpriced: bool,
) -> Result<Vec<NormalizedProduct>> {
    let mut products = Vec::with_capacity(results.len());
    for result in results {
        match result {
            Ok(product) => products.push(product),
            Err(err) if skip_unpriced && err.is_pricing_unavailable() => {
                warn!(error = %err, "Pricing unavailable for requested currency, skipping");
            }
            Err(err) => bail!(err),
        }
    }
    Ok(products)
}
