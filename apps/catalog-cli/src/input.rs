//! Reading raw products from JSON.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::io::Read;
use std::path::Path;

use catalog_core::RawProduct;

/// Either a single record or a list, as the billing export produces both.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawInput {
    Many(Vec<RawProduct>),
    One(Box<RawProduct>),
}

/// Parses one raw product or an array of them.
pub fn parse_products(json: &str) -> Result<Vec<RawProduct>> {
    let input: RawInput =
        serde_json::from_str(json).context("input is not a raw product or a list of them")?;
    Ok(match input {
        RawInput::Many(products) => products,
        RawInput::One(product) => vec![*product],
    })
}

/// Reads products from `path`, or from stdin when no path is given.
pub fn read_products(path: Option<&Path>) -> Result<Vec<RawProduct>> {
    let json = match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read stdin")?;
            buf
        }
    };
    parse_products(&json)
}
