//! Mapper configuration.
//!
//! Configuration is loaded from environment variables with fallback to
//! defaults. Values are plain data; [`crate::preferences::StaticPreferences`]
//! turns them into preference providers.
//!
//! | Variable                     | Default | Meaning                         |
//! |------------------------------|---------|---------------------------------|
//! | `CATALOG_LANGUAGE`           | `en-US` | language-region tag             |
//! | `CATALOG_CURRENCY`           | `USD`   | ISO 4217 code                   |
//! | `CATALOG_PRICES_INCLUDE_TAX` | `false` | show prices with tax            |
//! | `CATALOG_ROUNDING_SCALE`     | `2`     | decimal places for derived tax  |

use serde::{Deserialize, Serialize};
use std::env;

use crate::validation::validate_rounding_scale;

pub const ENV_LANGUAGE: &str = "CATALOG_LANGUAGE";
pub const ENV_CURRENCY: &str = "CATALOG_CURRENCY";
pub const ENV_PRICES_INCLUDE_TAX: &str = "CATALOG_PRICES_INCLUDE_TAX";
pub const ENV_ROUNDING_SCALE: &str = "CATALOG_ROUNDING_SCALE";

/// Mapper configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MapperConfig {
    /// Language-region tag, e.g. "en-GB".
    pub language: String,

    /// ISO 4217 currency code.
    pub currency: String,

    /// Display prices with tax included.
    pub prices_include_tax: bool,

    /// Decimal places derived tax amounts are rounded to.
    pub rounding_scale: u32,
}

impl Default for MapperConfig {
    fn default() -> Self {
        MapperConfig {
            language: "en-US".to_string(),
            currency: "USD".to_string(),
            prices_include_tax: false,
            rounding_scale: crate::DEFAULT_ROUNDING_SCALE,
        }
    }
}

impl MapperConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    ///
    /// Missing keys take the default; present keys must parse.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = MapperConfig::default();

        let prices_include_tax = match lookup(ENV_PRICES_INCLUDE_TAX) {
            Some(raw) => parse_flag(&raw)
                .ok_or_else(|| ConfigError::InvalidValue(ENV_PRICES_INCLUDE_TAX.to_string()))?,
            None => defaults.prices_include_tax,
        };

        let rounding_scale = match lookup(ENV_ROUNDING_SCALE) {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue(ENV_ROUNDING_SCALE.to_string()))?,
            None => defaults.rounding_scale,
        };

        let config = MapperConfig {
            language: lookup(ENV_LANGUAGE)
                .map(|v| v.trim().to_string())
                .unwrap_or(defaults.language),
            currency: lookup(ENV_CURRENCY)
                .map(|v| v.trim().to_string())
                .unwrap_or(defaults.currency),
            prices_include_tax,
            rounding_scale,
        };

        config.validate()?;
        Ok(config)
    }

    /// Checks values that have no meaningful fallback.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.language.is_empty() {
            return Err(ConfigError::MissingRequired(ENV_LANGUAGE.to_string()));
        }
        if self.currency.is_empty() {
            return Err(ConfigError::MissingRequired(ENV_CURRENCY.to_string()));
        }
        validate_rounding_scale(self.rounding_scale)
            .map_err(|_| ConfigError::InvalidValue(ENV_ROUNDING_SCALE.to_string()))?;
        Ok(())
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Missing required configuration: {0}")]
    MissingRequired(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = MapperConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, MapperConfig::default());
        assert_eq!(config.rounding_scale, 2);
    }

    #[test]
    fn test_reads_all_values() {
        let config = MapperConfig::from_lookup(lookup_from(&[
            (ENV_LANGUAGE, "de-AT"),
            (ENV_CURRENCY, "EUR"),
            (ENV_PRICES_INCLUDE_TAX, "yes"),
            (ENV_ROUNDING_SCALE, "3"),
        ]))
        .unwrap();

        assert_eq!(config.language, "de-AT");
        assert_eq!(config.currency, "EUR");
        assert!(config.prices_include_tax);
        assert_eq!(config.rounding_scale, 3);
    }

    #[test]
    fn test_rejects_unparsable_flag() {
        let err = MapperConfig::from_lookup(lookup_from(&[(ENV_PRICES_INCLUDE_TAX, "maybe")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(ref key) if key == ENV_PRICES_INCLUDE_TAX));
    }

    #[test]
    fn test_rejects_out_of_range_scale() {
        let err =
            MapperConfig::from_lookup(lookup_from(&[(ENV_ROUNDING_SCALE, "42")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(_)));
    }

    #[test]
    fn test_blank_currency_is_missing() {
        let err = MapperConfig::from_lookup(lookup_from(&[(ENV_CURRENCY, "  ")])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingRequired(_)));
    }

    #[test]
    fn test_deserializes_partial_json() {
        let config: MapperConfig = serde_json::from_str(r#"{"currency": "GBP"}"#).unwrap();
        assert_eq!(config.currency, "GBP");
        assert_eq!(config.language, "en-US");
    }
}
