//! # Preference Providers
//!
//! The three storefront preferences a mapper needs, each behind its own
//! single-method capability trait.
//!
//! ```text
//! ┌──────────────────────┐   language()            ┌──────────────────┐
//! │  LanguageProvider    │ ──────────────────────► │                  │
//! ├──────────────────────┤   currency()            │  ProductMapper   │
//! │  CurrencyProvider    │ ──────────────────────► │  (queried ONCE,  │
//! ├──────────────────────┤   prices_include_tax()  │   at build time) │
//! │  TaxDisplayProvider  │ ──────────────────────► │                  │
//! └──────────────────────┘                         └──────────────────┘
//! ```
//!
//! Real storefronts resolve these from the session, the request or a
//! cookie. [`StaticPreferences`] covers the configuration-driven case.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::MapperConfig;
use crate::error::ValidationError;
use crate::validation::{validate_currency_code, validate_language_tag};

// =============================================================================
// Language Preference
// =============================================================================

/// A resolved language: primary subtag plus region/culture subtag.
///
/// Both parts are compared case-insensitively during resolution; they are
/// stored as given.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguagePreference {
    primary_tag: String,
    region_tag: String,
}

impl LanguagePreference {
    pub fn new(primary_tag: impl Into<String>, region_tag: impl Into<String>) -> Self {
        LanguagePreference {
            primary_tag: primary_tag.into(),
            region_tag: region_tag.into(),
        }
    }

    /// Parses "en-GB", "en_GB" or a bare "en" (empty region).
    ///
    /// ```rust
    /// use catalog_core::preferences::LanguagePreference;
    ///
    /// let lang = LanguagePreference::parse("de_AT").unwrap();
    /// assert_eq!(lang.primary(), "de");
    /// assert_eq!(lang.region(), "AT");
    /// ```
    pub fn parse(tag: &str) -> Result<Self, ValidationError> {
        let tag = tag.trim();
        let (primary, region) = match tag.split_once(['-', '_']) {
            Some((primary, region)) => (primary, region),
            None => (tag, ""),
        };

        validate_language_tag(primary)?;
        if region.contains(['-', '_']) {
            return Err(ValidationError::InvalidFormat {
                field: "language".to_string(),
                reason: format!("'{tag}' has more than one subtag after the language"),
            });
        }

        Ok(LanguagePreference::new(primary, region))
    }

    #[inline]
    pub fn primary(&self) -> &str {
        &self.primary_tag
    }

    #[inline]
    pub fn region(&self) -> &str {
        &self.region_tag
    }
}

impl fmt::Display for LanguagePreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.region_tag.is_empty() {
            write!(f, "{}", self.primary_tag)
        } else {
            write!(f, "{}-{}", self.primary_tag, self.region_tag)
        }
    }
}

// =============================================================================
// Capability Traits
// =============================================================================

/// Supplies the storefront's current language.
pub trait LanguageProvider {
    fn language(&self) -> LanguagePreference;
}

/// Supplies the storefront's current currency code.
pub trait CurrencyProvider {
    fn currency(&self) -> String;
}

/// Supplies whether prices are displayed with tax included.
pub trait TaxDisplayProvider {
    fn prices_include_tax(&self) -> bool;
}

// =============================================================================
// Static Preferences
// =============================================================================

/// Fixed preference values, typically built from a [`MapperConfig`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticPreferences {
    pub language: LanguagePreference,
    pub currency: String,
    pub prices_include_tax: bool,
}

impl StaticPreferences {
    pub fn new(
        language: LanguagePreference,
        currency: impl Into<String>,
        prices_include_tax: bool,
    ) -> Self {
        StaticPreferences {
            language,
            currency: currency.into(),
            prices_include_tax,
        }
    }

    /// Builds preferences from configuration, validating the language tag
    /// and currency code.
    pub fn from_config(config: &MapperConfig) -> Result<Self, ValidationError> {
        let language = LanguagePreference::parse(&config.language)?;
        validate_currency_code(&config.currency)?;
        Ok(StaticPreferences::new(
            language,
            config.currency.clone(),
            config.prices_include_tax,
        ))
    }
}

impl LanguageProvider for StaticPreferences {
    fn language(&self) -> LanguagePreference {
        self.language.clone()
    }
}

impl CurrencyProvider for StaticPreferences {
    fn currency(&self) -> String {
        self.currency.clone()
    }
}

impl TaxDisplayProvider for StaticPreferences {
    fn prices_include_tax(&self) -> bool {
        self.prices_include_tax
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
