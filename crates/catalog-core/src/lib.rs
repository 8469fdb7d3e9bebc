//! # catalog-core: Product Normalization for the Storefront
//!
//! Turns product records from the billing/catalog service into the
//! presentation-ready product model the storefront renders. Pure functions
//! with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │           Billing / catalog service (external)                  │   │
//! │  │        RawProduct: names × languages, prices × currencies       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ fetched by the caller                  │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ catalog-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │  mapper   │  │ localize  │  │  pricing  │  │   money   │  │   │
//! │  │   │  Product  │  │ regional  │  │   Tax     │  │  Decimal  │  │   │
//! │  │   │  Mapper   │  │ fallback  │  │Calculator │  │  rounding │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • PREFERENCES INJECTED ONCE               │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ NormalizedProduct                      │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    Storefront (TypeScript bindings)             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Raw and normalized product types, tax schedule
//! - [`money`] - Decimal money with bankers rounding
//! - [`localize`] - Localized name/description resolution
//! - [`pricing`] - Price calculator (tax inclusive/exclusive)
//! - [`preferences`] - Language, currency and tax display providers
//! - [`mapper`] - The product mapper
//! - [`config`] - Environment-driven mapper configuration
//! - [`error`] - Domain error types
//! - [`validation`] - Input checks
//!
//! ## Example Usage
//!
//! ```rust
//! use catalog_core::preferences::{LanguagePreference, StaticPreferences};
//! use catalog_core::types::{CurrencyPrice, LocalizedText, RawProduct};
//! use catalog_core::ProductMapper;
//! use rust_decimal::Decimal;
//!
//! let prefs = StaticPreferences::new(LanguagePreference::new("en", "GB"), "USD", false);
//! let mapper = ProductMapper::new(&prefs, &prefs, &prefs).unwrap();
//!
//! let raw = RawProduct {
//!     article_number: "ART-1".to_string(),
//!     category: "tools".to_string(),
//!     name: "Widget".to_string(),
//!     localized_names: Some(vec![
//!         LocalizedText::new("en", "US", "Gadget"),
//!         LocalizedText::new("en", "GB", "Widget-UK"),
//!     ]),
//!     prices: Some(vec![CurrencyPrice::new("USD", Decimal::new(1000, 2))]),
//!     ..RawProduct::default()
//! };
//!
//! let product = mapper.map(&raw).unwrap();
//! assert_eq!(product.name, "Widget-UK");
//! assert_eq!(product.pricing_variants[0].price.to_string(), "10.00");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod config;
pub mod error;
pub mod localize;
pub mod mapper;
pub mod money;
pub mod preferences;
pub mod pricing;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use config::{ConfigError, MapperConfig};
pub use error::{CoreError, CoreResult, ValidationError};
pub use mapper::{ProductMapper, ProductMapperBuilder};
pub use money::Money;
pub use preferences::{
    CurrencyProvider, LanguagePreference, LanguageProvider, StaticPreferences, TaxDisplayProvider,
};
pub use pricing::{PriceCalculator, TaxCalculator};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Decimal places derived tax amounts are rounded to unless configured.
///
/// Two places fits most currencies; JPY wants 0, KWD/BHD want 3.
pub const DEFAULT_ROUNDING_SCALE: u32 = 2;
