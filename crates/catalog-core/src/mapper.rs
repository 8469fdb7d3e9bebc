//! # Product Mapper
//!
//! Maps one [`RawProduct`] to one [`NormalizedProduct`] for a fixed
//! language, currency and tax display mode.
//!
//! ## Mapping Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       ProductMapper::map                                │
//! │                                                                         │
//! │  RawProduct ──┬──► 1. Identity copy      article_number, category       │
//! │               │                                                         │
//! │               ├──► 2. Localized text     name, description              │
//! │               │      (regional → standard → default)                    │
//! │               │                                                         │
//! │               ├──► 3. Pricing variants                                  │
//! │               │      renewal periods? one variant per period            │
//! │               │      otherwise        one variant, flat price list      │
//! │               │        │                                                │
//! │               │        ▼                                                │
//! │               │      exact currency match ──► PriceCalculator           │
//! │               │      no match ──► PriceNotFound (whole map aborts)      │
//! │               │                                                         │
//! │               └──► 4. Custom attributes  one per property, in order     │
//! │                                                                         │
//! │  ──► NormalizedProduct (fresh value, nothing retained)                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Lifecycle
//! Preferences are queried exactly once, when the mapper is built, and
//! never change afterwards. The mapper holds no mutable state, so a shared
//! reference can map products from many threads at once.

use tracing::debug;

use crate::config::MapperConfig;
use crate::error::{CoreError, CoreResult};
use crate::localize::resolve_text;
use crate::money::Money;
use crate::preferences::{
    CurrencyProvider, LanguagePreference, LanguageProvider, StaticPreferences, TaxDisplayProvider,
};
use crate::pricing::{PriceCalculator, TaxCalculator};
use crate::types::{
    CurrencyPrice, CustomAttribute, NormalizedProduct, PricingVariant, RawProduct, RenewalPeriod,
    TaxMode,
};

// =============================================================================
// Product Mapper
// =============================================================================

/// Normalizes raw billing products for one set of storefront preferences.
#[derive(Debug, Clone)]
pub struct ProductMapper<C = TaxCalculator> {
    language: LanguagePreference,
    currency: String,
    prices_include_tax: bool,
    calculator: C,
}

impl ProductMapper<TaxCalculator> {
    /// Builds a mapper, querying each provider once.
    ///
    /// ## Example
    /// ```rust
    /// use catalog_core::preferences::{LanguagePreference, StaticPreferences};
    /// use catalog_core::ProductMapper;
    ///
    /// let prefs = StaticPreferences::new(LanguagePreference::new("en", "GB"), "GBP", true);
    /// let mapper = ProductMapper::new(&prefs, &prefs, &prefs).unwrap();
    /// assert_eq!(mapper.currency(), "GBP");
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidArgument`] when a provider yields a blank
    /// language tag or currency code. Non-blank values are taken as given.
    pub fn new(
        language: &dyn LanguageProvider,
        currency: &dyn CurrencyProvider,
        tax_display: &dyn TaxDisplayProvider,
    ) -> CoreResult<Self> {
        let prices_include_tax = tax_display.prices_include_tax();
        let calculator = TaxCalculator::new(TaxMode::from_includes_tax(prices_include_tax));
        Self::assemble(language.language(), currency.currency(), prices_include_tax, calculator)
    }

    /// Builds a mapper straight from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] for a malformed language tag or
    /// currency code, [`CoreError::InvalidArgument`] for a bad rounding scale.
    pub fn from_config(config: &MapperConfig) -> CoreResult<Self> {
        let prefs = StaticPreferences::from_config(config)?;
        ProductMapper::builder()
            .language(&prefs)
            .currency(&prefs)
            .tax_display(&prefs)
            .rounding_scale(config.rounding_scale)
            .build()
    }

    /// Starts a builder for callers that assemble providers at runtime.
    pub fn builder<'a>() -> ProductMapperBuilder<'a> {
        ProductMapperBuilder::default()
    }
}

impl<C: PriceCalculator> ProductMapper<C> {
    /// Builds a mapper around a caller-supplied price calculator.
    ///
    /// The tax display provider is still queried once so
    /// [`ProductMapper::prices_include_tax`] reports the preference.
    ///
    /// # Errors
    ///
    /// Same as [`ProductMapper::new`].
    pub fn with_calculator(
        language: &dyn LanguageProvider,
        currency: &dyn CurrencyProvider,
        tax_display: &dyn TaxDisplayProvider,
        calculator: C,
    ) -> CoreResult<Self> {
        Self::assemble(
            language.language(),
            currency.currency(),
            tax_display.prices_include_tax(),
            calculator,
        )
    }

    fn assemble(
        language: LanguagePreference,
        currency: String,
        prices_include_tax: bool,
        calculator: C,
    ) -> CoreResult<Self> {
        if language.primary().trim().is_empty() {
            return Err(CoreError::invalid_argument("language", "primary tag is blank"));
        }
        if currency.trim().is_empty() {
            return Err(CoreError::invalid_argument("currency", "currency code is blank"));
        }

        debug!(
            %language,
            %currency,
            prices_include_tax,
            "Product mapper configured"
        );

        Ok(ProductMapper {
            language,
            currency,
            prices_include_tax,
            calculator,
        })
    }

    #[inline]
    pub fn language(&self) -> &LanguagePreference {
        &self.language
    }

    #[inline]
    pub fn currency(&self) -> &str {
        &self.currency
    }

    #[inline]
    pub fn prices_include_tax(&self) -> bool {
        self.prices_include_tax
    }

    /// Maps one raw product.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::PriceNotFound`] when the flat price list, or any
    /// renewal period's price list, has no entry for the resolved currency.
    /// No partial product is returned and later periods are not attempted.
    /// Errors from the price calculator are passed through.
    pub fn map(&self, raw: &RawProduct) -> CoreResult<NormalizedProduct> {
        let name = resolve_text(&raw.name, raw.localized_names.as_deref(), &self.language);
        let description = resolve_text(
            &raw.description,
            raw.localized_descriptions.as_deref(),
            &self.language,
        );

        let pricing_variants = self.pricing_variants(raw)?;

        let custom_attributes: Vec<CustomAttribute> = raw
            .custom_properties
            .iter()
            .map(|(name, value)| CustomAttribute {
                name: name.clone(),
                value: value.clone(),
            })
            .collect();

        debug!(
            article_number = %raw.article_number,
            name_match = ?name.matched,
            description_match = ?description.matched,
            variants = pricing_variants.len(),
            attributes = custom_attributes.len(),
            "Product mapped"
        );

        Ok(NormalizedProduct {
            article_number: raw.article_number.clone(),
            category: raw.category.clone(),
            name: name.value.to_string(),
            description: description.value.to_string(),
            pricing_variants,
            custom_attributes,
        })
    }

    /// Maps a batch; each product succeeds or fails on its own.
    pub fn map_all(&self, raws: &[RawProduct]) -> Vec<CoreResult<NormalizedProduct>> {
        raws.iter().map(|raw| self.map(raw)).collect()
    }

    fn pricing_variants(&self, raw: &RawProduct) -> CoreResult<Vec<PricingVariant>> {
        match raw.renewal_periods.as_deref() {
            Some(periods) if !periods.is_empty() => periods
                .iter()
                .map(|renewal| -> CoreResult<PricingVariant> {
                    let price = self.resolve_price(&renewal.prices, raw, Some(&renewal.period))?;
                    Ok(PricingVariant {
                        price,
                        renewal_period: Some(renewal.period),
                    })
                })
                .collect(),
            _ => {
                let prices = raw.prices.as_deref().unwrap_or_default();
                let price = self.resolve_price(prices, raw, None)?;
                Ok(vec![PricingVariant {
                    price,
                    renewal_period: None,
                }])
            }
        }
    }

    /// Selects the entry for the resolved currency and applies tax.
    fn resolve_price(
        &self,
        prices: &[CurrencyPrice],
        raw: &RawProduct,
        period: Option<&RenewalPeriod>,
    ) -> CoreResult<Money> {
        let entry = prices
            .iter()
            .find(|price| price.currency_code == self.currency)
            .ok_or_else(|| CoreError::PriceNotFound {
                currency: self.currency.clone(),
                article_number: raw.article_number.clone(),
                renewal_period: period.map(ToString::to_string),
            })?;

        self.calculator.calculate_price(entry.value, &raw.taxes)
    }
}

// =============================================================================
// Builder
// =============================================================================

/// Collects preference providers, any of which may be absent until
/// [`ProductMapperBuilder::build`] checks them.
#[derive(Default)]
pub struct ProductMapperBuilder<'a> {
    language: Option<&'a dyn LanguageProvider>,
    currency: Option<&'a dyn CurrencyProvider>,
    tax_display: Option<&'a dyn TaxDisplayProvider>,
    rounding_scale: Option<u32>,
}

impl<'a> ProductMapperBuilder<'a> {
    pub fn language(mut self, provider: &'a dyn LanguageProvider) -> Self {
        self.language = Some(provider);
        self
    }

    pub fn currency(mut self, provider: &'a dyn CurrencyProvider) -> Self {
        self.currency = Some(provider);
        self
    }

    pub fn tax_display(mut self, provider: &'a dyn TaxDisplayProvider) -> Self {
        self.tax_display = Some(provider);
        self
    }

    pub fn rounding_scale(mut self, scale: u32) -> Self {
        self.rounding_scale = Some(scale);
        self
    }

    /// # Errors
    ///
    /// Returns [`CoreError::InvalidArgument`] naming the first absent
    /// provider, or any error from [`ProductMapper::new`].
    pub fn build(self) -> CoreResult<ProductMapper> {
        let language = self.language.ok_or_else(|| missing_provider("language"))?;
        let currency = self.currency.ok_or_else(|| missing_provider("currency"))?;
        let tax_display = self.tax_display.ok_or_else(|| missing_provider("tax_display"))?;

        let prices_include_tax = tax_display.prices_include_tax();
        let mut calculator = TaxCalculator::new(TaxMode::from_includes_tax(prices_include_tax));
        if let Some(scale) = self.rounding_scale {
            calculator = calculator.with_rounding_scale(scale)?;
        }

        ProductMapper::assemble(
            language.language(),
            currency.currency(),
            prices_include_tax,
            calculator,
        )
    }
}

fn missing_provider(argument: &str) -> CoreError {
    CoreError::invalid_argument(argument, "preference provider is required")
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{
        LocalizedText, PeriodUnit, RawRenewalPeriod, TaxEntry, TaxKind, TaxRate, TaxSchedule,
    };
    use indexmap::IndexMap;
    use rust_decimal_macros::dec;
    use std::cell::Cell;

    fn prefs(lang: &str, region: &str, currency: &str, include_tax: bool) -> StaticPreferences {
        StaticPreferences::new(LanguagePreference::new(lang, region), currency, include_tax)
    }

    fn mapper(lang: &str, region: &str, currency: &str, include_tax: bool) -> ProductMapper {
        let p = prefs(lang, region, currency, include_tax);
        ProductMapper::new(&p, &p, &p).unwrap()
    }

    fn widget() -> RawProduct {
        RawProduct {
            article_number: "ART-1".to_string(),
            category: "tools".to_string(),
            name: "Widget".to_string(),
            description: "A widget".to_string(),
            prices: Some(vec![CurrencyPrice::new("USD", dec!(10.00))]),
            ..RawProduct::default()
        }
    }

    /// Counts how often each preference is queried.
    #[derive(Default)]
    struct CountingPrefs {
        language_calls: Cell<u32>,
        currency_calls: Cell<u32>,
        tax_calls: Cell<u32>,
    }

    impl LanguageProvider for CountingPrefs {
        fn language(&self) -> LanguagePreference {
            self.language_calls.set(self.language_calls.get() + 1);
            LanguagePreference::new("en", "US")
        }
    }

    impl CurrencyProvider for CountingPrefs {
        fn currency(&self) -> String {
            self.currency_calls.set(self.currency_calls.get() + 1);
            "USD".to_string()
        }
    }

    impl TaxDisplayProvider for CountingPrefs {
        fn prices_include_tax(&self) -> bool {
            self.tax_calls.set(self.tax_calls.get() + 1);
            false
        }
    }

    #[test]
    fn test_preferences_queried_once() {
        let counting = CountingPrefs::default();
        let mapper = ProductMapper::new(&counting, &counting, &counting).unwrap();

        for _ in 0..3 {
            mapper.map(&widget()).unwrap();
        }

        assert_eq!(counting.language_calls.get(), 1);
        assert_eq!(counting.currency_calls.get(), 1);
        assert_eq!(counting.tax_calls.get(), 1);
    }

    #[test]
    fn test_builder_reports_missing_provider() {
        let p = prefs("en", "US", "USD", false);

        let err = ProductMapper::builder()
            .language(&p)
            .tax_display(&p)
            .build()
            .unwrap_err();
        assert!(matches!(err, CoreError::InvalidArgument { ref argument, .. } if argument == "currency"));

        let err = ProductMapper::builder().build().unwrap_err();
        assert!(matches!(err, CoreError::InvalidArgument { ref argument, .. } if argument == "language"));
    }

    #[test]
    fn test_rejects_blank_currency() {
        let p = prefs("en", "US", "", false);
        let err = ProductMapper::new(&p, &p, &p).unwrap_err();
        assert!(matches!(err, CoreError::InvalidArgument { ref argument, .. } if argument == "currency"));
    }

    #[test]
    fn test_rejects_blank_language() {
        let p = prefs(" ", "US", "USD", false);
        let err = ProductMapper::new(&p, &p, &p).unwrap_err();
        assert!(matches!(err, CoreError::InvalidArgument { ref argument, .. } if argument == "language"));
    }

    #[test]
    fn test_non_iso_preferences_are_taken_as_given() {
        let p = prefs("x1", "US", "XBT1", false);
        let mapper = ProductMapper::new(&p, &p, &p).unwrap();
        assert_eq!(mapper.currency(), "XBT1");

        let mut raw = widget();
        raw.prices = Some(vec![
            CurrencyPrice::new("USD", dec!(10.00)),
            CurrencyPrice::new("XBT1", dec!(0.0002)),
        ]);
        let product = mapper.map(&raw).unwrap();
        assert_eq!(product.pricing_variants[0].price.amount(), dec!(0.0002));

        let err = mapper.map(&widget()).unwrap_err();
        assert!(err.is_pricing_unavailable());
    }

    #[test]
    fn test_identity_copied_verbatim() {
        let mut raw = widget();
        raw.article_number = "  odd id ".to_string();
        raw.category = String::new();

        let product = mapper("en", "US", "USD", false).map(&raw).unwrap();
        assert_eq!(product.article_number, "  odd id ");
        assert_eq!(product.category, "");
    }

    #[test]
    fn test_description_resolved_independently_of_name() {
        let mut raw = widget();
        raw.localized_names = Some(vec![LocalizedText::new("de", "DE", "Ding")]);
        raw.localized_descriptions = Some(vec![
            LocalizedText::new("de", "AT", "Ein Ding (AT)"),
            LocalizedText::new("de", "DE", "Ein Ding"),
        ]);

        let product = mapper("de", "CH", "USD", false).map(&raw).unwrap();
        assert_eq!(product.name, "Ding");
        assert_eq!(product.description, "Ein Ding (AT)");
    }

    #[test]
    fn test_flat_price_single_variant() {
        let product = mapper("en", "US", "USD", false).map(&widget()).unwrap();
        assert_eq!(product.pricing_variants.len(), 1);
        assert_eq!(product.pricing_variants[0].price.amount(), dec!(10.00));
        assert!(product.pricing_variants[0].renewal_period.is_none());
    }

    #[test]
    fn test_currency_match_is_exact() {
        let mut raw = widget();
        raw.prices = Some(vec![CurrencyPrice::new("usd", dec!(9.00))]);
        let err = mapper("en", "US", "USD", false).map(&raw).unwrap_err();
        assert!(err.is_pricing_unavailable());
    }

    #[test]
    fn test_first_currency_entry_wins() {
        let mut raw = widget();
        raw.prices = Some(vec![
            CurrencyPrice::new("EUR", dec!(8.00)),
            CurrencyPrice::new("USD", dec!(10.00)),
            CurrencyPrice::new("USD", dec!(11.00)),
        ]);
        let product = mapper("en", "US", "USD", false).map(&raw).unwrap();
        assert_eq!(product.pricing_variants[0].price.amount(), dec!(10.00));
    }

    #[test]
    fn test_missing_flat_prices_fail() {
        let mut raw = widget();
        raw.prices = None;
        let err = mapper("en", "US", "USD", false).map(&raw).unwrap_err();
        assert!(matches!(
            err,
            CoreError::PriceNotFound { renewal_period: None, .. }
        ));
    }

    #[test]
    fn test_empty_renewal_list_uses_flat_prices() {
        let mut raw = widget();
        raw.renewal_periods = Some(vec![]);
        let product = mapper("en", "US", "USD", false).map(&raw).unwrap();
        assert_eq!(product.pricing_variants.len(), 1);
        assert!(!product.is_subscription());
    }

    #[test]
    fn test_renewal_period_failure_names_period() {
        let mut raw = widget();
        raw.renewal_periods = Some(vec![
            RawRenewalPeriod::new(
                RenewalPeriod::new(1, PeriodUnit::Month),
                vec![CurrencyPrice::new("USD", dec!(5))],
            ),
            RawRenewalPeriod::new(
                RenewalPeriod::new(1, PeriodUnit::Year),
                vec![CurrencyPrice::new("EUR", dec!(45))],
            ),
        ]);

        let err = mapper("en", "US", "USD", false).map(&raw).unwrap_err();
        match err {
            CoreError::PriceNotFound {
                currency,
                article_number,
                renewal_period,
            } => {
                assert_eq!(currency, "USD");
                assert_eq!(article_number, "ART-1");
                assert_eq!(renewal_period.as_deref(), Some("1 Year"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_renewal_prices_taxed() {
        let mut raw = widget();
        raw.taxes = TaxSchedule::new(
            vec![TaxEntry::new("VAT", TaxRate::from_bps(2000), TaxKind::Compound)],
            TaxMode::Exclusive,
        );
        raw.renewal_periods = Some(vec![RawRenewalPeriod::new(
            RenewalPeriod::new(3, PeriodUnit::Month),
            vec![CurrencyPrice::new("USD", dec!(15.00))],
        )]);

        let product = mapper("en", "US", "USD", true).map(&raw).unwrap();
        assert_eq!(product.pricing_variants[0].price.amount(), dec!(18.00));
        assert_eq!(
            product.pricing_variants[0].renewal_period,
            Some(RenewalPeriod::new(3, PeriodUnit::Month))
        );
    }

    #[test]
    fn test_custom_attributes_keep_order_and_duplicated_values() {
        let mut props = IndexMap::new();
        props.insert("zeta".to_string(), "same".to_string());
        props.insert("alpha".to_string(), "same".to_string());
        props.insert("mid".to_string(), String::new());

        let mut raw = widget();
        raw.custom_properties = props;

        let product = mapper("en", "US", "USD", false).map(&raw).unwrap();
        let names: Vec<&str> = product
            .custom_attributes
            .iter()
            .map(|a| a.name.as_str())
            .collect();
        assert_eq!(names, vec!["zeta", "alpha", "mid"]);
        assert_eq!(product.attribute("alpha"), Some("same"));
        assert_eq!(product.attribute("mid"), Some(""));
    }

    #[test]
    fn test_map_all_isolates_failures() {
        let mut bad = widget();
        bad.article_number = "ART-2".to_string();
        bad.prices = Some(vec![CurrencyPrice::new("EUR", dec!(1))]);

        let results = mapper("en", "US", "USD", false).map_all(&[widget(), bad, widget()]);
        assert_eq!(results.len(), 3);
        assert!(results[0].is_ok());
        assert!(results[1].as_ref().unwrap_err().is_pricing_unavailable());
        assert!(results[2].is_ok());
    }

    #[test]
    fn test_custom_calculator_is_used() {
        struct Doubling;
        impl PriceCalculator for Doubling {
            fn calculate_price(&self, base: Money, _: &TaxSchedule) -> CoreResult<Money> {
                base.checked_add(base)
                    .ok_or_else(|| CoreError::invalid_argument("taxes", "price overflow"))
            }
        }

        let p = prefs("en", "US", "USD", false);
        let mapper = ProductMapper::with_calculator(&p, &p, &p, Doubling).unwrap();
        let product = mapper.map(&widget()).unwrap();
        assert_eq!(product.pricing_variants[0].price.amount(), dec!(20.00));
    }

    #[test]
    fn test_calculator_error_aborts_map() {
        let mut raw = widget();
        raw.prices = Some(vec![CurrencyPrice::new("USD", dec!(-1))]);
        let err = mapper("en", "US", "USD", false).map(&raw).unwrap_err();
        assert!(matches!(err, CoreError::InvalidArgument { .. }));
    }

    #[test]
    fn test_price_overflow_is_an_error_not_a_panic() {
        let mut raw = widget();
        raw.prices = Some(vec![CurrencyPrice::new("USD", rust_decimal::Decimal::MAX)]);
        raw.taxes = TaxSchedule::new(
            vec![TaxEntry::new("VAT", TaxRate::from_bps(1000), TaxKind::Compound)],
            TaxMode::Exclusive,
        );

        let err = mapper("en", "US", "USD", true).map(&raw).unwrap_err();
        assert!(matches!(err, CoreError::InvalidArgument { ref argument, .. } if argument == "taxes"));
    }

    #[test]
    fn test_from_config_applies_rounding_scale() {
        let config = MapperConfig {
            currency: "JPY".to_string(),
            prices_include_tax: true,
            rounding_scale: 0,
            ..MapperConfig::default()
        };
        let mapper = ProductMapper::from_config(&config).unwrap();

        let mut raw = widget();
        raw.prices = Some(vec![CurrencyPrice::new("JPY", dec!(1005))]);
        raw.taxes = TaxSchedule::new(
            vec![TaxEntry::new("JCT", TaxRate::from_bps(1000), TaxKind::Compound)],
            TaxMode::Exclusive,
        );

        let product = mapper.map(&raw).unwrap();
        assert_eq!(product.pricing_variants[0].price.amount(), dec!(1105));
    }
}
