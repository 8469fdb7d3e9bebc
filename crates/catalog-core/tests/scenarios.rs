//! End-to-end mapping of billing-service JSON records.

use catalog_core::preferences::{LanguagePreference, StaticPreferences};
use catalog_core::{CoreError, PeriodUnit, ProductMapper, RawProduct, RenewalPeriod};
use rust_decimal_macros::dec;

fn mapper(lang: &str, region: &str, currency: &str, include_tax: bool) -> ProductMapper {
    let prefs = StaticPreferences::new(LanguagePreference::new(lang, region), currency, include_tax);
    ProductMapper::new(&prefs, &prefs, &prefs).unwrap()
}

fn raw(json: &str) -> RawProduct {
    serde_json::from_str(json).unwrap()
}

const LOCALIZED_GADGET: &str = r#"{
    "articleNumber": "ART-2",
    "category": "gadgets",
    "name": "Default",
    "localizedNames": [
        {"languageTag": "en", "regionTag": "US", "value": "Gadget"},
        {"languageTag": "en", "regionTag": "GB", "value": "Widget-UK"}
    ],
    "prices": [{"currencyCode": "USD", "value": "1.00"}]
}"#;

#[test]
fn test_plain_product_keeps_default_name_and_flat_price() {
    let product = mapper("en", "US", "USD", false)
        .map(&raw(
            r#"{
                "articleNumber": "ART-1",
                "category": "tools",
                "name": "Widget",
                "prices": [{"currencyCode": "USD", "value": "10.00"}]
            }"#,
        ))
        .unwrap();

    assert_eq!(product.name, "Widget");
    assert_eq!(product.pricing_variants.len(), 1);
    assert_eq!(product.pricing_variants[0].price.amount(), dec!(10.00));
    assert_eq!(product.pricing_variants[0].renewal_period, None);
}

#[test]
fn test_regional_match_is_preferred() {
    let product = mapper("EN", "GB", "USD", false)
        .map(&raw(LOCALIZED_GADGET))
        .unwrap();
    assert_eq!(product.name, "Widget-UK");
}

#[test]
fn test_standard_match_falls_back_to_first_entry() {
    let product = mapper("en", "CA", "USD", false)
        .map(&raw(LOCALIZED_GADGET))
        .unwrap();
    assert_eq!(product.name, "Gadget");
}

#[test]
fn test_unknown_language_keeps_default() {
    let product = mapper("ja", "JP", "USD", false)
        .map(&raw(LOCALIZED_GADGET))
        .unwrap();
    assert_eq!(product.name, "Default");
}

#[test]
fn test_renewal_periods_become_variants_in_order() {
    let product = mapper("en", "US", "USD", false)
        .map(&raw(
            r#"{
                "articleNumber": "SUB-1",
                "category": "subscriptions",
                "name": "Plan",
                "prices": [{"currencyCode": "USD", "value": "999"}],
                "renewalPeriods": [
                    {"period": {"amount": 1, "unit": "month"}, "prices": [{"currencyCode": "USD", "value": 5}]},
                    {"period": {"amount": 1, "unit": "year"}, "prices": [{"currencyCode": "USD", "value": 50}]}
                ]
            }"#,
        ))
        .unwrap();

    assert!(product.is_subscription());
    assert_eq!(product.pricing_variants.len(), 2);

    assert_eq!(product.pricing_variants[0].price.amount(), dec!(5));
    assert_eq!(
        product.pricing_variants[0].renewal_period,
        Some(RenewalPeriod::new(1, PeriodUnit::Month))
    );
    assert_eq!(product.pricing_variants[1].price.amount(), dec!(50));
    assert_eq!(
        product.pricing_variants[1].renewal_period,
        Some(RenewalPeriod::new(1, PeriodUnit::Year))
    );
}

#[test]
fn test_missing_currency_fails_whole_mapping() {
    let err = mapper("en", "US", "USD", false)
        .map(&raw(
            r#"{
                "articleNumber": "ART-5",
                "category": "tools",
                "name": "Euro only",
                "prices": [{"currencyCode": "EUR", "value": "10"}]
            }"#,
        ))
        .unwrap_err();

    assert!(err.is_pricing_unavailable());
    assert!(err.to_string().contains("USD"));
    assert!(matches!(err, CoreError::PriceNotFound { ref article_number, .. } if article_number == "ART-5"));
}

#[test]
fn test_inclusive_display_adds_vat() {
    let product = mapper("de", "DE", "EUR", true)
        .map(&raw(
            r#"{
                "articleNumber": "ART-6",
                "category": "tools",
                "name": "Hammer",
                "prices": [{"currencyCode": "EUR", "value": "10.00"}],
                "taxes": {"entries": [{"name": "MwSt", "rateBps": 1900}], "priceBasis": "exclusive"}
            }"#,
        ))
        .unwrap();
    assert_eq!(product.pricing_variants[0].price.amount(), dec!(11.90));
}

#[test]
fn test_exclusive_display_strips_vat_from_gross_prices() {
    let product = mapper("de", "DE", "EUR", false)
        .map(&raw(
            r#"{
                "articleNumber": "ART-7",
                "category": "tools",
                "name": "Hammer",
                "prices": [{"currencyCode": "EUR", "value": "11.90"}],
                "taxes": {"entries": [{"name": "MwSt", "rateBps": 1900}], "priceBasis": "inclusive"}
            }"#,
        ))
        .unwrap();
    assert_eq!(product.pricing_variants[0].price.amount(), dec!(10.00));
}

#[test]
fn test_custom_properties_copied_in_document_order() {
    let product = mapper("en", "US", "USD", false)
        .map(&raw(
            r#"{
                "articleNumber": "ART-8",
                "category": "tools",
                "name": "Drill",
                "prices": [{"currencyCode": "USD", "value": "1"}],
                "customProperties": {"voltage": "18V", "brand": "Acme", "color": "red"}
            }"#,
        ))
        .unwrap();

    let pairs: Vec<(&str, &str)> = product
        .custom_attributes
        .iter()
        .map(|a| (a.name.as_str(), a.value.as_str()))
        .collect();
    assert_eq!(
        pairs,
        vec![("voltage", "18V"), ("brand", "Acme"), ("color", "red")]
    );
}

#[test]
fn test_normalized_output_json_shape() {
    let product = mapper("en", "GB", "USD", false)
        .map(&raw(LOCALIZED_GADGET))
        .unwrap();
    let value = serde_json::to_value(&product).unwrap();

    assert_eq!(value["articleNumber"], "ART-2");
    assert_eq!(value["name"], "Widget-UK");
    assert_eq!(value["pricingVariants"][0]["price"], "1.00");
    assert!(value["pricingVariants"][0]["renewalPeriod"].is_null());
    assert_eq!(value["customAttributes"], serde_json::json!([]));
}
