//! # Domain Types
//!
//! Raw billing records going in, normalized storefront products coming out.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  INPUT (billing service, read-only)     OUTPUT (storefront)             │
//! │  ┌─────────────────────────┐            ┌─────────────────────────┐    │
//! │  │      RawProduct         │            │   NormalizedProduct     │    │
//! │  │  ─────────────────────  │            │  ─────────────────────  │    │
//! │  │  article_number         │ ─────────► │  article_number         │    │
//! │  │  name + localized_names │ ─────────► │  name                   │    │
//! │  │  description + ...      │ ─────────► │  description            │    │
//! │  │  prices                 │ ─┐         │  pricing_variants       │    │
//! │  │  renewal_periods        │ ─┼───────► │    price                │    │
//! │  │  taxes (TaxSchedule)    │ ─┘         │    renewal_period       │    │
//! │  │  custom_properties      │ ─────────► │  custom_attributes      │    │
//! │  └─────────────────────────┘            └─────────────────────────┘    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    TaxRate      │   │    TaxMode      │   │  RenewalPeriod  │       │
//! │  │  bps (u32)      │   │  Exclusive      │   │  amount + unit  │       │
//! │  │  825 = 8.25%    │   │  Inclusive      │   │  "1 Month"      │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every ordered collection here is a `Vec` (or an `IndexMap`): resolution
//! results depend on the order entries were received in.

use indexmap::IndexMap;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 825 bps = 8.25% (e.g., Texas sales tax), 1900 bps = 19% (German VAT)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Creates a tax rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as an exact fraction (825 bps → 0.0825).
    #[inline]
    pub fn as_fraction(&self) -> Decimal {
        Decimal::new(i64::from(self.0), 4)
    }
}

// =============================================================================
// Tax Mode
// =============================================================================

/// Whether a price includes tax.
///
/// Used twice: as the storefront's display preference, and as the basis
/// the billing service stored its prices in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaxMode {
    /// Price + tax shown separately (USA model).
    #[default]
    Exclusive,
    /// Price includes tax (EU/UK model).
    Inclusive,
}

impl TaxMode {
    /// Maps the "show prices with tax" flag onto a mode.
    #[inline]
    pub const fn from_includes_tax(includes_tax: bool) -> Self {
        if includes_tax {
            TaxMode::Inclusive
        } else {
            TaxMode::Exclusive
        }
    }
}

// =============================================================================
// Tax Schedule
// =============================================================================

/// How a tax entry is aggregated with the entries before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaxKind {
    /// Computed against the running total (base plus every earlier tax).
    #[default]
    Compound,
    /// Computed against the untaxed base only.
    Additive,
}

/// One line of a tax schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxEntry {
    /// Label from the billing system, e.g. "VAT" or "State".
    #[serde(default)]
    pub name: String,

    /// Rate in basis points.
    pub rate_bps: TaxRate,

    #[serde(default)]
    pub kind: TaxKind,
}

impl TaxEntry {
    pub fn new(name: impl Into<String>, rate: TaxRate, kind: TaxKind) -> Self {
        TaxEntry {
            name: name.into(),
            rate_bps: rate,
            kind,
        }
    }
}

/// The ordered tax entries of a product, plus the basis its prices use.
///
/// Entries are applied in list order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxSchedule {
    #[serde(default)]
    pub entries: Vec<TaxEntry>,

    /// Whether the source-stored prices already contain these taxes.
    #[serde(default)]
    pub price_basis: TaxMode,
}

impl TaxSchedule {
    /// A schedule with no taxes on exclusive prices.
    pub fn none() -> Self {
        TaxSchedule::default()
    }

    pub fn new(entries: Vec<TaxEntry>, price_basis: TaxMode) -> Self {
        TaxSchedule {
            entries,
            price_basis,
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// =============================================================================
// Renewal Period
// =============================================================================

/// Unit of a subscription billing interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum PeriodUnit {
    Day,
    Week,
    Month,
    Year,
}

impl PeriodUnit {
    fn label(&self, plural: bool) -> &'static str {
        match (self, plural) {
            (PeriodUnit::Day, false) => "Day",
            (PeriodUnit::Day, true) => "Days",
            (PeriodUnit::Week, false) => "Week",
            (PeriodUnit::Week, true) => "Weeks",
            (PeriodUnit::Month, false) => "Month",
            (PeriodUnit::Month, true) => "Months",
            (PeriodUnit::Year, false) => "Year",
            (PeriodUnit::Year, true) => "Years",
        }
    }
}

/// A subscription billing interval, e.g. "1 Month" or "12 Months".
///
/// Carried through from the raw record to the output unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct RenewalPeriod {
    pub amount: u32,
    pub unit: PeriodUnit,
}

impl RenewalPeriod {
    #[inline]
    pub const fn new(amount: u32, unit: PeriodUnit) -> Self {
        RenewalPeriod { amount, unit }
    }
}

impl fmt::Display for RenewalPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.amount, self.unit.label(self.amount != 1))
    }
}

// =============================================================================
// Raw Product (input)
// =============================================================================

/// A name or description in one language/region variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalizedText {
    /// Primary language subtag, e.g. "en".
    pub language_tag: String,

    /// Region/culture subtag, e.g. "GB". May be empty.
    #[serde(default)]
    pub region_tag: String,

    pub value: String,
}

impl LocalizedText {
    pub fn new(
        language_tag: impl Into<String>,
        region_tag: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        LocalizedText {
            language_tag: language_tag.into(),
            region_tag: region_tag.into(),
            value: value.into(),
        }
    }
}

/// A price in one currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrencyPrice {
    /// ISO 4217 currency code, compared exactly ("USD" != "usd").
    pub currency_code: String,

    pub value: Money,
}

impl CurrencyPrice {
    pub fn new(currency_code: impl Into<String>, value: impl Into<Money>) -> Self {
        CurrencyPrice {
            currency_code: currency_code.into(),
            value: value.into(),
        }
    }
}

/// A renewal period with its own price list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawRenewalPeriod {
    pub period: RenewalPeriod,

    #[serde(default)]
    pub prices: Vec<CurrencyPrice>,
}

impl RawRenewalPeriod {
    pub fn new(period: RenewalPeriod, prices: Vec<CurrencyPrice>) -> Self {
        RawRenewalPeriod { period, prices }
    }
}

/// A product record as retrieved from the billing/catalog service.
///
/// Absent optional collections mean "no data", never an error.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawProduct {
    /// Business identifier.
    pub article_number: String,

    pub category: String,

    /// Unlocalized name, used when no localized entry matches.
    pub name: String,

    /// Unlocalized description, used when no localized entry matches.
    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub localized_names: Option<Vec<LocalizedText>>,

    #[serde(default)]
    pub localized_descriptions: Option<Vec<LocalizedText>>,

    /// Flat price list, used when no renewal periods are declared.
    #[serde(default)]
    pub prices: Option<Vec<CurrencyPrice>>,

    #[serde(default)]
    pub renewal_periods: Option<Vec<RawRenewalPeriod>>,

    #[serde(default)]
    pub taxes: TaxSchedule,

    /// Custom attribute name → value, in document order.
    #[serde(default)]
    pub custom_properties: IndexMap<String, String>,
}

// =============================================================================
// Normalized Product (output)
// =============================================================================

/// One purchasable price of a normalized product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PricingVariant {
    /// Price in the resolved currency and tax display mode.
    #[ts(type = "string")]
    pub price: Money,

    /// `None` for one-off (non-subscription) products.
    pub renewal_period: Option<RenewalPeriod>,
}

/// A custom attribute copied from the raw record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CustomAttribute {
    pub name: String,
    pub value: String,
}

/// A product resolved for one language, currency and tax display mode.
///
/// ## Invariants
/// - `pricing_variants` is never empty
/// - one variant per renewal period, or exactly one without a period
/// - `custom_attributes.len()` equals the raw property count
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedProduct {
    pub article_number: String,
    pub category: String,
    pub name: String,
    pub description: String,
    pub pricing_variants: Vec<PricingVariant>,
    pub custom_attributes: Vec<CustomAttribute>,
}

impl NormalizedProduct {
    /// Returns the first pricing variant (the only one for one-off products).
    pub fn base_variant(&self) -> Option<&PricingVariant> {
        self.pricing_variants.first()
    }

    /// True when the product is sold on renewal periods.
    pub fn is_subscription(&self) -> bool {
        self.pricing_variants
            .iter()
            .any(|variant| variant.renewal_period.is_some())
    }

    /// Looks up a custom attribute value by name (first match).
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.custom_attributes
            .iter()
            .find(|attribute| attribute.name == name)
            .map(|attribute| attribute.value.as_str())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
