//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Decimal Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  The billing service sends prices as base-10 decimals ("19.99") in     │
//! │  many currencies with different minor units.                            │
//! │                                                                         │
//! │  OUR SOLUTION: rust_decimal                                             │
//! │    Exact base-10 arithmetic, rounding only where tax is derived        │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `Money` carries no currency. The mapper only ever selects among prices
//! already denominated in the resolved currency, so every `Money` flowing
//! through one mapping shares that currency implicitly.
//!
//! ## Usage
//! ```rust
//! use catalog_core::money::Money;
//! use rust_decimal::Decimal;
//!
//! let price = Money::new(Decimal::new(1099, 2)); // 10.99
//! let total = price.checked_add(Money::new(Decimal::new(500, 2))).unwrap();
//! assert_eq!(total.to_string(), "15.99");
//!
//! // Arithmetic past the decimal range yields None instead of panicking.
//! assert!(Money::new(Decimal::MAX).checked_add(price).is_none());
//! ```

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::TaxRate;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary amount in a currency's major unit (e.g. dollars, euros).
///
/// ## Design Decisions
/// - **Decimal**: exact representation of whatever scale the source used
/// - **Single field tuple struct**: zero-cost wrapper
/// - **serde transparent**: serializes as the decimal string "10.99"
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    /// Wraps a decimal amount.
    #[inline]
    pub const fn new(amount: Decimal) -> Self {
        Money(amount)
    }

    /// Returns the underlying decimal amount.
    #[inline]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(Decimal::ZERO)
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }

    /// Rounds to `scale` decimal places using Bankers Rounding.
    ///
    /// ## Bankers Rounding Explained
    /// ```text
    /// ┌─────────────────────────────────────────────────────────────────────┐
    /// │  BANKERS ROUNDING (Round Half to Even)                              │
    /// │                                                                     │
    /// │  Standard rounding always rounds 0.5 UP, causing systematic bias:  │
    /// │    0.5 → 1, 1.5 → 2, 2.5 → 3, 3.5 → 4 (always up = +bias)         │
    /// │                                                                     │
    /// │  Bankers Rounding rounds 0.5 to nearest EVEN number:               │
    /// │    0.5 → 0, 1.5 → 2, 2.5 → 2, 3.5 → 4 (alternates = no bias)      │
    /// └─────────────────────────────────────────────────────────────────────┘
    /// ```
    pub fn round(&self, scale: u32) -> Money {
        Money(
            self.0
                .round_dp_with_strategy(scale, RoundingStrategy::MidpointNearestEven),
        )
    }

    /// Adds two amounts, `None` on overflow.
    #[inline]
    pub fn checked_add(&self, other: Money) -> Option<Money> {
        self.0.checked_add(other.0).map(Money)
    }

    /// Calculates the tax owed on this amount, rounded to `scale` places.
    ///
    /// Returns `None` when the product leaves the decimal range.
    ///
    /// ## Example
    /// ```rust
    /// use catalog_core::money::Money;
    /// use catalog_core::types::TaxRate;
    /// use rust_decimal::Decimal;
    ///
    /// let price = Money::new(Decimal::new(1000, 2)); // 10.00
    /// let rate = TaxRate::from_bps(825);             // 8.25%
    ///
    /// // 10.00 × 8.25% = 0.825 → half-even → 0.82
    /// assert_eq!(price.calculate_tax(rate, 2).unwrap().to_string(), "0.82");
    /// ```
    pub fn calculate_tax(&self, rate: TaxRate, scale: u32) -> Option<Money> {
        self.0
            .checked_mul(rate.as_fraction())
            .map(|tax| Money(tax).round(scale))
    }

    /// Divides this amount by a factor, rounded to `scale` places.
    ///
    /// Returns `None` for a zero factor.
    pub fn divide_by(&self, factor: Decimal, scale: u32) -> Option<Money> {
        self.0.checked_div(factor).map(|net| Money(net).round(scale))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Plain decimal display, no currency symbol.
///
/// Currency formatting belongs to the storefront, which knows the locale.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl From<Decimal> for Money {
    fn from(amount: Decimal) -> Self {
        Money(amount)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
