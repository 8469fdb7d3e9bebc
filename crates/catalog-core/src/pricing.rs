//! # Price Calculator
//!
//! Turns a base price plus a product's tax schedule into the price the
//! storefront displays.
//!
//! ## Decision Table
//! ```text
//! ┌──────────────────────┬──────────────────────┬──────────────────────────┐
//! │ Source price basis   │ Display mode         │ Result                   │
//! ├──────────────────────┼──────────────────────┼──────────────────────────┤
//! │ Exclusive            │ Exclusive            │ base (unchanged)         │
//! │ Inclusive            │ Inclusive            │ base (unchanged)         │
//! │ Exclusive            │ Inclusive            │ base + Σ taxes           │
//! │ Inclusive            │ Exclusive            │ base ÷ gross factor      │
//! └──────────────────────┴──────────────────────┴──────────────────────────┘
//! ```
//!
//! ## Aggregation
//! Entries apply in list order. A `Compound` entry is computed on the
//! running total (base plus every earlier tax), an `Additive` entry on the
//! untaxed base:
//! ```text
//! base 100.00, [VAT 10% compound, Levy 5% compound]
//!   VAT  = 100.00 × 10%          = 10.00
//!   Levy = (100.00 + 10.00) × 5% =  5.50   → 115.50
//!
//! base 100.00, [VAT 10% additive, Levy 5% additive]
//!   VAT  = 100.00 × 10% = 10.00
//!   Levy = 100.00 ×  5% =  5.00            → 115.00
//! ```

use rust_decimal::Decimal;
use tracing::trace;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{TaxKind, TaxMode, TaxSchedule};
use crate::validation::{validate_base_price, validate_rounding_scale, validate_tax_rate};

/// Computes a display price from a base price and a tax schedule.
pub trait PriceCalculator {
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidArgument`] for a negative base price, an
    /// out-of-range tax rate, or a result outside the decimal range.
    fn calculate_price(&self, base_price: Money, taxes: &TaxSchedule) -> CoreResult<Money>;
}

/// The default [`PriceCalculator`], driven by the tax display preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaxCalculator {
    display: TaxMode,
    rounding_scale: u32,
}

impl TaxCalculator {
    /// Creates a calculator rounding derived amounts to two places.
    pub fn new(display: TaxMode) -> Self {
        TaxCalculator {
            display,
            rounding_scale: crate::DEFAULT_ROUNDING_SCALE,
        }
    }

    /// Overrides the rounding scale (e.g. 0 for JPY, 3 for KWD).
    pub fn with_rounding_scale(self, rounding_scale: u32) -> CoreResult<Self> {
        validate_rounding_scale(rounding_scale)
            .map_err(|e| CoreError::invalid_argument("rounding_scale", e.to_string()))?;
        Ok(TaxCalculator {
            rounding_scale,
            ..self
        })
    }

    /// Total tax owed on a tax-exclusive `base`, each entry rounded.
    fn tax_on(&self, base: Money, taxes: &TaxSchedule) -> CoreResult<Money> {
        let mut total = Money::zero();
        for entry in &taxes.entries {
            let basis = match entry.kind {
                TaxKind::Compound => base.checked_add(total).ok_or_else(overflow)?,
                TaxKind::Additive => base,
            };
            let tax = basis
                .calculate_tax(entry.rate_bps, self.rounding_scale)
                .ok_or_else(overflow)?;
            total = total.checked_add(tax).ok_or_else(overflow)?;
        }
        Ok(total)
    }

    /// Gross amount of one unit of net price, unrounded.
    fn gross_factor(taxes: &TaxSchedule) -> CoreResult<Decimal> {
        let mut total = Decimal::ZERO;
        for entry in &taxes.entries {
            let basis = match entry.kind {
                TaxKind::Compound => Decimal::ONE.checked_add(total).ok_or_else(overflow)?,
                TaxKind::Additive => Decimal::ONE,
            };
            let share = basis
                .checked_mul(entry.rate_bps.as_fraction())
                .ok_or_else(overflow)?;
            total = total.checked_add(share).ok_or_else(overflow)?;
        }
        Decimal::ONE.checked_add(total).ok_or_else(overflow)
    }
}

fn overflow() -> CoreError {
    CoreError::invalid_argument("taxes", "price overflow")
}

impl PriceCalculator for TaxCalculator {
    fn calculate_price(&self, base_price: Money, taxes: &TaxSchedule) -> CoreResult<Money> {
        validate_base_price(base_price)
            .map_err(|e| CoreError::invalid_argument("base_price", e.to_string()))?;
        for entry in &taxes.entries {
            validate_tax_rate(entry.rate_bps)
                .map_err(|e| CoreError::invalid_argument("tax_rate", e.to_string()))?;
        }

        if taxes.is_empty() || taxes.price_basis == self.display {
            return Ok(base_price);
        }

        let price = match self.display {
            TaxMode::Inclusive => base_price
                .checked_add(self.tax_on(base_price, taxes)?)
                .ok_or_else(overflow)?,
            TaxMode::Exclusive => base_price
                .divide_by(Self::gross_factor(taxes)?, self.rounding_scale)
                .ok_or_else(|| CoreError::invalid_argument("taxes", "gross factor is zero"))?,
        };

        trace!(
            base = %base_price,
            %price,
            entries = taxes.entries.len(),
            display = ?self.display,
            "Price calculated"
        );

        Ok(price)
    }
}

impl<C: PriceCalculator + ?Sized> PriceCalculator for &C {
    fn calculate_price(&self, base_price: Money, taxes: &TaxSchedule) -> CoreResult<Money> {
        (**self).calculate_price(base_price, taxes)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
