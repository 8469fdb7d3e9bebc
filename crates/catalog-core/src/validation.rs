//! # Validation Module
//!
//! Checks applied to preference values and numeric inputs before they are
//! cached by a mapper or used by the price calculator.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Points                                  │
//! │                                                                         │
//! │  Mapper construction                                                    │
//! │  ├── validate_language_tag  (primary tag from language provider)       │
//! │  └── validate_currency_code (code from currency provider)              │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Price calculation                                                      │
//! │  ├── validate_base_price    (no negative prices)                       │
//! │  └── validate_tax_rate      (0% ..= 1000%)                             │
//! │                                                                         │
//! │  Raw product content is NOT validated: identity fields are copied      │
//! │  verbatim, absent collections fall back silently.                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::TaxRate;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Highest accepted tax rate in basis points (1000%).
pub const MAX_TAX_RATE_BPS: u32 = 100_000;

/// Highest accepted rounding scale (decimal places).
pub const MAX_ROUNDING_SCALE: u32 = 10;

// =============================================================================
// String Validators
// =============================================================================

/// Validates an ISO 4217 currency code.
///
/// ## Rules
/// - Must not be blank
/// - Must be exactly three ASCII letters
///
/// Case is not normalized: currency selection compares codes exactly.
///
/// ## Example
/// ```rust
/// use catalog_core::validation::validate_currency_code;
///
/// assert!(validate_currency_code("USD").is_ok());
/// assert!(validate_currency_code("").is_err());
/// assert!(validate_currency_code("US$").is_err());
/// ```
pub fn validate_currency_code(code: &str) -> ValidationResult<()> {
    if code.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "currency".to_string(),
        });
    }

    if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(ValidationError::InvalidFormat {
            field: "currency".to_string(),
            reason: format!("'{code}' is not a three-letter ISO 4217 code"),
        });
    }

    Ok(())
}

/// Validates a primary language subtag.
///
/// ## Rules
/// - Must not be blank
/// - Must contain only ASCII letters (e.g. "en", "EN", "deu")
///
/// ## Example
/// ```rust
/// use catalog_core::validation::validate_language_tag;
///
/// assert!(validate_language_tag("en").is_ok());
/// assert!(validate_language_tag("  ").is_err());
/// assert!(validate_language_tag("en-GB").is_err());
/// ```
pub fn validate_language_tag(tag: &str) -> ValidationResult<()> {
    if tag.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "language".to_string(),
        });
    }

    if !tag.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(ValidationError::InvalidFormat {
            field: "language".to_string(),
            reason: format!("'{tag}' is not a primary language subtag"),
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a base price handed to the price calculator.
pub fn validate_base_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::MustNotBeNegative {
            field: "base price".to_string(),
        });
    }
    Ok(())
}

/// Validates a tax rate.
pub fn validate_tax_rate(rate: TaxRate) -> ValidationResult<()> {
    if rate.bps() > MAX_TAX_RATE_BPS {
        return Err(ValidationError::OutOfRange {
            field: "tax rate (bps)".to_string(),
            min: 0,
            max: i64::from(MAX_TAX_RATE_BPS),
        });
    }
    Ok(())
}

/// Validates the number of decimal places prices are rounded to.
pub fn validate_rounding_scale(scale: u32) -> ValidationResult<()> {
    if scale > MAX_ROUNDING_SCALE {
        return Err(ValidationError::OutOfRange {
            field: "rounding scale".to_string(),
            min: 0,
            max: i64::from(MAX_ROUNDING_SCALE),
        });
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_validate_currency_code() {
        assert!(validate_currency_code("USD").is_ok());
        assert!(validate_currency_code("eur").is_ok());

        assert!(matches!(
            validate_currency_code("   "),
            Err(ValidationError::Required { .. })
        ));
        assert!(matches!(
            validate_currency_code("USDT"),
            Err(ValidationError::InvalidFormat { .. })
        ));
        assert!(matches!(
            validate_currency_code("U1D"),
            Err(ValidationError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn test_validate_language_tag() {
        assert!(validate_language_tag("en").is_ok());
        assert!(validate_language_tag("EN").is_ok());
        assert!(matches!(
            validate_language_tag(""),
            Err(ValidationError::Required { .. })
        ));
        assert!(matches!(
            validate_language_tag("e1"),
            Err(ValidationError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn test_validate_base_price() {
        assert!(validate_base_price(Money::zero()).is_ok());
        assert!(validate_base_price(Money::new(dec!(9.99))).is_ok());
        assert!(validate_base_price(Money::new(dec!(-0.01))).is_err());
    }

    #[test]
    fn test_validate_tax_rate() {
        assert!(validate_tax_rate(TaxRate::from_bps(0)).is_ok());
        assert!(validate_tax_rate(TaxRate::from_bps(MAX_TAX_RATE_BPS)).is_ok());
        assert!(validate_tax_rate(TaxRate::from_bps(MAX_TAX_RATE_BPS + 1)).is_err());
    }

    #[test]
    fn test_validate_rounding_scale() {
        assert!(validate_rounding_scale(2).is_ok());
        assert!(validate_rounding_scale(0).is_ok());
        assert!(validate_rounding_scale(11).is_err());
    }
}
