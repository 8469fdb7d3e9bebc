//! # Error Types
//!
//! Domain-specific error types for catalog-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  catalog-core errors (this file)                                       │
//! │  ├── CoreError        - Configuration and pricing failures             │
//! │  └── ValidationError  - Field-level input checks                       │
//! │                                                                         │
//! │  config errors (config.rs)                                             │
//! │  └── ConfigError      - Unparsable environment values                  │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → caller (retry / log / message)    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (article number, currency, period)
//! 3. Errors are enum variants, never String
//! 4. Nothing in this crate logs an error it returns

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core mapping errors.
///
/// There are exactly two operational categories:
/// - configuration problems, detected when a mapper or calculator is built
///   or when a calculation receives an impossible input;
/// - data problems, detected while mapping one raw product.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A required argument is missing or unusable.
    ///
    /// ## When This Occurs
    /// - A preference provider was not supplied to the builder
    /// - A provider returned a blank language tag or currency code
    /// - A base price handed to the price calculator is negative
    #[error("Invalid argument `{argument}`: {reason}")]
    InvalidArgument { argument: String, reason: String },

    /// No price entry matches the resolved currency.
    ///
    /// ## User Workflow
    /// ```text
    /// Resolved currency: USD
    ///      │
    ///      ▼
    /// Raw price list: [EUR 10.00]
    ///      │
    ///      ▼
    /// PriceNotFound { currency: "USD", article_number: "ART-1", .. }
    ///      │
    ///      ▼
    /// Storefront shows: "Pricing unavailable for USD"
    /// ```
    #[error("No price for currency {currency} on product {article_number}{}", period_suffix(.renewal_period))]
    PriceNotFound {
        currency: String,
        article_number: String,
        /// Display form of the renewal period whose list was searched, if any.
        renewal_period: Option<String>,
    },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

fn period_suffix(period: &Option<String>) -> String {
    match period {
        Some(period) => format!(" (renewal period {period})"),
        None => String::new(),
    }
}

impl CoreError {
    /// Shorthand for [`CoreError::InvalidArgument`].
    pub fn invalid_argument(argument: impl Into<String>, reason: impl Into<String>) -> Self {
        CoreError::InvalidArgument {
            argument: argument.into(),
            reason: reason.into(),
        }
    }

    /// True when the product cannot be priced in the requested currency.
    ///
    /// Integrators use this to show "pricing unavailable for requested
    /// currency" instead of a generic failure.
    pub fn is_pricing_unavailable(&self) -> bool {
        matches!(self, CoreError::PriceNotFound { .. })
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Used for early checks on configuration values and numeric inputs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    MustNotBeNegative { field: String },

    /// Invalid format (e.g., a currency code that is not three letters).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
