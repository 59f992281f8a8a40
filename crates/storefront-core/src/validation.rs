//! # Validation Module
//!
//! Input validation rules for catalog records.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: HTTP extractor (axum Json)                                   │
//! │  └── Type validation (deserialization, malformed JSON)                 │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Required fields, lengths, ranges, formats                         │
//! │  └── Normalization (trimmed strings)                                   │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL / CHECK constraints                                      │
//! │  └── Foreign key constraints                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Reference checks (does collection 7 exist?) need the database and live
//! in the API layer; they report through [`ValidationError::DoesNotExist`].
//!
//! ## Usage
//! ```rust
//! use storefront_core::validation::{validate_title, validate_inventory};
//!
//! assert_eq!(validate_title("title", "  Widget ").unwrap(), "Widget");
//! assert!(validate_inventory(-1).is_err());
//! ```

use crate::error::ValidationError;
use crate::money::{Money, ParseMoneyError};
use crate::{MAX_PAGE_SIZE, MAX_TITLE_LENGTH, MAX_UNIT_PRICE, MIN_UNIT_PRICE};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product or collection title.
///
/// ## Rules
/// - Surrounding whitespace is trimmed
/// - Must not be empty
/// - At most 255 characters
///
/// ## Returns
/// The trimmed title.
pub fn validate_title(field: &str, title: &str) -> ValidationResult<String> {
    let title = title.trim();

    if title.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if title.chars().count() > MAX_TITLE_LENGTH {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_TITLE_LENGTH,
        });
    }

    Ok(title.to_string())
}

/// Validates a slug.
///
/// ## Rules
/// - Must not be empty
/// - At most 255 characters
/// - Only letters, numbers, hyphens, and underscores
///
/// ## Example
/// ```rust
/// use storefront_core::validation::validate_slug;
///
/// assert!(validate_slug("coffee-beans").is_ok());
/// assert!(validate_slug("coffee beans").is_err());
/// ```
pub fn validate_slug(slug: &str) -> ValidationResult<String> {
    let slug = slug.trim();

    if slug.is_empty() {
        return Err(ValidationError::Required {
            field: "slug".to_string(),
        });
    }

    if slug.chars().count() > MAX_TITLE_LENGTH {
        return Err(ValidationError::TooLong {
            field: "slug".to_string(),
            max: MAX_TITLE_LENGTH,
        });
    }

    if !slug
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ValidationError::InvalidFormat {
            field: "slug".to_string(),
            reason: "must contain only letters, numbers, hyphens, and underscores".to_string(),
        });
    }

    Ok(slug.to_string())
}

/// Normalizes an optional description: blank text becomes `None`.
pub fn normalize_description(description: Option<&str>) -> Option<String> {
    description
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(str::to_string)
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates an inventory count.
///
/// ## Rules
/// - Must be zero or positive
pub fn validate_inventory(inventory: i64) -> ValidationResult<i64> {
    if inventory < 0 {
        return Err(ValidationError::OutOfRange {
            field: "inventory".to_string(),
            min: "0".to_string(),
            max: i64::MAX.to_string(),
        });
    }

    Ok(inventory)
}

/// Validates a unit price.
///
/// ## Rules
/// - At least 0.01
/// - At most 9999.99
///
/// ## Example
/// ```rust
/// use storefront_core::money::Money;
/// use storefront_core::validation::validate_unit_price;
///
/// assert!(validate_unit_price(Money::from_cents(1)).is_ok());
/// assert!(validate_unit_price(Money::from_cents(0)).is_err());
/// ```
pub fn validate_unit_price(price: Money) -> ValidationResult<Money> {
    if price < MIN_UNIT_PRICE || price > MAX_UNIT_PRICE {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: MIN_UNIT_PRICE.to_string(),
            max: MAX_UNIT_PRICE.to_string(),
        });
    }

    Ok(price)
}

/// Parses and validates a price given as decimal text.
pub fn parse_unit_price(text: &str) -> ValidationResult<Money> {
    let price = Money::from_decimal_str(text).map_err(|e| price_format_error(&e))?;
    validate_unit_price(price)
}

/// Maps a money parse failure onto the `price` field.
pub fn price_format_error(error: &ParseMoneyError) -> ValidationError {
    ValidationError::InvalidFormat {
        field: "price".to_string(),
        reason: error.to_string(),
    }
}

/// Validates a requested page size.
///
/// ## Rules
/// - Between 1 and 100
pub fn validate_page_limit(limit: u32) -> ValidationResult<u32> {
    if limit == 0 || limit > MAX_PAGE_SIZE {
        return Err(ValidationError::OutOfRange {
            field: "limit".to_string(),
            min: "1".to_string(),
            max: MAX_PAGE_SIZE.to_string(),
        });
    }

    Ok(limit)
}

// =============================================================================
// Unit Tests
// =============================================================================
