//! # storefront-core: Pure Catalog Logic for Storefront
//!
//! This crate holds the catalog's domain types and rules as pure functions
//! with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Storefront Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 storefront-api (axum handlers)                  │   │
//! │  │    /products, /collections ──► DTOs ──► JSON                    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ storefront-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   error   │  │ validation│  │   │
//! │  │   │  Product  │  │   Money   │  │ CoreError │  │   rules   │  │   │
//! │  │   │Collection │  │  TaxRate  │  │           │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 storefront-db (Database Layer)                  │   │
//! │  │              SQLite queries, migrations, repositories           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Collection, TaxRate)
//! - [`money`] - Money type with integer arithmetic
//! - [`error`] - Domain error types
//! - [`validation`] - Field validation rules
//!
//! ## Example Usage
//!
//! ```rust
//! use storefront_core::money::Money;
//! use storefront_core::STANDARD_TAX_RATE;
//!
//! let price = Money::from_decimal_str("10.00").unwrap();
//! assert_eq!(price.with_tax(STANDARD_TAX_RATE).to_string(), "11.00");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError, ValidationErrors};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Tax applied when deriving `price_with_tax` (10%).
pub const STANDARD_TAX_RATE: TaxRate = TaxRate::from_bps(1000);

/// Maximum length of titles and slugs, in characters.
pub const MAX_TITLE_LENGTH: usize = 255;

/// Lowest accepted unit price (0.01).
pub const MIN_UNIT_PRICE: Money = Money::from_cents(1);

/// Highest accepted unit price (9999.99).
pub const MAX_UNIT_PRICE: Money = Money::from_cents(999_999);

/// Product list page size when nothing is configured.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Largest page a client may request through `?limit=`.
pub const MAX_PAGE_SIZE: u32 = 100;
