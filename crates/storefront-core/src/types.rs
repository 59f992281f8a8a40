//! # Domain Types
//!
//! Core domain types used throughout Storefront.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────────┐          ┌─────────────────────────┐          │
//! │  │      Collection     │ 1      * │        Product          │          │
//! │  │  ─────────────────  │◄─────────│  ─────────────────────  │          │
//! │  │  id (i64)           │          │  id (i64)               │          │
//! │  │  title              │          │  title, slug            │          │
//! │  │  featured_product ──┼─────────►│  unit_price (Money)     │          │
//! │  └─────────────────────┘ 0..1     │  inventory              │          │
//! │                                   │  collection_id (FK)     │          │
//! │  ┌─────────────────────┐          └─────────────────────────┘          │
//! │  │  CollectionSummary  │                                               │
//! │  │  Collection +       │   products_count is derived (COUNT),         │
//! │  │  products_count     │   never stored                               │
//! │  └─────────────────────┘                                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//! Ids are integers assigned by the store on insert. `NewProduct` and
//! `NewCollection` are the validated, id-less shapes handed to the
//! repositories for inserts and full updates.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::STANDARD_TAX_RATE;

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 1000 bps = 10%
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
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
}

impl Default for TaxRate {
    fn default() -> Self {
        STANDARD_TAX_RATE
    }
}

// =============================================================================
// Product
// =============================================================================

/// A sellable item belonging to exactly one collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Product {
    /// Store-assigned identifier.
    pub id: i64,

    /// Display name, at most 255 characters.
    pub title: String,

    /// Free-form description.
    pub description: Option<String>,

    /// URL-friendly identifier.
    pub slug: String,

    /// Units on hand, never negative.
    pub inventory: i64,

    /// Price before tax.
    #[cfg_attr(feature = "sqlx", sqlx(rename = "unit_price_cents"))]
    #[ts(type = "string")]
    pub unit_price: Money,

    /// The owning collection.
    pub collection_id: i64,

    /// When the product was last written.
    #[ts(as = "String")]
    pub last_update: DateTime<Utc>,
}

impl Product {
    /// Returns the unit price with the standard tax rate applied.
    ///
    /// Derived on every call; the value is never persisted.
    #[inline]
    pub fn price_with_tax(&self) -> Money {
        self.unit_price.with_tax(STANDARD_TAX_RATE)
    }
}

/// Validated product fields without an id (insert / full update input).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NewProduct {
    pub title: String,
    pub description: Option<String>,
    pub slug: String,
    pub inventory: i64,
    #[ts(type = "string")]
    pub unit_price: Money,
    pub collection_id: i64,
}

impl From<Product> for NewProduct {
    fn from(p: Product) -> Self {
        NewProduct {
            title: p.title,
            description: p.description,
            slug: p.slug,
            inventory: p.inventory,
            unit_price: p.unit_price,
            collection_id: p.collection_id,
        }
    }
}

// =============================================================================
// Collection
// =============================================================================

/// A named grouping of products.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Collection {
    /// Store-assigned identifier.
    pub id: i64,

    /// Display name, at most 255 characters.
    pub title: String,

    /// Optional product highlighted for this collection.
    pub featured_product_id: Option<i64>,
}

/// A collection annotated with the live number of products referencing it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct CollectionSummary {
    pub id: i64,
    pub title: String,
    pub featured_product_id: Option<i64>,
    /// Computed by the query, never stored.
    pub products_count: i64,
}

impl CollectionSummary {
    /// Returns the collection without its aggregate.
    pub fn collection(&self) -> Collection {
        Collection {
            id: self.id,
            title: self.title.clone(),
            featured_product_id: self.featured_product_id,
        }
    }

    /// Whether any product still references this collection.
    #[inline]
    pub fn has_products(&self) -> bool {
        self.products_count > 0
    }
}

/// Validated collection fields without an id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NewCollection {
    pub title: String,
    pub featured_product_id: Option<i64>,
}

impl From<Collection> for NewCollection {
    fn from(c: Collection) -> Self {
        NewCollection {
            title: c.title,
            featured_product_id: c.featured_product_id,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn widget(unit_price_cents: i64) -> Product {
        Product {
            id: 1,
            title: "Widget".to_string(),
            description: None,
            slug: "widget".to_string(),
            inventory: 3,
            unit_price: Money::from_cents(unit_price_cents),
            collection_id: 1,
            last_update: Utc::now(),
        }
    }

    #[test]
    fn test_tax_rate_from_bps() {
        let rate = TaxRate::from_bps(1000);
        assert_eq!(rate.bps(), 1000);
    }

    #[test]
    fn test_default_tax_rate_is_standard() {
        assert_eq!(TaxRate::default(), STANDARD_TAX_RATE);
    }

    #[test]
    fn test_price_with_tax() {
        assert_eq!(widget(1000).price_with_tax().to_string(), "11.00");
        assert_eq!(widget(1).price_with_tax().to_string(), "0.01");
        assert_eq!(widget(1005).price_with_tax().to_string(), "11.06");
    }

    #[test]
    fn test_summary_has_products() {
        let mut summary = CollectionSummary {
            id: 4,
            title: "Beauty".to_string(),
            featured_product_id: None,
            products_count: 0,
        };
        assert!(!summary.has_products());

        summary.products_count = 2;
        assert!(summary.has_products());
        assert_eq!(summary.collection().title, "Beauty");
    }

    #[test]
    fn test_new_product_from_product() {
        let new = NewProduct::from(widget(250));
        assert_eq!(new.title, "Widget");
        assert_eq!(new.unit_price.cents(), 250);
        assert_eq!(new.collection_id, 1);
    }
}
