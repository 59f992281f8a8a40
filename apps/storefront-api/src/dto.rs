//! # Wire Types
//!
//! Request payloads and response bodies, and the mapping between them and
//! the domain records.
//!
//! ## Shapes
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Product (domain)                    ProductDto (wire)                  │
//! │  ───────────────────                 ──────────────────────────────     │
//! │  unit_price: Money(1000)      ──►    "price": "10.00"                   │
//! │  price_with_tax()             ──►    "price_with_tax": "11.00"          │
//! │  collection_id: 3             ──►    "collection": ".../collections/3"  │
//! │                                                                         │
//! │  ProductPayload (wire, all optional)  ──resolve()──►  NewProduct        │
//! │    POST/PUT: missing field → "{field} is required"                     │
//! │    PATCH:    missing field → kept from the stored product              │
//! │    any:      null field    → "{field}: may not be null"                │
//! │              (except description / featured_product, where null clears)│
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use storefront_core::validation::{
    normalize_description, parse_unit_price, validate_inventory, validate_slug, validate_title,
    ValidationResult,
};
use storefront_core::{
    Collection, CollectionSummary, Money, NewCollection, NewProduct, Product, ValidationError,
    ValidationErrors,
};

use crate::config::ApiConfig;

// =============================================================================
// Responses
// =============================================================================

/// A product as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductDto {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub slug: String,
    pub inventory: i64,
    pub price: Money,
    pub price_with_tax: Money,
    /// Hyperlink to the owning collection.
    pub collection: String,
    pub last_update: DateTime<Utc>,
}

impl ProductDto {
    pub fn new(product: Product, config: &ApiConfig) -> Self {
        ProductDto {
            price_with_tax: product.price_with_tax(),
            collection: config.collection_url(product.collection_id),
            id: product.id,
            title: product.title,
            description: product.description,
            slug: product.slug,
            inventory: product.inventory,
            price: product.unit_price,
            last_update: product.last_update,
        }
    }
}

/// A collection as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionDto {
    pub id: i64,
    pub title: String,
    pub featured_product: Option<i64>,
    pub products_count: i64,
}

impl From<CollectionSummary> for CollectionDto {
    fn from(c: CollectionSummary) -> Self {
        CollectionDto {
            id: c.id,
            title: c.title,
            featured_product: c.featured_product_id,
            products_count: c.products_count,
        }
    }
}

/// Plain confirmation body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageBody {
    pub message: String,
}

impl MessageBody {
    pub fn deleted(id: i64, title: &str) -> Self {
        MessageBody {
            message: format!("ID: {} - {}, deleted successfully!", id, title),
        }
    }
}

/// `GET /products` query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub limit: Option<u32>,
}

// =============================================================================
// Payloads
// =============================================================================

/// Distinguishes an absent field (`None`) from an explicit `null`
/// (`Some(None)`).
fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Records a missing required field.
fn missing<T>(errors: &mut ValidationErrors, field: &str) -> Option<T> {
    errors.push(ValidationError::Required {
        field: field.to_string(),
    });
    None
}

/// Resolves one required field of a payload.
///
/// ```text
/// sent value     ──► validate(value)
/// sent null      ──► "{field}: may not be null"
/// absent         ──► stored value (PATCH) or "{field} is required"
/// ```
fn required<T, U>(
    errors: &mut ValidationErrors,
    field: &str,
    sent: Option<Option<T>>,
    stored: Option<U>,
    validate: impl FnOnce(T) -> ValidationResult<U>,
) -> Option<U> {
    match sent {
        Some(Some(value)) => errors.check(validate(value)),
        Some(None) => {
            errors.push(ValidationError::NotAllowed {
                field: field.to_string(),
                reason: "may not be null".to_string(),
            });
            None
        }
        None => match stored {
            Some(value) => Some(value),
            None => missing(errors, field),
        },
    }
}

/// A price as sent by clients: `"10.00"` or `10.0`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum PriceInput {
    Text(String),
    Number(serde_json::Number),
}

impl PriceInput {
    pub fn parse(&self) -> ValidationResult<Money> {
        match self {
            PriceInput::Text(text) => parse_unit_price(text),
            PriceInput::Number(number) => parse_unit_price(&number.to_string()),
        }
    }
}

/// A collection reference: a bare id or a `/collections/{id}` hyperlink.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum CollectionRef {
    Id(i64),
    Link(String),
}

impl CollectionRef {
    pub fn id(&self) -> ValidationResult<i64> {
        let invalid = || ValidationError::InvalidFormat {
            field: "collection".to_string(),
            reason: "expected a collection id or a /collections/{id} URL".to_string(),
        };

        match self {
            CollectionRef::Id(id) => Ok(*id),
            CollectionRef::Link(link) => {
                let link = link.trim().trim_end_matches('/');
                if let Ok(id) = link.parse::<i64>() {
                    return Ok(id);
                }
                let (prefix, id) = link.rsplit_once('/').ok_or_else(invalid)?;
                if !prefix.ends_with("/collections") {
                    return Err(invalid());
                }
                id.parse().map_err(|_| invalid())
            }
        }
    }
}

/// Body of `POST`, `PUT`, and `PATCH /products`.
///
/// `price` is also accepted as `unit_price`. Unknown fields such as
/// `price_with_tax` are ignored, so a fetched product can be sent back.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductPayload {
    #[serde(default, deserialize_with = "double_option")]
    pub title: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub slug: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub inventory: Option<Option<i64>>,
    #[serde(default, alias = "unit_price", deserialize_with = "double_option")]
    pub price: Option<Option<PriceInput>>,
    #[serde(default, deserialize_with = "double_option")]
    pub collection: Option<Option<CollectionRef>>,
}

impl ProductPayload {
    /// Validates the payload into a complete record.
    ///
    /// With `existing`, absent fields keep their stored value (PATCH);
    /// without it, absent required fields are errors (POST, PUT). An
    /// explicit `null` is only accepted for `description`.
    pub fn resolve(self, existing: Option<&Product>) -> Result<NewProduct, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let e = &mut errors;

        let title = required(e, "title", self.title, existing.map(|p| p.title.clone()), |t| {
            validate_title("title", &t)
        });

        let description = match self.description {
            Some(description) => normalize_description(description.as_deref()),
            None => existing.and_then(|p| p.description.clone()),
        };

        let slug = required(e, "slug", self.slug, existing.map(|p| p.slug.clone()), |s| {
            validate_slug(&s)
        });
        let inventory = required(
            e,
            "inventory",
            self.inventory,
            existing.map(|p| p.inventory),
            validate_inventory,
        );
        let unit_price = required(e, "price", self.price, existing.map(|p| p.unit_price), |p| {
            p.parse()
        });
        let collection_id = required(
            e,
            "collection",
            self.collection,
            existing.map(|p| p.collection_id),
            |c| c.id(),
        );

        match (title, slug, inventory, unit_price, collection_id) {
            (Some(title), Some(slug), Some(inventory), Some(unit_price), Some(collection_id)) => {
                errors.finish(NewProduct {
                    title,
                    description,
                    slug,
                    inventory,
                    unit_price,
                    collection_id,
                })
            }
            _ => Err(errors),
        }
    }
}

/// Body of `POST`, `PUT`, and `PATCH /collections`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CollectionPayload {
    #[serde(default, deserialize_with = "double_option")]
    pub title: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub featured_product: Option<Option<i64>>,
}

impl CollectionPayload {
    /// Validates the payload into a complete record; see
    /// [`ProductPayload::resolve`] for how `existing` is used.
    ///
    /// `featured_product` is never required; `null` clears it.
    pub fn resolve(self, existing: Option<&Collection>) -> Result<NewCollection, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let title = required(
            &mut errors,
            "title",
            self.title,
            existing.map(|c| c.title.clone()),
            |t| validate_title("title", &t),
        );

        let featured_product_id = match self.featured_product {
            Some(featured) => featured,
            None => existing.and_then(|c| c.featured_product_id),
        };

        match title {
            Some(title) => errors.finish(NewCollection {
                title,
                featured_product_id,
            }),
            None => Err(errors),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
