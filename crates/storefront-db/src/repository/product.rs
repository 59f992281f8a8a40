//! # Product Repository
//!
//! Database operations for products.
//!
//! ## Key Operations
//! - Newest-first listing with a page-size limit
//! - CRUD operations returning the stored row
//! - Per-collection counts
//!
//! ## Write Path
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    How a Product Write Works                            │
//! │                                                                         │
//! │  NewProduct (validated in the API layer)                               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  INSERT / UPDATE ... RETURNING <columns>                               │
//! │       │         last_update = now                                      │
//! │       │         unit_price stored as INTEGER cents                     │
//! │       ▼                                                                 │
//! │  Product (exactly what the database holds)                             │
//! │                                                                         │
//! │  FK collection_id → collections(id) rejects dangling references        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use storefront_core::{NewProduct, Product};

/// Repository for product database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = ProductRepository::new(pool);
///
/// let newest = repo.list(Some(10)).await?;
/// let product = repo.get_by_id(7).await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Lists products, newest first.
    ///
    /// ## Arguments
    /// * `limit` - Maximum rows to return; `None` returns every product
    pub async fn list(&self, limit: Option<u32>) -> DbResult<Vec<Product>> {
        // SQLite treats a negative LIMIT as "no limit"
        let limit: i64 = limit.map(i64::from).unwrap_or(-1);

        debug!(limit = %limit, "Listing products");

        let products = sqlx::query_as::<_, Product>(
            r#"
            SELECT
                id,
                title,
                description,
                slug,
                inventory,
                unit_price_cents,
                collection_id,
                last_update
            FROM products
            ORDER BY id DESC
            LIMIT ?1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        debug!(count = products.len(), "Listed products");
        Ok(products)
    }

    /// Gets a product by its ID.
    ///
    /// ## Returns
    /// * `Ok(Some(Product))` - Product found
    /// * `Ok(None)` - Product not found
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            SELECT
                id,
                title,
                description,
                slug,
                inventory,
                unit_price_cents,
                collection_id,
                last_update
            FROM products
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    /// Inserts a new product.
    ///
    /// ## Returns
    /// * `Ok(Product)` - Stored product with its generated id
    /// * `Err(DbError::ForeignKeyViolation)` - collection doesn't exist
    pub async fn insert(&self, product: &NewProduct) -> DbResult<Product> {
        debug!(
            title = %product.title,
            collection_id = product.collection_id,
            "Inserting product"
        );

        let now = Utc::now();

        let stored = sqlx::query_as::<_, Product>(
            r#"
            INSERT INTO products (
                title, description, slug, inventory,
                unit_price_cents, collection_id, last_update
            ) VALUES (
                ?1, ?2, ?3, ?4,
                ?5, ?6, ?7
            )
            RETURNING
                id,
                title,
                description,
                slug,
                inventory,
                unit_price_cents,
                collection_id,
                last_update
            "#,
        )
        .bind(&product.title)
        .bind(&product.description)
        .bind(&product.slug)
        .bind(product.inventory)
        .bind(product.unit_price.cents())
        .bind(product.collection_id)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        debug!(id = stored.id, "Product inserted");
        Ok(stored)
    }

    /// Replaces every writable field of an existing product.
    ///
    /// Partial updates are merged into a full `NewProduct` by the caller.
    /// When the product moves to another collection, any collection still
    /// featuring it loses the reference in the same transaction.
    ///
    /// ## Returns
    /// * `Ok(Product)` - Updated row
    /// * `Err(DbError::NotFound)` - Product doesn't exist
    /// * `Err(DbError::ForeignKeyViolation)` - collection doesn't exist
    pub async fn update(&self, id: i64, product: &NewProduct) -> DbResult<Product> {
        debug!(id = id, collection_id = product.collection_id, "Updating product");

        let now = Utc::now();
        let mut tx = self.pool.begin().await.map_err(DbError::transaction)?;

        let updated = sqlx::query_as::<_, Product>(
            r#"
            UPDATE products SET
                title = ?2,
                description = ?3,
                slug = ?4,
                inventory = ?5,
                unit_price_cents = ?6,
                collection_id = ?7,
                last_update = ?8
            WHERE id = ?1
            RETURNING
                id,
                title,
                description,
                slug,
                inventory,
                unit_price_cents,
                collection_id,
                last_update
            "#,
        )
        .bind(id)
        .bind(&product.title)
        .bind(&product.description)
        .bind(&product.slug)
        .bind(product.inventory)
        .bind(product.unit_price.cents())
        .bind(product.collection_id)
        .bind(now)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| DbError::not_found("Product", id))?;

        let cleared = sqlx::query(
            r#"
            UPDATE collections
            SET featured_product_id = NULL
            WHERE featured_product_id = ?1 AND id != ?2
            "#,
        )
        .bind(id)
        .bind(updated.collection_id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        tx.commit().await.map_err(DbError::transaction)?;

        if cleared > 0 {
            debug!(id = id, cleared = cleared, "Cleared stale featured references");
        }

        Ok(updated)
    }

    /// Deletes a product and returns the removed row.
    ///
    /// A collection featuring this product has its featured reference
    /// cleared by the schema (`ON DELETE SET NULL`).
    ///
    /// ## Returns
    /// * `Ok(Product)` - The deleted product (for confirmation messages)
    /// * `Err(DbError::NotFound)` - Product doesn't exist
    pub async fn delete(&self, id: i64) -> DbResult<Product> {
        debug!(id = id, "Deleting product");

        let deleted = sqlx::query_as::<_, Product>(
            r#"
            DELETE FROM products
            WHERE id = ?1
            RETURNING
                id,
                title,
                description,
                slug,
                inventory,
                unit_price_cents,
                collection_id,
                last_update
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        deleted.ok_or_else(|| DbError::not_found("Product", id))
    }

    /// Counts total products.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
