//! # Collection Repository
//!
//! Database operations for collections.
//!
//! ## Key Operations
//! - Listing with live product counts
//! - CRUD operations
//! - Guarded delete that refuses while products remain
//!
//! ## Guarded Delete
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    delete_if_empty(id)                                  │
//! │                                                                         │
//! │  BEGIN                                                                  │
//! │    │                                                                    │
//! │    ▼                                                                    │
//! │  SELECT collection + COUNT(products) ──► none?  ──► NotFound           │
//! │    │                                                                    │
//! │    ▼                                                                    │
//! │  products_count > 0 ? ─────────────────► yes    ──► HasDependents      │
//! │    │ no                                                                 │
//! │    ▼                                                                    │
//! │  DELETE ... RETURNING ─── FK RESTRICT fires ───► HasDependents         │
//! │    │                     (product added meanwhile)                      │
//! │    ▼                                                                    │
//! │  COMMIT ──► Collection                                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use sqlx::SqlitePool;
use tracing::{debug, warn};

use crate::error::{DbError, DbResult};
use storefront_core::{Collection, CollectionSummary, NewCollection};

/// Repository for collection database operations.
#[derive(Debug, Clone)]
pub struct CollectionRepository {
    pool: SqlitePool,
}

impl CollectionRepository {
    /// Creates a new CollectionRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CollectionRepository { pool }
    }

    /// Lists every collection with its product count, ordered by id.
    pub async fn list_with_counts(&self) -> DbResult<Vec<CollectionSummary>> {
        let collections = sqlx::query_as::<_, CollectionSummary>(
            r#"
            SELECT
                c.id,
                c.title,
                c.featured_product_id,
                COUNT(p.id) AS products_count
            FROM collections c
            LEFT JOIN products p ON p.collection_id = c.id
            GROUP BY c.id
            ORDER BY c.id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        debug!(count = collections.len(), "Listed collections");
        Ok(collections)
    }

    /// Gets one collection with its product count.
    pub async fn get_with_count(&self, id: i64) -> DbResult<Option<CollectionSummary>> {
        let collection = sqlx::query_as::<_, CollectionSummary>(
            r#"
            SELECT
                c.id,
                c.title,
                c.featured_product_id,
                COUNT(p.id) AS products_count
            FROM collections c
            LEFT JOIN products p ON p.collection_id = c.id
            WHERE c.id = ?1
            GROUP BY c.id
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(collection)
    }

    /// Gets a collection by its ID.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Collection>> {
        let collection = sqlx::query_as::<_, Collection>(
            "SELECT id, title, featured_product_id FROM collections WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(collection)
    }

    /// Whether a collection with this id exists.
    pub async fn exists(&self, id: i64) -> DbResult<bool> {
        let found: Option<i64> = sqlx::query_scalar("SELECT id FROM collections WHERE id = ?1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(found.is_some())
    }

    /// Inserts a new collection.
    pub async fn insert(&self, collection: &NewCollection) -> DbResult<Collection> {
        debug!(title = %collection.title, "Inserting collection");

        let stored = sqlx::query_as::<_, Collection>(
            r#"
            INSERT INTO collections (title, featured_product_id)
            VALUES (?1, ?2)
            RETURNING id, title, featured_product_id
            "#,
        )
        .bind(&collection.title)
        .bind(collection.featured_product_id)
        .fetch_one(&self.pool)
        .await?;

        debug!(id = stored.id, "Collection inserted");
        Ok(stored)
    }

    /// Replaces the writable fields of a collection.
    ///
    /// ## Returns
    /// * `Ok(Collection)` - Updated row
    /// * `Err(DbError::NotFound)` - Collection doesn't exist
    /// * `Err(DbError::ForeignKeyViolation)` - featured product doesn't exist
    pub async fn update(&self, id: i64, collection: &NewCollection) -> DbResult<Collection> {
        debug!(id = id, "Updating collection");

        let updated = sqlx::query_as::<_, Collection>(
            r#"
            UPDATE collections SET
                title = ?2,
                featured_product_id = ?3
            WHERE id = ?1
            RETURNING id, title, featured_product_id
            "#,
        )
        .bind(id)
        .bind(&collection.title)
        .bind(collection.featured_product_id)
        .fetch_optional(&self.pool)
        .await?;

        updated.ok_or_else(|| DbError::not_found("Collection", id))
    }

    /// Deletes a collection only if no product references it.
    ///
    /// The count check and the delete share one transaction, and the
    /// schema's `ON DELETE RESTRICT` rejects the delete if a product
    /// slipped in between.
    ///
    /// ## Returns
    /// * `Ok(Collection)` - The deleted collection
    /// * `Err(DbError::NotFound)` - Collection doesn't exist
    /// * `Err(DbError::HasDependents)` - Products still reference it
    pub async fn delete_if_empty(&self, id: i64) -> DbResult<Collection> {
        debug!(id = id, "Deleting collection");

        let mut tx = self.pool.begin().await.map_err(DbError::transaction)?;

        let summary = sqlx::query_as::<_, CollectionSummary>(
            r#"
            SELECT
                c.id,
                c.title,
                c.featured_product_id,
                COUNT(p.id) AS products_count
            FROM collections c
            LEFT JOIN products p ON p.collection_id = c.id
            WHERE c.id = ?1
            GROUP BY c.id
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| DbError::not_found("Collection", id))?;

        if summary.has_products() {
            debug!(
                id = id,
                products = summary.products_count,
                "Collection still has products"
            );
            return Err(DbError::HasDependents {
                entity: "Collection".to_string(),
                id,
                label: summary.title,
                dependents: summary.products_count,
            });
        }

        let deleted = sqlx::query_as::<_, Collection>(
            "DELETE FROM collections WHERE id = ?1 RETURNING id, title, featured_product_id",
        )
        .bind(id)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| match DbError::from(e) {
            DbError::ForeignKeyViolation { message } => {
                warn!(id = id, %message, "Product added during collection delete");
                DbError::HasDependents {
                    entity: "Collection".to_string(),
                    id,
                    label: summary.title.clone(),
                    dependents: 1,
                }
            }
            other => other,
        })?;

        tx.commit().await.map_err(DbError::transaction)?;

        debug!(id = id, "Collection deleted");
        Ok(deleted)
    }

    /// Counts total collections (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM collections")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
