//! # Schema Migrations
//!
//! The catalog schema lives in `migrations/sqlite/` at the workspace root and
//! is compiled into the binary.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Database::new ──► run_migrations(pool)                                 │
//! │                          │                                              │
//! │                          ▼                                              │
//! │            _sqlx_migrations lists what already ran                      │
//! │                          │                                              │
//! │                          ▼                                              │
//! │            001_catalog.sql   collections, products, indexes             │
//! │            00N_*.sql         applied in file order, each once           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Schema changes go in a new `NNN_description.sql` file. Applied files are
//! checksummed, so editing one breaks every existing database.

use sqlx::SqlitePool;
use tracing::info;

use crate::error::DbResult;

static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("../../migrations/sqlite");

/// Applies every migration the database hasn't seen yet.
pub async fn run_migrations(pool: &SqlitePool) -> DbResult<()> {
    info!(
        available = MIGRATOR.migrations.len(),
        "Applying pending migrations"
    );

    MIGRATOR.run(pool).await?;

    Ok(())
}

/// Returns `(known, applied)` migration counts.
pub async fn migration_status(pool: &SqlitePool) -> DbResult<(usize, usize)> {
    let known = MIGRATOR.migrations.len();

    let applied: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM _sqlx_migrations")
        .fetch_one(pool)
        .await?;

    Ok((known, applied as usize))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Database, DbConfig};

    #[tokio::test]
    async fn test_fresh_database_is_fully_migrated() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let (known, applied) = migration_status(db.pool()).await.unwrap();
        assert!(known > 0);
        assert_eq!(known, applied);
    }

    #[tokio::test]
    async fn test_rerun_is_a_no_op() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        db.run_migrations().await.unwrap();
        let (known, applied) = migration_status(db.pool()).await.unwrap();
        assert_eq!(known, applied);
    }

    #[tokio::test]
    async fn test_catalog_tables_exist() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let tables: Vec<String> = sqlx::query_scalar(
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name IN ('products', 'collections') ORDER BY name",
        )
        .fetch_all(db.pool())
        .await
        .unwrap();
        assert_eq!(tables, vec!["collections", "products"]);
    }
}
