//! # Storage Errors
//!
//! `DbError` classifies what went wrong below the repository layer so the
//! HTTP layer can pick a status without looking at SQL text.
//!
//! ## Classification
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  sqlx::Error                          DbError                           │
//! │  ───────────────────────────────────  ──────────────────────────────    │
//! │  Database(kind = ForeignKeyViolation) ForeignKeyViolation  (caller's    │
//! │                                                             fault)      │
//! │  Database(anything else)              QueryFailed                       │
//! │  PoolTimedOut                         PoolExhausted                     │
//! │  PoolClosed                           ConnectionFailed                  │
//! │  everything else                      Internal             (server's    │
//! │                                                             fault)      │
//! │                                                                         │
//! │  Raised by repositories directly:     NotFound, HasDependents           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use sqlx::error::ErrorKind;
use thiserror::Error;

/// Failure of a storage operation.
#[derive(Debug, Error)]
pub enum DbError {
    /// No row with this id.
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: i64 },

    /// Delete refused while other rows still point at the record.
    ///
    /// `label` is the human-readable name of the record (a collection's
    /// title) so callers can build a message without a second query.
    #[error("{entity} {id} ({label}) is referenced by {dependents} record(s)")]
    HasDependents {
        entity: String,
        id: i64,
        label: String,
        dependents: i64,
    },

    /// A write named a parent row that is not there.
    #[error("Foreign key violation: {message}")]
    ForeignKeyViolation { message: String },

    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    /// SQLite rejected the statement for a reason other than a foreign key.
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// `BEGIN` or `COMMIT` failed.
    #[error("Transaction failed: {0}")]
    TransactionFailed(String),

    #[error("Connection pool exhausted")]
    PoolExhausted,

    #[error("Internal database error: {0}")]
    Internal(String),
}

impl DbError {
    pub fn not_found(entity: impl Into<String>, id: i64) -> Self {
        DbError::NotFound {
            entity: entity.into(),
            id,
        }
    }

    /// For `map_err` on `pool.begin()` and `tx.commit()`.
    pub fn transaction(err: sqlx::Error) -> Self {
        DbError::TransactionFailed(err.to_string())
    }

    /// True when the failure is the caller's input rather than the server.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            DbError::NotFound { .. }
                | DbError::HasDependents { .. }
                | DbError::ForeignKeyViolation { .. }
        )
    }
}

impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db_err) => match db_err.kind() {
                ErrorKind::ForeignKeyViolation => DbError::ForeignKeyViolation {
                    message: db_err.message().to_string(),
                },
                _ => DbError::QueryFailed(db_err.message().to_string()),
            },
            sqlx::Error::PoolTimedOut => DbError::PoolExhausted,
            sqlx::Error::PoolClosed => DbError::ConnectionFailed("pool is closed".to_string()),
            other => DbError::Internal(other.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for DbError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        DbError::MigrationFailed(err.to_string())
    }
}

/// Result alias used by every repository method.
pub type DbResult<T> = Result<T, DbError>;
