//! # Storefront API
//!
//! JSON-over-HTTP catalog of products and the collections grouping them.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Storefront API                                  │
//! │                                                                         │
//! │  ┌────────────────┐  ┌────────────────┐  ┌────────────────────────────┐│
//! │  │  /products     │  │  /collections  │  │  /health                   ││
//! │  │                │  │                │  │                            ││
//! │  │ • list (paged) │  │ • list + count │  │ • liveness                 ││
//! │  │ • CRUD         │  │ • CRUD         │  │ • DB ping                  ││
//! │  │ • price w/ tax │  │ • guarded del. │  │                            ││
//! │  └───────┬────────┘  └───────┬────────┘  └────────────────────────────┘│
//! │          │   dto.rs (payload ⇄ record ⇄ wire)                           │
//! │          ▼                   ▼                                          │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  storefront-db  (ProductRepository, CollectionRepository)        │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration
//! Environment variables:
//! - `HTTP_PORT` - listen port (default: 8000)
//! - `BIND_ADDR` - listen address (default: 0.0.0.0)
//! - `DATABASE_PATH` - SQLite file or `:memory:` (default: storefront.db)
//! - `DB_MAX_CONNECTIONS` - pool size (default: 5)
//! - `PRODUCT_PAGE_SIZE` - product list size, 0 for unlimited (default: 10)
//! - `PUBLIC_BASE_URL` - hyperlink prefix (default: http://localhost:{port})
//! - `RUST_LOG` - log filter (default: info,storefront=debug,sqlx=warn)

pub mod config;
pub mod dto;
pub mod error;
pub mod extract;
pub mod routes;
pub mod state;

use axum::Router;
use tracing_subscriber::EnvFilter;

// Re-exports
pub use config::{ApiConfig, ConfigError};
pub use error::{ApiError, ApiResult};
pub use state::AppState;

/// Builds the complete application around shared state.
pub fn build_app(state: AppState) -> Router {
    routes::router(state)
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=storefront=trace` - Show trace for storefront crates only
/// - Default: `info,storefront=debug,sqlx=warn`
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,storefront=debug,sqlx=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();
}
