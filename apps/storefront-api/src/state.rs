//! Shared application state.

use std::sync::Arc;

use storefront_db::Database;

use crate::config::ApiConfig;

/// State handed to every handler.
///
/// Cloned per request; the pool and configuration are shared.
#[derive(Debug, Clone)]
pub struct AppState {
    pub db: Database,
    pub config: Arc<ApiConfig>,
}

impl AppState {
    pub fn new(db: Database, config: ApiConfig) -> Self {
        AppState {
            db,
            config: Arc::new(config),
        }
    }
}
