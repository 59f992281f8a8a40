//! API configuration module.
//!
//! Configuration is loaded from environment variables with fallback to defaults.

use serde::{Deserialize, Serialize};
use std::env;
use std::net::{IpAddr, SocketAddr};
use storefront_core::DEFAULT_PAGE_SIZE;
use storefront_db::DbConfig;

/// API server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// HTTP listen port
    pub http_port: u16,

    /// Listen address
    pub bind_addr: IpAddr,

    /// SQLite database file, or `:memory:`
    pub database_path: String,

    /// Connection pool size
    pub db_max_connections: u32,

    /// Default product list size; `None` lists everything
    pub product_page_size: Option<u32>,

    /// Prefix for hyperlinks in responses, without a trailing slash
    pub public_base_url: String,
}

impl ApiConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let http_port: u16 = parse_or(&lookup, "HTTP_PORT", 8000)?;

        let bind_addr: IpAddr = parse_or(&lookup, "BIND_ADDR", IpAddr::from([0, 0, 0, 0]))?;

        let database_path = lookup("DATABASE_PATH")
            .filter(|p| !p.trim().is_empty())
            .unwrap_or_else(|| "storefront.db".to_string());

        let db_max_connections: u32 = parse_or(&lookup, "DB_MAX_CONNECTIONS", 5)?;
        if db_max_connections == 0 {
            return Err(ConfigError::InvalidValue("DB_MAX_CONNECTIONS".to_string()));
        }

        // 0 disables the limit
        let page_size: u32 = parse_or(&lookup, "PRODUCT_PAGE_SIZE", DEFAULT_PAGE_SIZE)?;
        let product_page_size = (page_size > 0).then_some(page_size);

        let public_base_url = lookup("PUBLIC_BASE_URL")
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| format!("http://localhost:{}", http_port));

        if !public_base_url.starts_with("http://") && !public_base_url.starts_with("https://") {
            return Err(ConfigError::InvalidValue("PUBLIC_BASE_URL".to_string()));
        }

        Ok(ApiConfig {
            http_port,
            bind_addr,
            database_path,
            db_max_connections,
            product_page_size,
            public_base_url,
        })
    }

    /// Address the server listens on.
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_addr, self.http_port)
    }

    /// Database settings derived from this configuration.
    pub fn db_config(&self) -> DbConfig {
        let config = DbConfig::new(&self.database_path);
        if config.is_in_memory() {
            DbConfig::in_memory()
        } else {
            config.max_connections(self.db_max_connections)
        }
    }

    /// Absolute URL of a collection's detail endpoint.
    pub fn collection_url(&self, id: i64) -> String {
        format!("{}/collections/{}", self.public_base_url, id)
    }
}

/// Parses `key` when set, otherwise returns `default`.
fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue(key.to_string())),
        None => Ok(default),
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}
