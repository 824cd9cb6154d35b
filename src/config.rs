//! Server configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! - `INVENTORY_HOST` - Bind address (default: 0.0.0.0)
//! - `INVENTORY_PORT` - Listen port (default: 8000)
//! - `INVENTORY_DATA_DIR` - Directory for the JSON collections; unset keeps
//!   everything in memory
//! - `INVENTORY_API_PREFIX` - Path the item and cart routes are nested under
//!   (default: /api/items)

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use thiserror::Error;

/// Default path prefix for the item and cart routes.
pub const DEFAULT_API_PREFIX: &str = "/api/items";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Where collections are persisted, if anywhere
    pub data_dir: Option<PathBuf>,
    /// Normalized route prefix; empty means the routes sit at the root
    pub api_prefix: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::from([0, 0, 0, 0]),
            port: 8000,
            data_dir: None,
            api_prefix: DEFAULT_API_PREFIX.to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the process environment.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let host = match lookup("INVENTORY_HOST") {
            Some(raw) => raw.parse::<IpAddr>().map_err(|e| {
                ConfigError::InvalidEnvVar("INVENTORY_HOST".to_string(), e.to_string())
            })?,
            None => defaults.host,
        };
        let port = match lookup("INVENTORY_PORT") {
            Some(raw) => raw.parse::<u16>().map_err(|e| {
                ConfigError::InvalidEnvVar("INVENTORY_PORT".to_string(), e.to_string())
            })?,
            None => defaults.port,
        };
        let data_dir = lookup("INVENTORY_DATA_DIR")
            .filter(|dir| !dir.trim().is_empty())
            .map(PathBuf::from);
        let api_prefix = match lookup("INVENTORY_API_PREFIX") {
            Some(raw) => normalize_prefix(&raw)?,
            None => defaults.api_prefix,
        };

        Ok(Self {
            host,
            port,
            data_dir,
            api_prefix,
        })
    }

    /// Returns the socket address for binding the server.
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

/// Strips trailing slashes and insists on a leading one.
///
/// `"/"` and `""` both normalize to the empty prefix (routes at the root).
fn normalize_prefix(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Ok(String::new());
    }
    if !trimmed.starts_with('/') || trimmed.contains(':') || trimmed.contains('*') {
        return Err(ConfigError::InvalidEnvVar(
            "INVENTORY_API_PREFIX".to_string(),
            format!("'{raw}' must be a static path starting with '/'"),
        ));
    }
    Ok(trimmed.to_string())
}
