//! HTTP server configuration loaded from config.toml
//!
//! The file is optional. When it is missing the defaults below apply; when it
//! exists it must parse. `BIND_ADDRESS` in the environment overrides both.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, info};

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Listener settings
    #[serde(default)]
    pub server: ServerConfig,
}

/// Listener settings under the `[server]` table
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Interface to bind (e.g., "127.0.0.1", "0.0.0.0")
    #[serde(default = "default_host")]
    pub host: String,
    /// TCP port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

const fn default_port() -> u16 {
    3000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerConfig {
    /// Address the listener binds to, honoring a `BIND_ADDRESS` override.
    #[must_use]
    pub fn bind_address(&self) -> String {
        std::env::var("BIND_ADDRESS").unwrap_or_else(|_| format!("{}:{}", self.host, self.port))
    }
}

/// Loads server configuration from a TOML file
///
/// # Errors
/// Returns an error if:
/// - The file exists but cannot be read
/// - The TOML syntax is invalid
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let path = path.as_ref();
    if !path.exists() {
        info!("No config file at {:?}, using defaults", path);
        return Ok(Config::default());
    }

    debug!("Loading configuration from {:?}", path);
    let contents = std::fs::read_to_string(path).map_err(|e| Error::Config {
        message: format!("Failed to read config file: {e}"),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })
}

/// Loads server configuration from the default location (./config.toml)
pub fn load_default_config() -> Result<Config> {
    load_config("config.toml")
}
