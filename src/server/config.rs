// src/server/config.rs
//! Configuration file parsing for the cookbook API
//!
//! Optional TOML file with two sections:
//! - [server] - bind address, CORS origins
//! - [storage] - database path

use crate::server::ServerConfig;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

/// TOML configuration file structure
#[derive(Debug, Default, Deserialize)]
pub struct ApiConfig {
    /// Server settings
    #[serde(default)]
    pub server: ServerSection,

    /// Storage settings
    #[serde(default)]
    pub storage: StorageSection,
}

/// Server configuration section
#[derive(Debug, Deserialize)]
pub struct ServerSection {
    /// Public API bind address
    #[serde(default = "default_bind")]
    pub bind: String,

    /// Origins allowed by CORS (empty = any)
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            cors_origins: Vec::new(),
        }
    }
}

fn default_bind() -> String {
    "0.0.0.0:5678".to_string()
}

/// Storage configuration section
#[derive(Debug, Deserialize)]
pub struct StorageSection {
    /// SQLite database file
    #[serde(default = "default_db_path")]
    pub db_path: PathBuf,
}

impl Default for StorageSection {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
        }
    }
}

fn default_db_path() -> PathBuf {
    PathBuf::from(crate::db::DEFAULT_DB_PATH)
}

impl ApiConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: ApiConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        self.server
            .bind
            .parse::<SocketAddr>()
            .with_context(|| format!("Invalid server.bind address: {}", self.server.bind))?;

        for origin in &self.server.cors_origins {
            if !(origin.starts_with("http://") || origin.starts_with("https://")) {
                anyhow::bail!("server.cors_origins entries must be http(s) origins, got '{origin}'");
            }
        }

        if self.storage.db_path.as_os_str().is_empty() {
            anyhow::bail!("storage.db_path must not be empty");
        }

        Ok(())
    }

    /// Convert to the internal ServerConfig structure
    pub fn to_server_config(&self) -> Result<ServerConfig> {
        let bind_addr = self
            .server
            .bind
            .parse()
            .with_context(|| format!("Invalid server.bind address: {}", self.server.bind))?;

        Ok(ServerConfig {
            bind_addr,
            db_path: self.storage.db_path.clone(),
            cors_allowed_origins: self.server.cors_origins.clone(),
        })
    }
}
