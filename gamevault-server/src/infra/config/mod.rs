//! Runtime configuration.
//!
//! Values are layered, lowest precedence first: built-in defaults, an
//! optional TOML file, environment variables (a `.env` file is loaded when
//! present) and finally CLI overrides applied by the binary.

pub mod loader;
pub mod sources;

use std::{fmt, path::PathBuf, time::Duration};

use gamevault_core::RawgConfig;

pub use loader::{ConfigLoad, ConfigLoadError, ConfigLoader};

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_MAX_CONNECTIONS: u32 = 10;
pub const DEFAULT_LOOKUP_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub catalog: CatalogConfig,
    pub image_lookup: ImageLookupConfig,
    pub metadata: ConfigMetadata,
}

impl Config {
    pub fn rawg(&self) -> RawgConfig {
        RawgConfig {
            base_url: self.image_lookup.base_url.clone(),
            api_key: self.image_lookup.api_key.clone(),
            timeout: self.image_lookup.timeout,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: DEFAULT_HOST.to_string(),
                port: DEFAULT_PORT,
            },
            database: DatabaseConfig {
                url: None,
                max_connections: DEFAULT_MAX_CONNECTIONS,
            },
            catalog: CatalogConfig {
                deletion_code: None,
            },
            image_lookup: ImageLookupConfig {
                base_url: gamevault_core::providers::rawg::DEFAULT_RAWG_BASE_URL.to_string(),
                api_key: None,
                timeout: Duration::from_secs(DEFAULT_LOOKUP_TIMEOUT_SECS),
            },
            metadata: ConfigMetadata::default(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Clone)]
pub struct DatabaseConfig {
    pub url: Option<String>,
    pub max_connections: u32,
}

impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("url", &self.url.as_ref().map(|_| "<redacted>"))
            .field("max_connections", &self.max_connections)
            .finish()
    }
}

/// Catalog behaviour switches.
#[derive(Clone)]
pub struct CatalogConfig {
    /// Shared secret required by the delete endpoints. `None` leaves
    /// deletes ungated.
    pub deletion_code: Option<String>,
}

impl fmt::Debug for CatalogConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CatalogConfig")
            .field("deletion_code", &self.deletion_code.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

#[derive(Clone)]
pub struct ImageLookupConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub timeout: Duration,
}

impl fmt::Debug for ImageLookupConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageLookupConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[derive(Debug, Clone, Default)]
pub struct ConfigMetadata {
    pub config_path: Option<PathBuf>,
    pub env_file_loaded: bool,
}
