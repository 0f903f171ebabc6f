//! Startup configuration: MAAS endpoint, credentials and cache settings

pub mod error;

pub use error::{ConfigError, Result};

use crate::maas::{self, parse_endpoint, ApiKey};
use serde::Deserialize;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::fs;
use tracing::debug;
use url::Url;

pub const DEFAULT_CONFIG_PATH: &str = "/etc/maasinv/maasinv.yaml";
pub const CONFIG_ENV_VAR: &str = "MAASINV_CONFIG";
pub const DEFAULT_CACHE_PATH: &str = "nodes.json";
pub const DEFAULT_CACHE_WINDOW: &str = "30 minutes";

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    pub maas: MaasConfig,
    #[serde(default)]
    pub cache: CacheConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MaasConfig {
    /// API base URL, e.g. `http://maas:5240/MAAS/api/2.0/`
    pub url: String,
    /// `consumer_key:token_key:token_secret`
    pub apikey: String,
    /// Per-request timeout
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CacheConfig {
    #[serde(default = "default_cache_path")]
    pub path: PathBuf,
    /// Staleness window in humantime syntax ("30 minutes", "1 day")
    #[serde(default = "default_cache_window")]
    pub window: String,
}

fn default_cache_path() -> PathBuf {
    PathBuf::from(DEFAULT_CACHE_PATH)
}

fn default_cache_window() -> String {
    DEFAULT_CACHE_WINDOW.to_string()
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            path: default_cache_path(),
            window: default_cache_window(),
        }
    }
}

impl MaasConfig {
    pub fn endpoint(&self) -> maas::error::Result<Url> {
        parse_endpoint(&self.url)
    }

    pub fn api_key(&self) -> maas::error::Result<ApiKey> {
        self.apikey.parse()
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

impl CacheConfig {
    pub fn staleness_window(&self) -> Result<Duration> {
        parse_window(&self.window)
    }
}

impl Config {
    /// Read and validate the configuration file
    pub async fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).await.map_err(|e| match e.kind() {
            ErrorKind::NotFound => ConfigError::NotFound {
                path: path.to_path_buf(),
            },
            _ => ConfigError::Read {
                path: path.to_path_buf(),
                source: e,
            },
        })?;

        let config = Self::from_yaml(&content)?;
        debug!("Loaded configuration from {:?}", path);
        Ok(config)
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        let config: Config =
            serde_yaml::from_str(content).map_err(|e| ConfigError::InvalidYaml {
                reason: e.to_string(),
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Check every setting up front so a bad file fails before any fetch
    pub fn validate(&self) -> Result<()> {
        self.maas.endpoint()?;
        self.maas.api_key()?;
        self.cache.staleness_window()?;
        Ok(())
    }
}

/// Parse a staleness window such as "30 minutes" or "1 day"
pub fn parse_window(value: &str) -> Result<Duration> {
    let invalid = |reason: String| ConfigError::InvalidWindow {
        value: value.to_string(),
        reason,
    };

    let window = humantime::parse_duration(value.trim()).map_err(|e| invalid(e.to_string()))?;
    if window.is_zero() {
        return Err(invalid("window must be greater than zero".to_string()));
    }
    Ok(window)
}

/// Configuration path: explicit flag, then `MAASINV_CONFIG`, then the system default
pub fn resolve_path(explicit: Option<&Path>) -> PathBuf {
    explicit
        .map(Path::to_path_buf)
        .or_else(|| std::env::var_os(CONFIG_ENV_VAR).map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}
