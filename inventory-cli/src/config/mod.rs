//! Client configuration
//!
//! Settings come from, in increasing priority: built-in defaults, the TOML
//! config file, a `.env` file in the working directory, and `INVENTORY_*`
//! environment variables.

use anyhow::{Context, Result};
use log::{debug, info};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::api::{ConcurrencyConfig, InventoryClient, ResilienceConfig};

pub const ENV_SERVER_URL: &str = "INVENTORY_URL";
pub const ENV_REQUEST_TOKEN: &str = "INVENTORY_REQUEST_TOKEN";
pub const ENV_MAX_CONCURRENT: &str = "INVENTORY_MAX_CONCURRENT";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the inventory app, e.g. `https://cloud.example.com/index.php/apps/inventory`
    pub server_url: Option<String>,
    /// Anti-forgery token sent in the `requesttoken` header
    pub request_token: Option<String>,
    /// Per-request timeout in seconds; unset means no timeout
    pub timeout_secs: Option<u64>,
    pub concurrency: ConcurrencyConfig,
}

impl Config {
    /// `<config dir>/inventory-cli/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("inventory-cli").join("config.toml"))
    }

    /// Load all configuration layers.
    ///
    /// An explicit `path` must exist; the default config file is optional.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                _ => {
                    debug!("No config file found; using defaults");
                    Self::default()
                }
            },
        };

        if let Ok(path) = dotenvy::dotenv() {
            debug!("Loaded environment from {}", path.display());
        }
        config.apply_env(|key| std::env::var(key).ok())?;

        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Override settings from environment variables looked up through `lookup`
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_SERVER_URL) {
            self.server_url = Some(url);
        }
        if let Some(token) = lookup(ENV_REQUEST_TOKEN) {
            self.request_token = Some(token);
        }
        if let Some(max) = lookup(ENV_MAX_CONCURRENT) {
            self.concurrency.max_concurrent_requests = max
                .trim()
                .parse()
                .with_context(|| format!("{} must be a positive integer, got '{}'", ENV_MAX_CONCURRENT, max))?;
        }
        Ok(())
    }

    pub fn server_url(&self) -> Result<&str> {
        self.server_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "No server URL configured. Set server_url in the config file or {}.",
                    ENV_SERVER_URL
                )
            })
    }

    pub fn resilience(&self) -> ResilienceConfig {
        ResilienceConfig::builder()
            .concurrency_config(self.concurrency.clone())
            .request_timeout(self.timeout_secs.map(Duration::from_secs))
            .build()
    }

    /// Build the HTTP client described by this config
    pub fn build_client(&self) -> Result<InventoryClient> {
        InventoryClient::new(
            self.server_url()?,
            self.request_token.as_deref(),
            &self.resilience(),
        )
    }
}
