//! Configuration loading and management.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::api::{Framework, Tag};
use crate::matrix::InputMode;

/// Environment variable overriding the service base URL.
pub const BASE_URL_ENV: &str = "NVDA_API_BASE";

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Forecast service connection.
    #[serde(default)]
    pub api: ApiConfig,
    /// Default prediction parameters.
    #[serde(default)]
    pub predict: PredictConfig,
}

/// Forecast service connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Service base URL.
    pub base_url: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: crate::defaults::BASE_URL.to_string(),
            timeout_secs: crate::defaults::TIMEOUT_SECS,
        }
    }
}

impl ApiConfig {
    /// Base URL with the environment override applied.
    pub fn resolved_base_url(&self) -> String {
        std::env::var(BASE_URL_ENV).unwrap_or_else(|_| self.base_url.clone())
    }
}

/// Defaults used when the CLI does not override them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictConfig {
    pub tag: Tag,
    pub framework: Framework,
    pub mode: InputMode,
}

impl Default for PredictConfig {
    fn default() -> Self {
        Self {
            tag: Tag::B,
            framework: Framework::Lgbm,
            mode: InputMode::Auto,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            predict: PredictConfig::default(),
        }
    }
}

impl Config {
    /// Create a new configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;

        let config: Config = toml::from_str(&content)
            .context("Failed to parse config file")?;

        Ok(config)
    }

    /// Save configuration to a TOML file.
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .context("Failed to serialize config")?;

        std::fs::write(&path, content)
            .with_context(|| format!("Failed to write config file: {:?}", path.as_ref()))?;

        Ok(())
    }

    /// Create a sample configuration file.
    pub fn create_sample_config<P: AsRef<Path>>(path: P) -> Result<()> {
        let config = Config::default();
        config.save_to_file(path)
    }
}

/// Load configuration from file or fall back to defaults.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    if path.as_ref().exists() {
        Config::from_file(path)
    } else {
        Ok(Config::default())
    }
}
