use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use thiserror::Error;

use crate::domain::models::config::Config;
use crate::infrastructure::logging::logger::parse_log_level;

/// File name of the YAML config inside the config directory.
pub const CONFIG_FILE_NAME: &str = "config.yaml";

/// Prefix of environment overrides; `__` separates nested keys.
pub const ENV_PREFIX: &str = "AGENT_COMPOSER_";

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("API base URL cannot be empty")]
    EmptyBaseUrl,

    #[error("Invalid API base URL {0:?}. Must start with http:// or https://")]
    InvalidBaseUrl(String),

    #[error("Invalid timeout_secs: {0}. Must be at least 1")]
    InvalidTimeout(u64),

    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("No config directory available; set config_dir or AGENT_COMPOSER_CONFIG_DIR")]
    NoConfigDir,
}

/// Platform default: `<config dir>/agent-composer`.
pub fn default_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("agent-composer"))
}

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with hierarchical merging
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. `<config_dir>/config.yaml` (optional)
    /// 3. Environment variables (`AGENT_COMPOSER_*`, highest priority)
    ///
    /// `config_dir` is taken from the argument, else from
    /// `AGENT_COMPOSER_CONFIG_DIR`, else the platform default. The resolved
    /// directory is stored back into the returned config.
    pub fn load(config_dir: Option<&Path>) -> Result<Config> {
        let dir = match config_dir {
            Some(dir) => dir.to_path_buf(),
            None => Self::env_figment()
                .extract_inner::<PathBuf>("config_dir")
                .ok()
                .or_else(default_config_dir)
                .ok_or(ConfigError::NoConfigDir)?,
        };

        let mut config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(dir.join(CONFIG_FILE_NAME)))
            .merge(Self::env_figment())
            .extract()
            .context("Failed to extract configuration from figment")?;

        config.config_dir = Some(dir);
        Self::validate(&config)?;
        Ok(config)
    }

    fn env_figment() -> Figment {
        Figment::from(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Validate configuration after loading
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        let base_url = config.api.base_url.trim();
        if base_url.is_empty() {
            return Err(ConfigError::EmptyBaseUrl);
        }
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ConfigError::InvalidBaseUrl(config.api.base_url.clone()));
        }

        if config.api.timeout_secs == 0 {
            return Err(ConfigError::InvalidTimeout(config.api.timeout_secs));
        }

        if parse_log_level(&config.logging.level).is_err() {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        Ok(())
    }
}
