//! Configuration management infrastructure
//!
//! Hierarchical configuration using figment:
//! - Serialized defaults
//! - YAML file in the config directory
//! - Environment variable overrides
//! - Configuration validation

pub mod loader;

pub use loader::{default_config_dir, ConfigError, ConfigLoader, CONFIG_FILE_NAME, ENV_PREFIX};
