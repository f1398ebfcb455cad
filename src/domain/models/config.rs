use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::infrastructure::logging::LogConfig;

/// Default agent-service endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.contextual.ai/v1";

/// Main configuration structure for agent-composer
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// Directory holding `configs.json` and agent YAML files.
    /// Defaults to the platform config dir (`~/.config/agent-composer`).
    #[serde(default)]
    pub config_dir: Option<PathBuf>,

    /// Remote agent service configuration
    #[serde(default)]
    pub api: ApiConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LogConfig,
}

/// Remote agent service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ApiConfig {
    /// Base URL of the agent service
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Bearer API key; usually supplied through `AGENT_COMPOSER_API__API_KEY`
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,

    /// Request timeout in seconds. Streaming queries are bounded by this too.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

const fn default_timeout_secs() -> u64 {
    300
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}
