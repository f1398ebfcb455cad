//! Per-invocation state shared by commands that touch the registry.

use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::domain::models::agent_entry::{validate_agent_name, AgentEntry};
use crate::domain::models::config::Config;
use crate::infrastructure::api::ApiClient;
use crate::infrastructure::config::ConfigError;
use crate::infrastructure::registry::RegistryStore;

pub struct CommandContext {
    pub config: Config,
    pub store: RegistryStore,
}

impl CommandContext {
    pub fn new(config: Config) -> Result<Self> {
        let dir = config.config_dir.clone().ok_or(ConfigError::NoConfigDir)?;
        Ok(Self {
            store: RegistryStore::new(dir),
            config,
        })
    }

    pub fn api_client(&self) -> Result<ApiClient> {
        ApiClient::new(&self.config.api).context("Failed to create API client")
    }

    /// Look up a registered agent by (validated) name.
    pub fn agent(&self, name: &str) -> Result<(String, AgentEntry, PathBuf)> {
        let name = validate_agent_name(name)?.to_string();
        let entry = self
            .store
            .get(&name)?
            .with_context(|| format!("agent {name:?} not found; run 'agent init {name}' first"))?;
        let path = self.store.resolve_yaml_path(&entry);
        Ok((name, entry, path))
    }
}
