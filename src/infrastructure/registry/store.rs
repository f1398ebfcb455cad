use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::domain::models::agent_entry::{AgentEntry, AgentRegistry};

pub const REGISTRY_FILE_NAME: &str = "configs.json";

#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid registry file {path}: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("agent {0:?} not found in registry")]
    NotFound(String),
}

/// Registry file and agent documents rooted at one config directory.
#[derive(Debug, Clone)]
pub struct RegistryStore {
    dir: PathBuf,
}

impl RegistryStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn registry_path(&self) -> PathBuf {
        self.dir.join(REGISTRY_FILE_NAME)
    }

    /// `<dir>/<name>.yaml`
    pub fn agent_yaml_path(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{name}.yaml"))
    }

    /// Resolve an entry's `yaml_path`, which is stored relative to the directory.
    pub fn resolve_yaml_path(&self, entry: &AgentEntry) -> PathBuf {
        self.dir.join(&entry.yaml_path)
    }

    /// Read the registry; a missing file is an empty registry.
    pub fn load(&self) -> Result<AgentRegistry, RegistryError> {
        let path = self.registry_path();
        let data = match fs::read(&path) {
            Ok(data) => data,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no registry file yet");
                return Ok(AgentRegistry::default());
            }
            Err(source) => return Err(RegistryError::Read { path, source }),
        };
        serde_json::from_slice(&data).map_err(|source| RegistryError::Corrupt { path, source })
    }

    /// Write the registry as pretty JSON, creating the directory if needed.
    pub fn save(&self, registry: &AgentRegistry) -> Result<(), RegistryError> {
        let path = self.registry_path();
        fs::create_dir_all(&self.dir).map_err(|source| RegistryError::Write {
            path: self.dir.clone(),
            source,
        })?;
        let data = serde_json::to_vec_pretty(registry).map_err(|source| RegistryError::Corrupt {
            path: path.clone(),
            source,
        })?;
        fs::write(&path, data).map_err(|source| RegistryError::Write { path, source })
    }

    pub fn get(&self, name: &str) -> Result<Option<AgentEntry>, RegistryError> {
        Ok(self.load()?.agents.remove(name))
    }

    /// Like [`Self::get`] but a missing agent is an error.
    pub fn require(&self, name: &str) -> Result<AgentEntry, RegistryError> {
        self.get(name)?
            .ok_or_else(|| RegistryError::NotFound(name.to_string()))
    }

    /// Insert or replace an entry and persist.
    pub fn set(&self, name: &str, entry: AgentEntry) -> Result<(), RegistryError> {
        let mut registry = self.load()?;
        registry.agents.insert(name.to_string(), entry);
        self.save(&registry)
    }
}
