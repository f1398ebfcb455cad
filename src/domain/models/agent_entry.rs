//! Local bookkeeping for agents known to this machine.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One agent in the registry (`configs.json`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentEntry {
    pub agent_id: String,
    #[serde(default)]
    pub datastore_id: String,
    #[serde(default)]
    pub default_datastore_name: String,
    /// YAML file name relative to the config directory.
    pub yaml_path: String,
    pub last_synced_at: DateTime<Utc>,
    /// Content hash of the document last pushed to the remote agent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local_yaml_hash: Option<String>,
}

impl AgentEntry {
    /// Record a successful push of a document with the given hash.
    pub fn mark_synced(&mut self, hash: String) {
        self.last_synced_at = Utc::now();
        self.local_yaml_hash = Some(hash);
    }
}

/// All registered agents keyed by name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentRegistry {
    #[serde(default)]
    pub agents: BTreeMap<String, AgentEntry>,
}

/// Reasons an agent name cannot be used as a registry key and file stem.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AgentNameError {
    #[error("agent name cannot be empty")]
    Empty,
    #[error("agent name cannot contain path separators or spaces")]
    InvalidCharacters,
}

/// Validate an agent name and return it trimmed.
pub fn validate_agent_name(name: &str) -> Result<&str, AgentNameError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AgentNameError::Empty);
    }
    if name.contains(['/', '\\', ' ', '\t', '\n']) {
        return Err(AgentNameError::InvalidCharacters);
    }
    Ok(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_agent_name() {
        assert_eq!(validate_agent_name("  analyst "), Ok("analyst"));
        assert_eq!(validate_agent_name("   "), Err(AgentNameError::Empty));
        assert_eq!(
            validate_agent_name("team/analyst"),
            Err(AgentNameError::InvalidCharacters)
        );
        assert_eq!(
            validate_agent_name("my agent"),
            Err(AgentNameError::InvalidCharacters)
        );
        assert_eq!(
            validate_agent_name(r"a\b"),
            Err(AgentNameError::InvalidCharacters)
        );
    }

    #[test]
    fn test_entry_json_field_names() {
        let entry = AgentEntry {
            agent_id: "ag_1".to_string(),
            datastore_id: "ds_1".to_string(),
            default_datastore_name: "analyst-default".to_string(),
            yaml_path: "analyst.yaml".to_string(),
            last_synced_at: DateTime::parse_from_rfc3339("2026-01-02T03:04:05Z")
                .unwrap()
                .with_timezone(&Utc),
            local_yaml_hash: None,
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["agent_id"], "ag_1");
        assert_eq!(json["yaml_path"], "analyst.yaml");
        assert!(json.get("local_yaml_hash").is_none());
    }

    #[test]
    fn test_mark_synced_records_hash() {
        let mut entry = AgentEntry {
            agent_id: "ag_1".to_string(),
            datastore_id: String::new(),
            default_datastore_name: String::new(),
            yaml_path: "a.yaml".to_string(),
            last_synced_at: DateTime::<Utc>::MIN_UTC,
            local_yaml_hash: None,
        };
        entry.mark_synced("abc".to_string());
        assert_eq!(entry.local_yaml_hash.as_deref(), Some("abc"));
        assert!(entry.last_synced_at > DateTime::<Utc>::MIN_UTC);
    }
}
