use serde::{Deserialize, Serialize};

/// Response of `GET /agents/{id}/metadata`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentMetadata {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub datastore_ids: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent_configs: Option<AgentConfigs>,
}

impl AgentMetadata {
    /// Workflow YAML currently deployed on the agent, if any.
    pub fn acl_yaml(&self) -> Option<&str> {
        self.agent_configs
            .as_ref()?
            .acl_config
            .as_ref()
            .map(|acl| acl.acl_yaml.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentConfigs {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub acl_config: Option<AclConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AclConfig {
    #[serde(default)]
    pub acl_active: bool,
    #[serde(default)]
    pub acl_yaml: String,
}

/// Body of `PUT /agents/{id}`.
#[derive(Debug, Serialize)]
pub(crate) struct ModifyAgentRequest<'a> {
    pub agent_configs: ModifyAgentConfigs<'a>,
}

#[derive(Debug, Serialize)]
pub(crate) struct ModifyAgentConfigs<'a> {
    pub acl_config: AclConfigRef<'a>,
}

#[derive(Debug, Serialize)]
pub(crate) struct AclConfigRef<'a> {
    pub acl_active: bool,
    pub acl_yaml: &'a str,
}

/// Body of `POST /agents/{id}/query/acl`.
#[derive(Debug, Serialize)]
pub(crate) struct QueryRequest<'a> {
    pub messages: [QueryMessage<'a>; 1],
    pub stream: bool,
}

#[derive(Debug, Serialize)]
pub(crate) struct QueryMessage<'a> {
    pub role: &'static str,
    pub content: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_metadata_acl_yaml() {
        let metadata: AgentMetadata = serde_json::from_value(json!({
            "name": "support",
            "datastore_ids": ["ds-1"],
            "agent_configs": {"acl_config": {"acl_active": true, "acl_yaml": "version: 0.1\n"}}
        }))
        .unwrap();
        assert_eq!(metadata.acl_yaml(), Some("version: 0.1\n"));

        let bare: AgentMetadata = serde_json::from_value(json!({"name": "x"})).unwrap();
        assert_eq!(bare.acl_yaml(), None);
        assert!(bare.datastore_ids.is_empty());
    }

    #[test]
    fn test_request_bodies() {
        let body = ModifyAgentRequest {
            agent_configs: ModifyAgentConfigs {
                acl_config: AclConfigRef {
                    acl_active: true,
                    acl_yaml: "a: 1",
                },
            },
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({"agent_configs": {"acl_config": {"acl_active": true, "acl_yaml": "a: 1"}}})
        );

        let query = QueryRequest {
            messages: [QueryMessage {
                role: "user",
                content: "hi",
            }],
            stream: true,
        };
        assert_eq!(
            serde_json::to_value(&query).unwrap(),
            json!({"messages": [{"role": "user", "content": "hi"}], "stream": true})
        );
    }
}
