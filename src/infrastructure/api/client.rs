//! Agent service HTTP client.
//!
//! Only the calls needed to keep a remote agent's workflow in sync with the
//! local document and to stream queries against it.

use std::time::Duration;

use bytes::Bytes;
use futures::Stream;
use reqwest::{header, Client as ReqwestClient, Response};
use tracing::{debug, instrument};

use super::errors::ApiError;
use super::types::{
    AclConfigRef, AgentMetadata, ModifyAgentConfigs, ModifyAgentRequest, QueryMessage, QueryRequest,
};
use crate::domain::models::config::ApiConfig;

/// Client for the agent service REST API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http_client: ReqwestClient,
    base_url: String,
    api_key: String,
}

impl ApiClient {
    /// Build a client from configuration.
    ///
    /// # Errors
    /// [`ApiError::MissingApiKey`] when no key is configured, or a network
    /// error if the HTTP client cannot be constructed.
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let api_key = config
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .ok_or(ApiError::MissingApiKey)?
            .to_string();

        let http_client = ReqwestClient::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("agent-composer/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http_client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// `GET /agents/{id}/metadata`
    #[instrument(skip(self))]
    pub async fn get_agent_metadata(&self, agent_id: &str) -> Result<AgentMetadata, ApiError> {
        let response = self
            .http_client
            .get(self.url(&format!("/agents/{agent_id}/metadata")))
            .bearer_auth(&self.api_key)
            .send()
            .await?;
        let response = check_status("get agent metadata", response).await?;
        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// `PUT /agents/{id}` with an active workflow document.
    #[instrument(skip(self, acl_yaml), fields(yaml_len = acl_yaml.len()))]
    pub async fn modify_agent(&self, agent_id: &str, acl_yaml: &str) -> Result<(), ApiError> {
        let body = ModifyAgentRequest {
            agent_configs: ModifyAgentConfigs {
                acl_config: AclConfigRef {
                    acl_active: true,
                    acl_yaml,
                },
            },
        };
        let response = self
            .http_client
            .put(self.url(&format!("/agents/{agent_id}")))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;
        check_status("modify agent", response).await?;
        debug!(agent_id, "agent workflow updated");
        Ok(())
    }

    /// `POST /agents/{id}/query/acl` with `stream: true`.
    ///
    /// Returns the raw event-stream body for the decoder.
    #[instrument(skip(self, query))]
    pub async fn query_stream(
        &self,
        agent_id: &str,
        query: &str,
    ) -> Result<impl Stream<Item = reqwest::Result<Bytes>>, ApiError> {
        let body = QueryRequest {
            messages: [QueryMessage {
                role: "user",
                content: query,
            }],
            stream: true,
        };
        let response = self
            .http_client
            .post(self.url(&format!("/agents/{agent_id}/query/acl")))
            .bearer_auth(&self.api_key)
            .header(header::ACCEPT, "text/event-stream")
            .json(&body)
            .send()
            .await?;
        let response = check_status("query", response).await?;
        Ok(response.bytes_stream())
    }
}

async fn check_status(operation: &'static str, response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "failed to read error response".to_string());
    Err(ApiError::from_status(operation, status, body.trim().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_requires_api_key() {
        let config = ApiConfig::default();
        assert!(matches!(ApiClient::new(&config), Err(ApiError::MissingApiKey)));

        let blank = ApiConfig {
            api_key: Some("   ".to_string()),
            ..ApiConfig::default()
        };
        assert!(matches!(ApiClient::new(&blank), Err(ApiError::MissingApiKey)));
    }

    #[test]
    fn test_url_strips_trailing_slash() {
        let config = ApiConfig {
            base_url: "http://localhost:9000/v1/".to_string(),
            api_key: Some("k".to_string()),
            timeout_secs: 5,
        };
        let client = ApiClient::new(&config).unwrap();
        assert_eq!(client.url("/agents/a1"), "http://localhost:9000/v1/agents/a1");
    }
}
