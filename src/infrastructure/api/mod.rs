//! HTTP client for the remote agent service.

pub mod client;
pub mod errors;
pub mod types;

pub use client::ApiClient;
pub use errors::ApiError;
pub use types::{AclConfig, AgentConfigs, AgentMetadata};
