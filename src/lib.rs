//! Agent Composer - research-agent workflows from the terminal
//!
//! Composes the YAML workflow document that drives a remote research agent,
//! keeps it in sync with the agent service, and decodes the server-sent event
//! stream of agent answers.
//!
//! # Architecture
//!
//! - **Domain Layer** (`domain`): workflow document model, tool catalog, registry entries
//! - **Service Layer** (`services`): document composition and sync decisions
//! - **Infrastructure Layer** (`infrastructure`): config, logging, HTTP client,
//!   event stream decoder, on-disk registry
//! - **CLI Layer** (`cli`): command-line interface
//!
//! # Example
//!
//! ```
//! use agent_composer::domain::models::ToolKind;
//! use agent_composer::services::composer;
//!
//! let doc = composer::compose_document(&[ToolKind::StructuredSearch]).unwrap();
//! assert!(composer::has_tool_by_name(&doc, "get_schema").unwrap());
//! ```

pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::errors::{ComposerError, ComposerResult};
pub use domain::models::{Config, ToolKind, WorkflowDocument};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use infrastructure::stream::{decode, decode_stream, DecoderOptions, StreamError, StreamHandler};
