//! Infrastructure layer module
//!
//! External integrations and adapters:
//! - Configuration management (figment)
//! - Logging infrastructure (tracing)
//! - Agent service HTTP client (reqwest)
//! - Event stream decoder for streamed queries
//! - On-disk agent registry

pub mod api;
pub mod config;
pub mod logging;
pub mod registry;
pub mod stream;
