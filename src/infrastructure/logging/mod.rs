//! Logging infrastructure
//!
//! Structured logging using tracing and tracing-subscriber:
//! - Console logs on stderr (stdout carries command output)
//! - Optional JSON log file with rotation
pub mod config;
pub mod logger;

pub use config::{LogConfig, LogFormat, RotationPolicy};
pub use logger::LoggerImpl;
