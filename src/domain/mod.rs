//! Domain layer for agent-composer
//!
//! This module contains the workflow-document model, tool catalog and
//! registry types, with no I/O.

pub mod errors;
pub mod models;

pub use errors::{ComposerError, ComposerResult};
