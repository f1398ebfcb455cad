//! On-disk agent registry (`configs.json`) and per-agent YAML locations.

pub mod store;

pub use store::{RegistryError, RegistryStore, REGISTRY_FILE_NAME};
