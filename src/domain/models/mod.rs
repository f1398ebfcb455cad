pub mod agent_entry;
pub mod config;
pub mod tool;
pub mod workflow;

pub use agent_entry::{validate_agent_name, AgentEntry, AgentNameError, AgentRegistry};
pub use config::{ApiConfig, Config};
pub use tool::{catalog, ToolKind, UnknownToolKind};
pub use workflow::{
    AgentConfig, AgentLoop, Node, NodeSlot, SchemaVersion, SourceRef, StepConfig, StepRef, ToolBody,
    ToolEntry, ToolSlot, WorkflowDocument,
};
