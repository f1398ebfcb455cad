//! Typed model of the workflow configuration document.
//!
//! The remote service accepts the document as YAML with a nested-map shape:
//!
//! ```yaml
//! version: 0.1
//! inputs: { query: str }
//! outputs: { response: str }
//! nodes:
//!   research:
//!     type: AgenticResearchStep
//!     config:
//!       tools_config: []
//!     input_mapping:
//!       message_history: create_message_history#message_history
//! ```
//!
//! The types here keep that serialized shape while giving the composer named
//! fields to work with. Step-specific keys that the composer never touches are
//! carried through in `extra` maps so a load/save cycle does not drop them.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use serde_yaml::{Mapping, Value};

use crate::domain::errors::{ComposerError, ComposerResult};

/// Name of the terminal node mapping document outputs to node fields.
pub const OUTPUTS_NODE: &str = "__outputs__";

/// Source prefix referring to the document's declared inputs.
pub const INPUTS_SOURCE: &str = "__inputs__";

/// Name of the tool-using reasoning node.
pub const RESEARCH_NODE: &str = "research";

/// Document schema version; numeric in the root template, quoted in sub-graphs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SchemaVersion {
    Number(serde_yaml::Number),
    Text(String),
}

/// A workflow graph: declared inputs/outputs plus named processing nodes.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct WorkflowDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<SchemaVersion>,

    #[serde(default)]
    pub inputs: IndexMap<String, String>,

    #[serde(default)]
    pub outputs: IndexMap<String, String>,

    /// Absent (or not a mapping) only in malformed documents; read paths
    /// report it as a shape error.
    #[serde(
        default,
        deserialize_with = "mapping_or_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub nodes: Option<IndexMap<String, NodeSlot>>,

    #[serde(flatten)]
    pub extra: Mapping,
}

impl WorkflowDocument {
    /// Parse a document from YAML text.
    pub fn from_yaml(text: &str) -> ComposerResult<Self> {
        Ok(serde_yaml::from_str(text)?)
    }

    /// Serialize the document back to YAML text.
    pub fn to_yaml(&self) -> ComposerResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Look up a node by name.
    pub fn node(&self, name: &str) -> Option<&Node> {
        self.nodes.as_ref()?.get(name)?.as_node()
    }
}

/// One entry of `nodes`.
///
/// A value that is not a well-formed node is kept verbatim, so read paths can
/// report it as a shape error and a load/save cycle leaves it untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NodeSlot {
    Node(Node),
    Other(Value),
}

impl NodeSlot {
    pub const fn as_node(&self) -> Option<&Node> {
        match self {
            Self::Node(node) => Some(node),
            Self::Other(_) => None,
        }
    }

    pub fn as_node_mut(&mut self) -> Option<&mut Node> {
        match self {
            Self::Node(node) => Some(node),
            Self::Other(_) => None,
        }
    }
}

impl From<Node> for NodeSlot {
    fn from(node: Node) -> Self {
        Self::Node(node)
    }
}

/// One processing step of the graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Step type tag, e.g. `AgenticResearchStep` or `output`.
    #[serde(rename = "type")]
    pub step_type: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ui_stream_types: Option<IndexMap<String, bool>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ui_output: Option<String>,

    /// A `config` that is not a mapping is read as absent.
    #[serde(
        default,
        deserialize_with = "mapping_or_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub config: Option<StepConfig>,

    #[serde(default)]
    pub input_mapping: IndexMap<String, SourceRef>,

    #[serde(flatten)]
    pub extra: Mapping,
}

impl Node {
    /// A node of the given type with no config and no inputs.
    pub fn new(step_type: impl Into<String>) -> Self {
        Self {
            step_type: step_type.into(),
            ui_stream_types: None,
            ui_output: None,
            config: None,
            input_mapping: IndexMap::new(),
            extra: Mapping::new(),
        }
    }

    /// Add an input mapping entry.
    #[must_use]
    pub fn with_input(mut self, input: impl Into<String>, source: SourceRef) -> Self {
        self.input_mapping.insert(input.into(), source);
        self
    }

    /// Set the UI output field (used by composite tool `__outputs__` nodes).
    #[must_use]
    pub fn with_ui_output(mut self, field: impl Into<String>) -> Self {
        self.ui_output = Some(field.into());
        self
    }
}

/// Step-specific configuration of a node.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StepConfig {
    /// Tools exposed to the research step. A non-sequence value is read as absent.
    #[serde(
        default,
        deserialize_with = "sequence_or_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub tools_config: Option<Vec<ToolSlot>>,

    #[serde(
        default,
        deserialize_with = "mapping_or_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub agent_config: Option<AgentConfig>,

    #[serde(flatten)]
    pub extra: Mapping,
}

/// Reasoning-loop settings of the research step.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AgentConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub research_guidelines_prompt: Option<String>,

    #[serde(
        default,
        deserialize_with = "mapping_or_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub agent_loop: Option<AgentLoop>,

    #[serde(flatten)]
    pub extra: Mapping,
}

/// Loop parameters nested under `agent_config.agent_loop`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AgentLoop {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub research_guidelines_prompt: Option<String>,

    #[serde(flatten)]
    pub extra: Mapping,
}

/// Where a node input is read from: a document input or another node's output.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum SourceRef {
    Inputs { field: String },
    Node { node: String, field: String },
}

impl SourceRef {
    /// Reference to a declared document input (`__inputs__#<field>`).
    pub fn input(field: impl Into<String>) -> Self {
        Self::Inputs {
            field: field.into(),
        }
    }

    /// Reference to another node's output field (`<node>#<field>`).
    pub fn node(node: impl Into<String>, field: impl Into<String>) -> Self {
        Self::Node {
            node: node.into(),
            field: field.into(),
        }
    }
}

impl TryFrom<String> for SourceRef {
    type Error = ComposerError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        match raw.split_once('#') {
            Some((INPUTS_SOURCE, field)) => Ok(Self::input(field)),
            Some((node, field)) if !node.is_empty() => Ok(Self::node(node, field)),
            _ => Err(ComposerError::InvalidSourceRef(raw)),
        }
    }
}

impl From<SourceRef> for String {
    fn from(source: SourceRef) -> Self {
        source.to_string()
    }
}

impl fmt::Display for SourceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Inputs { field } => write!(f, "{INPUTS_SOURCE}#{field}"),
            Self::Node { node, field } => write!(f, "{node}#{field}"),
        }
    }
}

/// One element of `tools_config`.
///
/// Anything that is not a well-formed tool entry is kept verbatim so that a
/// hand-edited document survives a load/save cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ToolSlot {
    Tool(ToolEntry),
    Other(Value),
}

impl ToolSlot {
    /// The `name` field of the element, if it has a string one.
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Tool(entry) => Some(&entry.name),
            Self::Other(Value::Mapping(map)) => map.get("name").and_then(Value::as_str),
            Self::Other(_) => None,
        }
    }
}

impl From<ToolEntry> for ToolSlot {
    fn from(entry: ToolEntry) -> Self {
        Self::Tool(entry)
    }
}

/// A capability exposed to the research step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolEntry {
    pub name: String,
    pub description: String,
    #[serde(flatten)]
    pub body: ToolBody,

    /// Keys the composer does not model, kept as written.
    #[serde(flatten)]
    pub extra: Mapping,
}

impl ToolEntry {
    pub fn new(name: impl Into<String>, description: impl Into<String>, body: ToolBody) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            body,
            extra: Mapping::new(),
        }
    }
}

/// Direct tools wrap one step; composite tools wrap a whole sub-graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolBody {
    StepConfig(StepRef),
    GraphConfig(Box<WorkflowDocument>),
}

/// The single step behind a direct tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepRef {
    #[serde(rename = "type")]
    pub step_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<Mapping>,

    #[serde(flatten)]
    pub extra: Mapping,
}

impl StepRef {
    pub fn new(step_type: impl Into<String>, config: Option<Mapping>) -> Self {
        Self {
            step_type: step_type.into(),
            config,
            extra: Mapping::new(),
        }
    }
}

fn mapping_or_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: serde::de::DeserializeOwned,
{
    match Value::deserialize(deserializer)? {
        value @ Value::Mapping(_) => serde_yaml::from_value(value)
            .map(Some)
            .map_err(serde::de::Error::custom),
        _ => Ok(None),
    }
}

fn sequence_or_none<'de, D>(deserializer: D) -> Result<Option<Vec<ToolSlot>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        value @ Value::Sequence(_) => serde_yaml::from_value(value)
            .map(Some)
            .map_err(serde::de::Error::custom),
        _ => Ok(None),
    }
}
