//! Payload types carried in `data:` lines of the query stream.
//!
//! A payload is a JSON object. Its `event` field is either a string naming a
//! top-level event:
//!
//! ```text
//! data: {"event":"message_delta","data":{"delta":"Hel"}}
//! data: {"event":"error","data":{"message":"rate limited"}}
//! data: {"event":"end"}
//! ```
//!
//! or, for versioned progress reports, a nested object with its own `type`:
//!
//! ```text
//! data: {"version":"1","event":{"type":"step_end","step_id":"research","duration":2.5}}
//! ```

use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

pub(crate) const UNKNOWN_ERROR: &str = "unknown error";

/// Raw shape of one payload. Every field is optional so that unexpected
/// shapes degrade to "no action" instead of a parse failure.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct Payload {
    #[serde(default)]
    pub event: Option<EventField>,
    #[serde(default)]
    pub data: Value,
    #[serde(default)]
    pub version: Value,
}

impl Payload {
    /// A nested progress report carries a non-empty string `version`.
    pub fn is_versioned(&self) -> bool {
        self.version.as_str().is_some_and(|v| !v.is_empty())
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum EventField {
    Name(String),
    Nested(Map<String, Value>),
    Other(Value),
}

/// Top-level events the decoder reacts to.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum TopLevelEvent {
    Metadata(Value),
    MessageDelta(Option<String>),
    Complete,
    Retrievals(Value),
    Error(String),
    End,
    Unrecognized,
}

impl TopLevelEvent {
    pub fn from_parts(name: &str, data: Value) -> Self {
        match name {
            "metadata" => Self::Metadata(data),
            "message_delta" => Self::MessageDelta(
                data.get("delta").and_then(Value::as_str).map(str::to_string),
            ),
            "message_complete" | "outputs" => Self::Complete,
            "retrievals" => Self::Retrievals(data),
            "error" => Self::Error(
                data.get("message")
                    .and_then(Value::as_str)
                    .unwrap_or(UNKNOWN_ERROR)
                    .to_string(),
            ),
            "end" => Self::End,
            _ => Self::Unrecognized,
        }
    }
}

/// Versioned progress report shown in verbose mode.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type")]
pub enum ProgressEvent {
    #[serde(rename = "step_start")]
    StepStart {
        #[serde(default, deserialize_with = "or_default")]
        step_id: String,
    },
    #[serde(rename = "step_end")]
    StepEnd {
        #[serde(default, deserialize_with = "or_default")]
        step_id: String,
        /// Seconds.
        #[serde(default, deserialize_with = "or_default")]
        duration: f64,
    },
    #[serde(rename = "dynamic_thinking_start")]
    ThinkingStart,
    #[serde(rename = "dynamic_thinking_end")]
    ThinkingEnd,
    #[serde(rename = "dynamic_tool_call_created")]
    ToolCallCreated {
        #[serde(default, deserialize_with = "or_default")]
        tool_name: String,
    },
    #[serde(rename = "dynamic_tool_call_end")]
    ToolCallEnd {
        #[serde(default, deserialize_with = "or_default")]
        duration: f64,
    },
    #[serde(rename = "dynamic_response_start")]
    ResponseStart,
}

/// A recognized event is never dropped for one badly typed field; the field
/// falls back to its zero value instead.
fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

impl ProgressEvent {
    /// Parse a nested event object; unknown or malformed types yield `None`.
    pub fn from_object(object: Map<String, Value>) -> Option<Self> {
        serde_json::from_value(Value::Object(object)).ok()
    }

    /// Events that open a new block of output get a blank line before them.
    pub const fn opens_block(&self) -> bool {
        matches!(
            self,
            Self::StepStart { .. }
                | Self::ThinkingStart
                | Self::ToolCallCreated { .. }
                | Self::ResponseStart
        )
    }
}

impl fmt::Display for ProgressEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StepStart { step_id } => write!(f, "[step] {step_id}"),
            Self::StepEnd { step_id, duration } => {
                write!(f, "[step] {step_id} done ({duration:.2}s)")
            }
            Self::ThinkingStart => f.write_str("💭 thinking..."),
            Self::ThinkingEnd => f.write_str("💭 done"),
            Self::ToolCallCreated { tool_name } => write!(f, "🔧 tool: {tool_name}"),
            Self::ToolCallEnd { duration } => write!(f, "🔧 done ({duration:.2}s)"),
            Self::ResponseStart => f.write_str("📝 generating response..."),
        }
    }
}
