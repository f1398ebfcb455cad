//! Tool kinds that can be attached to an agent, and the tool entries they expand to.

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_yaml::Mapping;

use super::workflow::{
    Node, NodeSlot, SchemaVersion, SourceRef, StepRef, ToolBody, ToolEntry, WorkflowDocument,
    OUTPUTS_NODE,
};

/// Name of the document-search tool; the only kind deduplicated on add.
pub const SEARCH_DOCS_TOOL: &str = "search_docs";
pub const WEB_SEARCH_TOOL: &str = "web_search";
pub const GET_SCHEMA_TOOL: &str = "get_schema";
pub const EXECUTE_SQL_QUERY_TOOL: &str = "execute_sql_query";

/// Reranker model used by the document-search step.
pub const RERANKER_MODEL: &str = "ctxl-rerank-v2-instruct-multilingual-FP8";

/// Capability modules a user can enable on an agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ToolKind {
    WebSearch,
    UnstructuredSearch,
    StructuredSearch,
}

impl ToolKind {
    pub const ALL: [Self; 3] = [
        Self::WebSearch,
        Self::UnstructuredSearch,
        Self::StructuredSearch,
    ];

    /// CLI identifier (`web-search`, ...).
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::WebSearch => "web-search",
            Self::UnstructuredSearch => "unstructured-search",
            Self::StructuredSearch => "structured-search",
        }
    }

    /// One-line description shown by `agent tools --list`.
    pub const fn description(self) -> &'static str {
        match self {
            Self::WebSearch => "Search the web for current information.",
            Self::UnstructuredSearch => "Search uploaded documents (vector + lexical).",
            Self::StructuredSearch => {
                "Query structured datastores (get_schema + execute_sql_query)."
            }
        }
    }

    /// Tool entries this kind contributes, in append order.
    pub fn entries(self) -> Vec<ToolEntry> {
        match self {
            Self::WebSearch => vec![web_search_tool()],
            Self::UnstructuredSearch => vec![unstructured_search_tool()],
            Self::StructuredSearch => vec![get_schema_tool(), execute_sql_query_tool()],
        }
    }
}

impl fmt::Display for ToolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown tool identifier given on the command line.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown tool type {0:?}; use 'agent tools --list' to see options")]
pub struct UnknownToolKind(pub String);

impl FromStr for ToolKind {
    type Err = UnknownToolKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == wanted)
            .ok_or_else(|| UnknownToolKind(s.trim().to_string()))
    }
}

/// `(identifier, description)` pairs for every tool kind, in declaration order.
pub fn catalog() -> Vec<(&'static str, &'static str)> {
    ToolKind::ALL
        .iter()
        .map(|kind| (kind.as_str(), kind.description()))
        .collect()
}

/// Fixed research guidelines installed when structured search is enabled.
pub const STRUCTURED_RESEARCH_GUIDELINES_PROMPT: &str = "\
You have access to the following tools:
- `search_docs` — Search the document datastore. Returns SEARCH_RESULTS with CITE_ID for citation.
- `get_schema()` — Returns schema information for all structured (SQL) tables. Use FIRST before any SQL query.
- `execute_sql_query(sql_query: str)` — Executes SQL and returns results. Input: complete SQL string.

You have access to the following data sources:
1. Document Datastore (Unstructured): Use `search_docs` for documents and text.
2. Structured Datastore (SQL): Use `get_schema()` first to discover tables/columns, then `execute_sql_query` for queries.

## Research Strategy
- For structured data: call `get_schema()` first, then `execute_sql_query` with complete SQL.
- For documents: use `search_docs`.
- Use both when the question needs numbers from SQL and context from documents.
";

/// `web_search`: a single `WebSearchStep` with no step config.
pub fn web_search_tool() -> ToolEntry {
    ToolEntry::new(
        WEB_SEARCH_TOOL,
        "Search the web for current information. Use for live data, recent events, \
         and facts not in uploaded documents.\n",
        ToolBody::StepConfig(StepRef::new("WebSearchStep", None)),
    )
}

/// `search_docs`: hybrid lexical/semantic search over uploaded documents.
pub fn unstructured_search_tool() -> ToolEntry {
    let mut config = Mapping::new();
    config.insert("top_k".into(), 50.into());
    config.insert("lexical_alpha".into(), 0.1.into());
    config.insert("semantic_alpha".into(), 0.9.into());
    config.insert("reranker".into(), RERANKER_MODEL.into());
    config.insert("rerank_top_k".into(), 12.into());
    config.insert("reranker_score_filter_threshold".into(), 0.2.into());

    ToolEntry::new(
        SEARCH_DOCS_TOOL,
        "Search the datastore containing user-uploaded documents. Use for relevant \
         chunks from uploaded documents.\n",
        ToolBody::StepConfig(StepRef::new("SearchUnstructuredDataStep", Some(config))),
    )
}

/// `get_schema`: composite tool returning the schemas of structured datastores.
pub fn get_schema_tool() -> ToolEntry {
    let step = Node::new("GetStructuredDatastoreSchemaStep");
    let outputs = Node::new("output").with_input("schemas", SourceRef::node(GET_SCHEMA_TOOL, "schemas"));

    ToolEntry::new(
        GET_SCHEMA_TOOL,
        "Get schema information from structured datastores (tables, databases). \
         Use this first before writing SQL.\n",
        ToolBody::GraphConfig(Box::new(sub_graph(
            &[],
            &[("schemas", "Dict[str, Dict[str, Any]]")],
            GET_SCHEMA_TOOL,
            step,
            outputs,
        ))),
    )
}

/// `execute_sql_query`: composite tool running one SQL string against structured datastores.
pub fn execute_sql_query_tool() -> ToolEntry {
    let step = Node::new("QueryStructuredDatastoreStep")
        .with_input("sql_query", SourceRef::input("sql_query"));
    let outputs = Node::new("output")
        .with_ui_output("retrievals")
        .with_input(
            "retrievals",
            SourceRef::node(EXECUTE_SQL_QUERY_TOOL, "retrievals"),
        );

    ToolEntry::new(
        EXECUTE_SQL_QUERY_TOOL,
        "Execute SQL queries against structured datastores. Provide complete SQL \
         query strings.\nExamples: \"SELECT * FROM t LIMIT 10\", \"SELECT COUNT(*) FROM t\"\n",
        ToolBody::GraphConfig(Box::new(sub_graph(
            &[("sql_query", "str")],
            &[("retrievals", "Retrievals")],
            EXECUTE_SQL_QUERY_TOOL,
            step,
            outputs,
        ))),
    )
}

fn sub_graph(
    inputs: &[(&str, &str)],
    outputs: &[(&str, &str)],
    step_name: &str,
    step: Node,
    outputs_node: Node,
) -> WorkflowDocument {
    let pairs = |items: &[(&str, &str)]| -> IndexMap<String, String> {
        items
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    };

    let mut nodes: IndexMap<String, NodeSlot> = IndexMap::new();
    nodes.insert(step_name.to_string(), step.into());
    nodes.insert(OUTPUTS_NODE.to_string(), outputs_node.into());

    WorkflowDocument {
        version: Some(SchemaVersion::Text("0.1".to_string())),
        inputs: pairs(inputs),
        outputs: pairs(outputs),
        nodes: Some(nodes),
        extra: Mapping::new(),
    }
}
