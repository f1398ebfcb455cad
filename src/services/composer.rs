//! Workflow-document composition.
//!
//! Builds an agent's workflow document from the built-in minimal template and
//! layers tool entries into the `research` node's `tools_config`.
//!
//! Read paths are strict: a missing `nodes`, `nodes.research` or
//! `nodes.research.config` is a [`ComposerError::ConfigShape`]. Write paths
//! create the missing `config`/`agent_config` maps instead of failing.

use std::path::Path;
use std::sync::LazyLock;

use tracing::{debug, info, instrument};

use crate::domain::errors::{ComposerError, ComposerResult};
use crate::domain::models::tool::{SEARCH_DOCS_TOOL, STRUCTURED_RESEARCH_GUIDELINES_PROMPT};
use crate::domain::models::workflow::RESEARCH_NODE;
use crate::domain::models::{
    Node, NodeSlot, StepConfig, ToolEntry, ToolKind, ToolSlot, WorkflowDocument,
};

/// Default workflow with an empty `tools_config`.
pub const MINIMAL_WORKFLOW_YAML: &str = include_str!("templates/minimal_workflow.yaml");

static MINIMAL_WORKFLOW: LazyLock<ComposerResult<WorkflowDocument>> =
    LazyLock::new(|| WorkflowDocument::from_yaml(MINIMAL_WORKFLOW_YAML));

/// A fresh copy of the minimal template.
pub fn minimal_document() -> ComposerResult<WorkflowDocument> {
    match &*MINIMAL_WORKFLOW {
        Ok(doc) => Ok(doc.clone()),
        // The cached error is not cloneable; parse again to hand back an owned one.
        Err(_) => WorkflowDocument::from_yaml(MINIMAL_WORKFLOW_YAML),
    }
}

/// Compose the template with the selected tools and serialize it to YAML.
pub fn compose(selected: &[ToolKind]) -> ComposerResult<String> {
    compose_document(selected)?.to_yaml()
}

/// Compose the template with the selected tools.
///
/// The selection is a set: a kind listed twice is applied once, at its first position.
#[instrument(level = "debug", skip_all, fields(tools = selected.len()))]
pub fn compose_document(selected: &[ToolKind]) -> ComposerResult<WorkflowDocument> {
    let mut doc = minimal_document()?;
    research_tools(&doc)?;
    research_config_mut(&mut doc)?
        .tools_config
        .get_or_insert_with(Vec::new);

    let mut applied: Vec<ToolKind> = Vec::with_capacity(selected.len());
    for &kind in selected {
        if applied.contains(&kind) {
            continue;
        }
        add_tool(&mut doc, kind)?;
        applied.push(kind);
    }
    Ok(doc)
}

/// Add the entries of one tool kind to `tools_config`.
///
/// Only `unstructured-search` is deduplicated (by the `search_docs` name);
/// `web-search` and `structured-search` append again on every call.
pub fn add_tool(doc: &mut WorkflowDocument, kind: ToolKind) -> ComposerResult<()> {
    match kind {
        ToolKind::UnstructuredSearch => {
            if has_tool_by_name(doc, SEARCH_DOCS_TOOL)? {
                info!(tool = SEARCH_DOCS_TOOL, "tool already present, skipping");
                return Ok(());
            }
            append_tool(doc, kind.entries())
        }
        ToolKind::WebSearch => append_tool(doc, kind.entries()),
        ToolKind::StructuredSearch => {
            append_tool(doc, kind.entries())?;
            set_research_guidelines_prompt(doc, STRUCTURED_RESEARCH_GUIDELINES_PROMPT)
        }
    }
}

/// True iff some `tools_config` element has a `name` equal to `name` (case-sensitive).
///
/// Elements that are not tool maps are skipped.
pub fn has_tool_by_name(doc: &WorkflowDocument, name: &str) -> ComposerResult<bool> {
    Ok(research_tools(doc)?
        .iter()
        .any(|slot| slot.name() == Some(name)))
}

/// Names of the tools currently configured, in order.
pub fn tool_names(doc: &WorkflowDocument) -> ComposerResult<Vec<&str>> {
    Ok(research_tools(doc)?
        .iter()
        .filter_map(ToolSlot::name)
        .collect())
}

/// Overwrite `nodes.research.config.agent_config.research_guidelines_prompt`.
pub fn set_research_guidelines_prompt(
    doc: &mut WorkflowDocument,
    prompt: &str,
) -> ComposerResult<()> {
    let config = research_config_mut(doc)?;
    config
        .agent_config
        .get_or_insert_with(Default::default)
        .research_guidelines_prompt = Some(prompt.to_string());
    debug!(chars = prompt.len(), "research guidelines prompt updated");
    Ok(())
}

/// The guidelines prompt the research step will use.
///
/// An explicit `agent_config.research_guidelines_prompt` wins over the
/// template default nested in `agent_config.agent_loop`. Missing `config` or
/// `agent_config` yields an empty string.
pub fn research_guidelines_prompt(doc: &WorkflowDocument) -> ComposerResult<String> {
    let Some(agent_config) = research_node(doc)?
        .config
        .as_ref()
        .and_then(|config| config.agent_config.as_ref())
    else {
        return Ok(String::new());
    };

    let prompt = agent_config
        .research_guidelines_prompt
        .as_deref()
        .or_else(|| {
            agent_config
                .agent_loop
                .as_ref()
                .and_then(|agent_loop| agent_loop.research_guidelines_prompt.as_deref())
        })
        .unwrap_or_default();
    Ok(prompt.to_string())
}

/// `nodes.research.config.tools_config`; an absent list reads as empty.
pub fn research_tools(doc: &WorkflowDocument) -> ComposerResult<&[ToolSlot]> {
    let config = research_node(doc)?
        .config
        .as_ref()
        .ok_or_else(|| ComposerError::shape("nodes.research.config"))?;
    Ok(config.tools_config.as_deref().unwrap_or_default())
}

/// Load a document from disk.
pub fn load_document(path: &Path) -> ComposerResult<WorkflowDocument> {
    let text = std::fs::read_to_string(path).map_err(|source| ComposerError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    WorkflowDocument::from_yaml(&text)
}

/// Serialize a document and write it to disk, returning the written text.
pub fn save_document(path: &Path, doc: &WorkflowDocument) -> ComposerResult<String> {
    let text = doc.to_yaml()?;
    std::fs::write(path, &text).map_err(|source| ComposerError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(text)
}

/// Load, add one tool kind, and save. Returns the new document text.
#[instrument(skip(path), fields(path = %path.display()))]
pub fn add_tool_to_file(path: &Path, kind: ToolKind) -> ComposerResult<String> {
    let mut doc = load_document(path)?;
    add_tool(&mut doc, kind)?;
    save_document(path, &doc)
}

fn research_node(doc: &WorkflowDocument) -> ComposerResult<&Node> {
    doc.nodes
        .as_ref()
        .ok_or_else(|| ComposerError::shape("nodes"))?
        .get(RESEARCH_NODE)
        .and_then(NodeSlot::as_node)
        .ok_or_else(|| ComposerError::shape("nodes.research"))
}

fn research_config_mut(doc: &mut WorkflowDocument) -> ComposerResult<&mut StepConfig> {
    let research = doc
        .nodes
        .as_mut()
        .ok_or_else(|| ComposerError::shape("nodes"))?
        .get_mut(RESEARCH_NODE)
        .and_then(NodeSlot::as_node_mut)
        .ok_or_else(|| ComposerError::shape("nodes.research"))?;
    Ok(research.config.get_or_insert_with(StepConfig::default))
}

fn append_tool(doc: &mut WorkflowDocument, entries: Vec<ToolEntry>) -> ComposerResult<()> {
    // Appending goes through the strict read first, as adding to a document
    // without a research config is a shape error rather than a silent create.
    research_tools(doc)?;
    let tools = research_config_mut(doc)?
        .tools_config
        .get_or_insert_with(Vec::new);
    for entry in entries {
        debug!(tool = %entry.name, "appending tool entry");
        tools.push(entry.into());
    }
    Ok(())
}
