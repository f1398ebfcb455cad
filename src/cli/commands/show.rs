//! `agent show` - inspect a registered agent.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::Args;
use serde::Serialize;

use crate::cli::context::CommandContext;
use crate::cli::output::{list_table, output, render_list, truncate, CommandOutput};
use crate::domain::models::config::Config;
use crate::domain::models::WorkflowDocument;
use crate::services::composer;
use crate::services::sync::SyncDecision;

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Agent name
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct ShowOutput {
    pub name: String,
    pub agent_id: String,
    pub datastore_id: String,
    pub yaml_path: String,
    pub last_synced_at: DateTime<Utc>,
    /// Whether the local file changed since the last recorded sync.
    pub modified_since_sync: bool,
    pub tools: Vec<String>,
    pub research_guidelines_prompt: String,
}

impl CommandOutput for ShowOutput {
    fn to_human(&self) -> String {
        let mut lines = vec![
            format!("Agent:        {}", self.name),
            format!("Agent ID:     {}", self.agent_id),
            format!("Datastore ID: {}", if self.datastore_id.is_empty() { "-" } else { &self.datastore_id }),
            format!("YAML:         {}", self.yaml_path),
            format!(
                "Last synced:  {}{}",
                self.last_synced_at.format("%Y-%m-%d %H:%M:%S UTC"),
                if self.modified_since_sync { " (local changes pending)" } else { "" }
            ),
            String::new(),
        ];

        let mut table = list_table(&["#", "Tool"]);
        for (i, tool) in self.tools.iter().enumerate() {
            table.add_row(vec![(i + 1).to_string(), tool.clone()]);
        }
        lines.push(render_list("tool", &table, self.tools.len()));

        if !self.research_guidelines_prompt.is_empty() {
            lines.push(String::new());
            let first_line = self.research_guidelines_prompt.lines().next().unwrap_or_default();
            lines.push(format!("Guidelines:   {}", truncate(first_line, 72)));
        }
        lines.join("\n")
    }
}

pub async fn execute(args: ShowArgs, config: Config, json_mode: bool) -> Result<()> {
    let ctx = CommandContext::new(config)?;
    let (name, entry, yaml_path) = ctx.agent(&args.name)?;

    let text = std::fs::read_to_string(&yaml_path)
        .with_context(|| format!("read local YAML: {}", yaml_path.display()))?;
    let doc = WorkflowDocument::from_yaml(&text)
        .with_context(|| format!("parse {}", yaml_path.display()))?;

    let tools = composer::tool_names(&doc)?
        .into_iter()
        .map(str::to_string)
        .collect();
    let research_guidelines_prompt = composer::research_guidelines_prompt(&doc)?;
    let modified_since_sync =
        SyncDecision::evaluate(entry.local_yaml_hash.as_deref(), &text) != SyncDecision::UpToDate;

    output(
        &ShowOutput {
            name,
            agent_id: entry.agent_id,
            datastore_id: entry.datastore_id,
            yaml_path: yaml_path.display().to_string(),
            last_synced_at: entry.last_synced_at,
            modified_since_sync,
            tools,
            research_guidelines_prompt,
        },
        json_mode,
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_human_output_lists_tools() {
        let out = ShowOutput {
            name: "analyst".to_string(),
            agent_id: "ag-1".to_string(),
            datastore_id: String::new(),
            yaml_path: "/tmp/analyst.yaml".to_string(),
            last_synced_at: Utc::now(),
            modified_since_sync: true,
            tools: vec!["web_search".to_string(), "search_docs".to_string()],
            research_guidelines_prompt: "Be thorough.\nCite sources.".to_string(),
        };
        let human = console::strip_ansi_codes(&out.to_human()).to_string();
        assert!(human.contains("Datastore ID: -"));
        assert!(human.contains("(local changes pending)"));
        assert!(human.contains("2 tools:"));
        assert!(human.contains("search_docs"));
        assert!(human.contains("Guidelines:   Be thorough."));
    }
}
