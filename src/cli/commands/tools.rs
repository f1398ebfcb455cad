//! `agent tools` - the tool catalog.

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use crate::cli::output::{list_table, output, render_list, CommandOutput};
use crate::domain::models::tool::catalog;

#[derive(Args, Debug)]
pub struct ToolsArgs {
    /// List available tool types
    #[arg(short, long)]
    pub list: bool,
}

#[derive(Debug, Serialize)]
pub struct ToolInfo {
    pub name: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ToolCatalogOutput {
    pub tools: Vec<ToolInfo>,
}

impl Default for ToolCatalogOutput {
    fn default() -> Self {
        Self {
            tools: catalog()
                .into_iter()
                .map(|(name, description)| ToolInfo { name, description })
                .collect(),
        }
    }
}

impl CommandOutput for ToolCatalogOutput {
    fn to_human(&self) -> String {
        let mut table = list_table(&["Tool", "Description"]);
        for tool in &self.tools {
            table.add_row(vec![tool.name, tool.description]);
        }
        render_list("tool type", &table, self.tools.len())
    }
}

#[derive(Debug, Serialize)]
struct ToolsHint {
    message: &'static str,
}

impl CommandOutput for ToolsHint {
    fn to_human(&self) -> String {
        self.message.to_string()
    }
}

pub async fn execute(args: ToolsArgs, json_mode: bool) -> Result<()> {
    if args.list {
        output(&ToolCatalogOutput::default(), json_mode);
    } else {
        output(
            &ToolsHint {
                message: "Use --list to see available tool types: agent tools --list",
            },
            json_mode,
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_output_is_ordered() {
        let out = ToolCatalogOutput::default();
        let names: Vec<_> = out.tools.iter().map(|t| t.name).collect();
        assert_eq!(names, ["web-search", "unstructured-search", "structured-search"]);

        let json = out.to_json();
        assert_eq!(
            json["tools"][0]["description"],
            "Search the web for current information."
        );
        assert!(out.to_human().contains("unstructured-search"));
    }
}
