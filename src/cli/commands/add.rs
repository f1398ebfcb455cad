//! `agent add` - enable a tool on an agent and push the result.

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use crate::cli::context::CommandContext;
use crate::cli::output::progress::SpinnerGuard;
use crate::cli::output::{output, CommandOutput};
use crate::domain::models::config::Config;
use crate::domain::models::ToolKind;
use crate::services::composer;
use crate::services::sync::content_hash;

#[derive(Args, Debug)]
pub struct AddArgs {
    /// Agent name
    pub name: String,

    /// Tool type: web-search, unstructured-search, structured-search
    pub kind: ToolKind,
}

#[derive(Debug, Serialize)]
pub struct AddOutput {
    pub name: String,
    pub tool: ToolKind,
    pub tools: Vec<String>,
}

impl CommandOutput for AddOutput {
    fn to_human(&self) -> String {
        format!("Added {} and synced to cloud.", self.tool)
    }
}

pub async fn execute(args: AddArgs, config: Config, json_mode: bool) -> Result<()> {
    let ctx = CommandContext::new(config)?;
    let (name, mut entry, yaml_path) = ctx.agent(&args.name)?;
    let client = ctx.api_client()?;

    let yaml = composer::add_tool_to_file(&yaml_path, args.kind)
        .with_context(|| format!("add {}", args.kind))?;
    let tools = composer::tool_names(&composer::load_document(&yaml_path)?)?
        .into_iter()
        .map(str::to_string)
        .collect();

    let spinner = SpinnerGuard::start("Syncing workflow...", json_mode);
    client
        .modify_agent(&entry.agent_id, yaml.trim())
        .await
        .context("sync to cloud")?;
    drop(spinner);

    entry.mark_synced(content_hash(&yaml));
    ctx.store.set(&name, entry)?;

    output(
        &AddOutput {
            name,
            tool: args.kind,
            tools,
        },
        json_mode,
    );
    Ok(())
}
