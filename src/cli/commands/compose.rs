//! `agent compose` - build a workflow document without touching any agent.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use crate::cli::output::{output, CommandOutput};
use crate::domain::models::ToolKind;
use crate::services::composer;

#[derive(Args, Debug)]
pub struct ComposeArgs {
    /// Tool type to enable (repeatable): web-search, unstructured-search, structured-search
    #[arg(short, long = "tool", value_name = "KIND")]
    pub tools: Vec<ToolKind>,

    /// Write the document to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
pub struct ComposeOutput {
    pub tools: Vec<ToolKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    pub yaml: String,
}

impl CommandOutput for ComposeOutput {
    fn to_human(&self) -> String {
        match &self.path {
            Some(path) => format!("Wrote {}", path.display()),
            None => self.yaml.trim_end().to_string(),
        }
    }
}

pub async fn execute(args: ComposeArgs, json_mode: bool) -> Result<()> {
    let yaml = composer::compose(&args.tools).context("Failed to compose workflow")?;

    if let Some(path) = &args.output {
        std::fs::write(path, &yaml)
            .with_context(|| format!("Failed to write {}", path.display()))?;
    }

    output(
        &ComposeOutput {
            tools: args.tools,
            path: args.output,
            yaml,
        },
        json_mode,
    );
    Ok(())
}
