//! CLI type definitions
//!
//! This module contains clap command structures that define the CLI interface.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use super::commands::{
    add::AddArgs, compose::ComposeArgs, init::InitArgs, run::RunArgs, show::ShowArgs,
    tools::ToolsArgs,
};

#[derive(Parser, Debug)]
#[command(name = "agent")]
#[command(about = "Agent Composer - build research agents from the terminal", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,

    /// Directory holding config.yaml, configs.json and agent YAML files
    #[arg(long, global = true, value_name = "DIR")]
    pub config_dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List available tool types
    Tools(ToolsArgs),

    /// Compose a workflow document from a tool selection
    Compose(ComposeArgs),

    /// Link a local agent name to an existing remote agent
    Init(InitArgs),

    /// Add a tool to an agent's workflow and sync it
    Add(AddArgs),

    /// Run a query against an agent, streaming the answer
    Run(RunArgs),

    /// Show an agent's registry entry and workflow summary
    Show(ShowArgs),
}
