//! `agent init` - register a local name for an existing remote agent.

use anyhow::{bail, Context, Result};
use chrono::Utc;
use clap::Args;
use serde::Serialize;
use tracing::info;

use crate::cli::context::CommandContext;
use crate::cli::output::progress::SpinnerGuard;
use crate::cli::output::{output, CommandOutput};
use crate::domain::models::agent_entry::{validate_agent_name, AgentEntry};
use crate::domain::models::config::Config;
use crate::domain::models::ToolKind;
use crate::services::composer;
use crate::services::sync::content_hash;

#[derive(Args, Debug)]
pub struct InitArgs {
    /// Local agent name (used as the YAML file stem)
    pub name: String,

    /// ID of the remote agent to manage
    #[arg(long)]
    pub agent_id: String,

    /// Datastore ID; defaults to the agent's first datastore
    #[arg(long)]
    pub datastore_id: Option<String>,

    /// Tool type to enable (repeatable)
    #[arg(short, long = "tool", value_name = "KIND")]
    pub tools: Vec<ToolKind>,

    /// Overwrite an existing registry entry and YAML file
    #[arg(short, long)]
    pub force: bool,
}

#[derive(Debug, Serialize)]
pub struct InitOutput {
    pub name: String,
    pub agent_id: String,
    pub datastore_id: String,
    pub yaml_path: String,
    pub tools: Vec<ToolKind>,
}

impl CommandOutput for InitOutput {
    fn to_human(&self) -> String {
        format!(
            "Wrote {}\nAgent {:?} is ready. Use `agent add {} <tool>` to add tools and `agent run {} \"<query>\"` to run.",
            self.yaml_path, self.name, self.name, self.name
        )
    }
}

pub async fn execute(args: InitArgs, config: Config, json_mode: bool) -> Result<()> {
    let ctx = CommandContext::new(config)?;
    let name = validate_agent_name(&args.name)?.to_string();
    let agent_id = args.agent_id.trim().to_string();
    if agent_id.is_empty() {
        bail!("--agent-id cannot be empty");
    }

    if !args.force && ctx.store.get(&name)?.is_some() {
        bail!("agent {name:?} already exists; pass --force to overwrite");
    }

    let client = ctx.api_client()?;
    let spinner = SpinnerGuard::start(format!("Linking {name} to {agent_id}..."), json_mode);

    let metadata = client
        .get_agent_metadata(&agent_id)
        .await
        .context("get agent metadata")?;
    let datastore_id = args
        .datastore_id
        .or_else(|| metadata.datastore_ids.first().cloned())
        .unwrap_or_default();

    let yaml = composer::compose(&args.tools).context("Failed to compose workflow")?;
    client
        .modify_agent(&agent_id, yaml.trim())
        .await
        .context("sync YAML to cloud")?;

    drop(spinner);

    std::fs::create_dir_all(ctx.store.dir())
        .with_context(|| format!("Failed to create {}", ctx.store.dir().display()))?;
    let yaml_path = ctx.store.agent_yaml_path(&name);
    std::fs::write(&yaml_path, &yaml)
        .with_context(|| format!("write YAML: {}", yaml_path.display()))?;

    let file_name = format!("{name}.yaml");
    ctx.store
        .set(
            &name,
            AgentEntry {
                agent_id: agent_id.clone(),
                datastore_id: datastore_id.clone(),
                default_datastore_name: format!("{name}-default"),
                yaml_path: file_name,
                last_synced_at: Utc::now(),
                local_yaml_hash: Some(content_hash(&yaml)),
            },
        )
        .context("save config")?;
    info!(agent = %name, agent_id = %agent_id, remote_name = %metadata.name, "agent initialized");

    output(
        &InitOutput {
            name,
            agent_id,
            datastore_id,
            yaml_path: yaml_path.display().to_string(),
            tools: args.tools,
        },
        json_mode,
    );
    Ok(())
}
