//! `agent run` - sync the workflow if needed, then stream a query.

use anyhow::{bail, Context, Result};
use clap::Args;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::cli::context::CommandContext;
use crate::cli::output::progress::SpinnerGuard;
use crate::cli::output::{output, CommandOutput};
use crate::domain::models::agent_entry::AgentEntry;
use crate::domain::models::config::Config;
use crate::infrastructure::api::ApiClient;
use crate::infrastructure::registry::RegistryStore;
use crate::infrastructure::stream::{decode_stream, CallbackHandler, DecoderOptions, TerminalRenderer};
use crate::services::sync::{needs_push, SyncDecision};

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Agent name
    pub name: String,

    /// Query text; multiple words are joined with spaces
    #[arg(required = true, num_args = 1.., trailing_var_arg = true)]
    pub query: Vec<String>,

    /// Show workflow steps, tool calls and thinking on stderr
    #[arg(short, long)]
    pub verbose: bool,
}

/// Result of bringing the remote workflow up to date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncOutcome {
    /// Local hash unchanged since the last sync; remote not consulted.
    Cached,
    /// Remote already matched the local document.
    InSync,
    /// Local document was pushed.
    Pushed,
}

#[derive(Debug, Serialize)]
pub struct RunOutput {
    pub name: String,
    pub sync: SyncOutcome,
    pub answer: String,
    pub completed: bool,
}

impl CommandOutput for RunOutput {
    fn to_human(&self) -> String {
        self.answer.clone()
    }
}

/// Push the local document when it differs from the remote one.
///
/// Registry write failures after a successful sync are logged, not returned:
/// the next run simply re-checks the remote copy.
pub async fn sync_workflow(
    client: &ApiClient,
    store: &RegistryStore,
    name: &str,
    entry: &mut AgentEntry,
    local_yaml: &str,
) -> Result<SyncOutcome> {
    let local_hash = match SyncDecision::evaluate(entry.local_yaml_hash.as_deref(), local_yaml) {
        SyncDecision::UpToDate => {
            debug!(agent = name, "local workflow unchanged since last sync");
            return Ok(SyncOutcome::Cached);
        }
        SyncDecision::CheckRemote { local_hash } => local_hash,
    };

    let metadata = client
        .get_agent_metadata(&entry.agent_id)
        .await
        .context("get agent metadata")?;

    let outcome = if needs_push(metadata.acl_yaml(), local_yaml) {
        client
            .modify_agent(&entry.agent_id, local_yaml.trim())
            .await
            .context("sync YAML to cloud")?;
        entry.mark_synced(local_hash);
        info!(agent = name, "pushed local workflow");
        SyncOutcome::Pushed
    } else {
        entry.local_yaml_hash = Some(local_hash);
        SyncOutcome::InSync
    };

    if let Err(err) = store.set(name, entry.clone()) {
        warn!(agent = name, error = %err, "failed to record sync state");
    }
    Ok(outcome)
}

pub async fn execute(args: RunArgs, config: Config, json_mode: bool) -> Result<()> {
    let query = args.query.join(" ").trim().to_string();
    if query.is_empty() {
        bail!("query cannot be empty");
    }

    let ctx = CommandContext::new(config)?;
    let (name, mut entry, yaml_path) = ctx.agent(&args.name)?;
    let client = ctx.api_client()?;

    let local_yaml = std::fs::read_to_string(&yaml_path)
        .with_context(|| format!("read local YAML: {}", yaml_path.display()))?;

    let spinner = SpinnerGuard::start("Checking workflow...", json_mode);
    let sync = sync_workflow(&client, &ctx.store, &name, &mut entry, &local_yaml).await?;
    drop(spinner);

    let body = client
        .query_stream(&entry.agent_id, &query)
        .await
        .context("query")?;
    let options = DecoderOptions::verbose(args.verbose);

    if json_mode {
        let mut answer = String::new();
        let mut completed = false;
        let mut handler =
            CallbackHandler::new(|delta: &str| answer.push_str(delta), || completed = true);
        decode_stream(body, options, &mut handler).await?;
        drop(handler);
        output(
            &RunOutput {
                name,
                sync,
                answer,
                completed,
            },
            json_mode,
        );
    } else {
        let mut renderer = TerminalRenderer::stdio();
        let result = decode_stream(body, options, &mut renderer).await;
        renderer.finish();
        result?;
    }
    Ok(())
}
