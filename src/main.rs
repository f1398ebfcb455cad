//! Agent Composer CLI entry point.

use clap::Parser;

use agent_composer::cli::{commands, handle_error, Cli, Commands};
use agent_composer::infrastructure::config::ConfigLoader;
use agent_composer::infrastructure::logging::LoggerImpl;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match ConfigLoader::load(cli.config_dir.as_deref()) {
        Ok(config) => config,
        Err(err) => handle_error(err, cli.json),
    };

    let _logger = match LoggerImpl::init(&config.logging) {
        Ok(logger) => logger,
        Err(err) => handle_error(err, cli.json),
    };

    let result = match cli.command {
        Commands::Tools(args) => commands::tools::execute(args, cli.json).await,
        Commands::Compose(args) => commands::compose::execute(args, cli.json).await,
        Commands::Init(args) => commands::init::execute(args, config, cli.json).await,
        Commands::Add(args) => commands::add::execute(args, config, cli.json).await,
        Commands::Run(args) => commands::run::execute(args, config, cli.json).await,
        Commands::Show(args) => commands::show::execute(args, config, cli.json).await,
    };

    if let Err(err) = result {
        handle_error(err, cli.json);
    }
}
