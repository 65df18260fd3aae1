//! Sleuth - HTTP front end for a hosted conversational assistant
//!
#![doc = "Main entry point for the Sleuth server and CLI."]

use anyhow::Result;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use sleuth::cli::{Cli, Commands};
use sleuth::commands;
use sleuth::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse_args();

    init_tracing(cli.verbose, cli.json_logs);

    let config_path = cli.config.as_deref().unwrap_or("config/config.yaml");
    let config = Config::load(config_path, &cli)?;
    config.validate()?;

    match cli.command {
        Commands::Serve { .. } => {
            tracing::info!(
                "Starting server on {}:{}",
                config.server.host,
                config.server.port
            );
            commands::serve::run_serve(config).await
        }
        Commands::Ask { question } => {
            tracing::debug!("Running one-shot question");
            commands::ask::run_ask(config, question).await
        }
        Commands::Assistant => commands::assistant::show_assistant(config).await,
    }
}

/// Initialize tracing subscriber with environment filter
fn init_tracing(verbose: bool, json: bool) {
    let default_directive = if verbose { "sleuth=debug" } else { "sleuth=info" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    let registry = tracing_subscriber::registry().with(env_filter);
    if json {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}
