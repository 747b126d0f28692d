//! Command implementations

mod config;
mod export_status;
mod listing;
mod scenes;

use crate::cli::{Cli, Commands};
use crate::errors::{config_file_invalid, from_radiant};
use crate::output::OutputWriter;
use anyhow::{Context, Result};
use radiant_client::Client;
use radiant_core::config::{CliConfigOverrides, LayeredConfig};

/// Execute a CLI command
pub fn execute(cli: Cli) -> Result<()> {
    let output = OutputWriter::new(cli.json);
    let config = load_config(&cli)?;

    match cli.command {
        Commands::Config => config::execute(&config, &output),
        Commands::Projects(args) => listing::projects(&connect(&config)?, args, &output),
        Commands::Exports => listing::exports(&connect(&config)?, &output),
        Commands::Analyses => listing::analyses(&connect(&config)?, &output),
        Commands::Datasources => listing::datasources(&connect(&config)?, &output),
        Commands::Shapes => listing::shapes(&connect(&config)?, &output),
        Commands::MapTokens => listing::map_tokens(&connect(&config)?, &output),
        Commands::Scenes(args) => scenes::search(&connect(&config)?, args, &output),
        Commands::FillAoi(args) => scenes::fill_aoi(&connect(&config)?, args, &output),
        Commands::ExportStatus(args) => export_status::execute(&connect(&config)?, args, &output),
    }
}

/// Defaults < config file < environment < command-line flags
fn load_config(cli: &Cli) -> Result<LayeredConfig> {
    let mut config = LayeredConfig::with_defaults();

    if let Some(path) = &cli.config {
        config = config.load_from_file(path).map_err(|e| config_file_invalid(path, &e))?;
    }

    let mut config = config.load_from_env();
    config.update_from_cli(CliConfigOverrides {
        host: cli.host.clone(),
        ..Default::default()
    });

    Ok(config)
}

fn connect(config: &LayeredConfig) -> Result<Client> {
    tracing::debug!(host = %config.host.value, "Connecting");
    Client::new(config)
        .map_err(from_radiant)
        .with_context(|| format!("Failed to connect to {}", config.base_url()))
}
