use anyhow::Result;
use clap::Parser;
use tracing::warn;

use hotelwatch::application::{Cli, CommandExecutor};
use hotelwatch::shared::config::ConfigLoader;
use hotelwatch::shared::types::TrackerConfig;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();
    let cli = Cli::parse();

    // Priority: explicit --config > Config.toml in cwd > built-in defaults
    let config = if let Some(config_path) = &cli.config {
        ConfigLoader::load_from(config_path)?
    } else {
        ConfigLoader::load_config().unwrap_or_else(|e| {
            warn!("Using default configuration: {}", e);
            TrackerConfig::default()
        })
    };

    CommandExecutor::execute(cli.command, config).await?;
    Ok(())
}
