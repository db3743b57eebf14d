// Main entry point for the Discord bot

use std::path::PathBuf;

use anyhow::{Context, Result};
use chatbot_core::bot::{build_client, init_tracing};
use chatbot_core::domains::catalog::CatalogStore;
use chatbot_core::Config;
use clap::Parser;

#[derive(Parser)]
#[command(name = "chatbot")]
#[command(about = "Training resources Discord bot. Set BOT_TOKEN and SERVER_ID in .env.")]
struct Cli {
    /// Display debug logs
    #[arg(short, long)]
    debug: bool,

    /// SQLite database filename
    #[arg(short = 'f', long, value_name = "filename.db", default_value = "logs/resources.db")]
    database_file: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!("Configuration loaded");

    let catalog = CatalogStore::connect(&cli.database_file)
        .await
        .with_context(|| format!("Failed to open catalog {}", cli.database_file.display()))?;
    tracing::info!("Catalog ready");

    let mut client = build_client(&config, catalog).await?;

    tracing::info!(guild_id = %config.guild_id, "Starting bot");
    client.start().await.context("Discord client error")?;

    Ok(())
}
