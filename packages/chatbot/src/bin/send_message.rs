//! Post the contents of a file to a channel with the bot account.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chatbot_core::bot::init_tracing;
use chatbot_core::common::ChannelId;
use clap::Parser;
use serenity::builder::CreateMessage;
use serenity::http::Http;
use serenity::model::channel::MessageFlags;
use serenity::model::id as discord_id;

#[derive(Parser)]
#[command(name = "send_message")]
#[command(about = "Send message to given channel with Discord bot.")]
struct Cli {
    /// Display debug logs
    #[arg(short, long)]
    debug: bool,

    /// ID of the channel to send the message to
    channel_id: ChannelId,

    /// Path to the file that contains the message content (example: markdown or text)
    filepath: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    let _ = dotenvy::dotenv();
    let token = std::env::var("BOT_TOKEN").context("BOT_TOKEN must be set")?;

    let content = std::fs::read_to_string(&cli.filepath)
        .with_context(|| format!("Failed to read {}", cli.filepath.display()))?;

    let http = Http::new(&token);
    let message = CreateMessage::new()
        .content(content)
        .flags(MessageFlags::SUPPRESS_EMBEDS);

    let sent = discord_id::ChannelId::new(cli.channel_id.get())
        .send_message(&http, message)
        .await
        .with_context(|| format!("Failed to send message to channel {}", cli.channel_id))?;

    tracing::info!(channel_id = %cli.channel_id, message_id = %sent.id, "Message sent");
    Ok(())
}
