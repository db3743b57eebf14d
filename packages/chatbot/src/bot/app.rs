//! Bot setup: dependency wiring and gateway client.

use std::sync::Arc;

use anyhow::{Context, Result};
use serenity::all::{Client, GatewayIntents};
use serenity::http::Http;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use super::handler::Handler;
use crate::config::Config;
use crate::domains::catalog::CatalogStore;
use crate::kernel::{BotDeps, ChannelAuditSink, DiscordPlatform};

/// Install the global subscriber. `RUST_LOG` wins over `debug`.
pub fn init_tracing(debug: bool) {
    let default_filter = if debug {
        "debug,serenity=warn,sqlx=warn,h2=warn,hyper=warn,rustls=warn,tungstenite=warn"
    } else {
        "info,serenity=warn,sqlx=warn"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Wire the production dependencies around a REST client.
pub fn build_deps(config: &Config, catalog: CatalogStore, http: Arc<Http>) -> BotDeps {
    BotDeps::new(
        config.guild_id,
        catalog,
        Arc::new(DiscordPlatform::new(http.clone())),
        Arc::new(ChannelAuditSink::new(http, config.logs_channel_id)),
        config.reaction_rules(),
    )
}

/// Build the gateway client. Member intents are needed to edit roles.
pub async fn build_client(config: &Config, catalog: CatalogStore) -> Result<Client> {
    let http = Arc::new(Http::new(&config.bot_token));
    let deps = build_deps(config, catalog, http);

    let intents = GatewayIntents::GUILDS
        | GatewayIntents::GUILD_MEMBERS
        | GatewayIntents::GUILD_MESSAGE_REACTIONS;

    Client::builder(&config.bot_token, intents)
        .event_handler(Handler::new(deps))
        .await
        .context("Failed to build Discord client")
}
