//! Gateway event handler.
//!
//! serenity runs each handler call on its own task, so a slow platform call or
//! a reply waiting for its expiry never holds up other events.

use serenity::all::{
    Context, CreateInteractionResponse, CreateInteractionResponseMessage, EventHandler,
    Interaction, Reaction, Ready, ResolvedValue,
};
use serenity::model::id as discord_id;
use tracing::{debug, error, info, warn};

use super::{commands, formatting};
use crate::domains::reactions::ReactionChange;
use crate::kernel::{normalize_reaction, BotDeps};

pub struct Handler {
    deps: BotDeps,
}

impl Handler {
    pub fn new(deps: BotDeps) -> Self {
        Self { deps }
    }

    async fn on_reaction(&self, reaction: Reaction, change: ReactionChange) {
        let Some(event) = normalize_reaction(&reaction, change) else {
            return;
        };

        if event.guild_id != self.deps.guild_id {
            debug!(guild_id = %event.guild_id, "Ignoring reaction from another guild");
            return;
        }

        self.deps.reaction_executor().process(&event).await;
    }
}

#[serenity::async_trait]
impl EventHandler for Handler {
    async fn ready(&self, ctx: Context, ready: Ready) {
        let guild_id = discord_id::GuildId::new(self.deps.guild_id.get());

        match guild_id.set_commands(&ctx.http, commands::definitions()).await {
            Ok(registered) => info!(count = registered.len(), "Registered guild commands"),
            Err(e) => error!(error = %e, "Failed to register guild commands"),
        }

        info!("Bot '{}' connected.", ready.user.name);
    }

    async fn reaction_add(&self, _ctx: Context, reaction: Reaction) {
        self.on_reaction(reaction, ReactionChange::Added).await;
    }

    async fn reaction_remove(&self, _ctx: Context, reaction: Reaction) {
        self.on_reaction(reaction, ReactionChange::Removed).await;
    }

    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        let Interaction::Command(command) = interaction else {
            return;
        };

        let options: Vec<(String, String)> = command
            .data
            .options()
            .into_iter()
            .filter_map(|option| match option.value {
                ResolvedValue::String(value) => Some((option.name.to_string(), value.to_string())),
                _ => None,
            })
            .collect();

        let reply = commands::handle(&command.data.name, &options, &command.user.name, &self.deps).await;

        let response = CreateInteractionResponse::Message(
            CreateInteractionResponseMessage::new()
                .embed(formatting::embed(&reply))
                .ephemeral(true),
        );

        if let Err(e) = command.create_response(&ctx.http, response).await {
            warn!(error = %e, command = %command.data.name, "Failed to send command reply");
            return;
        }

        tokio::time::sleep(reply.expires_after).await;

        if let Err(e) = command.delete_response(&ctx.http).await {
            debug!(error = %e, "Reply already gone");
        }
    }
}
