//! Guild slash commands: definitions, parsing and dispatch.

use serenity::builder::{CreateCommand, CreateCommandOption};
use serenity::model::application::CommandOptionType;
use thiserror::Error;
use tracing::{debug, warn};

use crate::common::{CommandReply, Invocation, ReplyField, ReplyKind, LONG_EXPIRY};
use crate::domains::catalog::{actions, CATEGORIES};
use crate::kernel::{audit_log, BotDeps};

pub const HELP: &str = "help";
pub const ADD_RESOURCE: &str = "add_resource";
pub const GET_RESOURCES: &str = "get_resources";

/// A parsed command invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BotCommand {
    Help,
    AddResource { url: String, category: String },
    GetResources { category: Option<String> },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandParseError {
    #[error("unknown command '{0}'")]
    UnknownCommand(String),

    #[error("missing required option '{0}'")]
    MissingOption(&'static str),
}

impl BotCommand {
    /// Parse a command name and its string options.
    pub fn parse(name: &str, options: &[(String, String)]) -> Result<Self, CommandParseError> {
        let option = |key: &str| {
            options
                .iter()
                .find(|(name, _)| name == key)
                .map(|(_, value)| value.clone())
        };

        match name {
            HELP => Ok(BotCommand::Help),
            ADD_RESOURCE => Ok(BotCommand::AddResource {
                url: option("url").ok_or(CommandParseError::MissingOption("url"))?,
                category: option("category").ok_or(CommandParseError::MissingOption("category"))?,
            }),
            GET_RESOURCES => Ok(BotCommand::GetResources {
                category: option("category"),
            }),
            other => Err(CommandParseError::UnknownCommand(other.to_string())),
        }
    }
}

/// Parse and run one invocation. Always produces a reply.
pub async fn handle(
    name: &str,
    options: &[(String, String)],
    user_name: &str,
    deps: &BotDeps,
) -> CommandReply {
    let invocation = Invocation::new(user_name, name);
    debug!("{}", invocation.describe());

    match BotCommand::parse(name, options) {
        Ok(command) => dispatch(command, &invocation, deps).await,
        Err(e) => {
            warn!(error = %e, command = %name, "Malformed command");
            audit_log(
                deps.audit.as_ref(),
                &format!("{} Wrong command.", invocation.describe()),
            )
            .await;
            CommandReply::error("Wrong command.")
        }
    }
}

pub async fn dispatch(command: BotCommand, invocation: &Invocation, deps: &BotDeps) -> CommandReply {
    match command {
        BotCommand::Help => help_reply(),
        BotCommand::AddResource { url, category } => {
            actions::add_resource(&url, &category, invocation, deps).await
        }
        BotCommand::GetResources { category } => {
            actions::get_resources(category.as_deref(), invocation, deps).await
        }
    }
}

/// Static bilingual command listing
pub fn help_reply() -> CommandReply {
    let field = |name: &str, value: &str| ReplyField {
        name: name.to_string(),
        value: value.to_string(),
    };

    CommandReply {
        kind: ReplyKind::Help,
        title: Some(ReplyKind::Help.field_title().to_string()),
        fields: vec![
            field(
                "**🇬🇧 AVAILABLE COMMANDS**",
                "Chatbot's messages will disappear after a few seconds \
                 (it can take 20 to 60 sec depending on the command used).",
            ),
            field("**/add_resource**", "*Index a resource's link.*"),
            field(
                "**/get_resources**",
                "*Display all resources or only those matching category.*",
            ),
            field(
                "**🇫🇷 COMMANDES DISPONIBLES**",
                "*Les messages de Chatbot disparaissent après quelques secondes \
                 (après 20 à 60 sec selon les commandes).*",
            ),
            field("**/add_resource**", "*Enregistre le lien d'une ressource.*"),
            field(
                "**/get_resources**",
                "*Affiche toutes les ressources ou la catégorie sélectionnée.*",
            ),
        ],
        expires_after: LONG_EXPIRY,
    }
}

fn category_option(description: &str) -> CreateCommandOption {
    CATEGORIES.iter().fold(
        CreateCommandOption::new(CommandOptionType::String, "category", description),
        |option, entry| option.add_string_choice(entry.label, entry.value),
    )
}

/// Command definitions registered on the guild
pub fn definitions() -> Vec<CreateCommand> {
    vec![
        CreateCommand::new(HELP).description("Show available commands."),
        CreateCommand::new(ADD_RESOURCE)
            .description("Index a resource's link.")
            .add_option(
                CreateCommandOption::new(
                    CommandOptionType::String,
                    "url",
                    "The link starting with 'http(s)://'",
                )
                .required(true),
            )
            .add_option(category_option("The category").required(true)),
        CreateCommand::new(GET_RESOURCES)
            .description("Display resources matching provided category.")
            .add_option(category_option("The resource's category")),
    ]
}
