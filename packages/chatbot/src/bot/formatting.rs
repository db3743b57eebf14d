use serenity::builder::CreateEmbed;
use serenity::model::Colour;

use crate::common::CommandReply;

/// Render a reply as an embed: one non-inline field per reply field.
pub fn embed(reply: &CommandReply) -> CreateEmbed {
    let base = CreateEmbed::new().colour(Colour::new(reply.kind.colour()));
    let base = match &reply.title {
        Some(title) => base.title(title),
        None => base,
    };

    reply
        .fields
        .iter()
        .fold(base, |embed, field| embed.field(&field.name, &field.value, false))
}
