use serenity::all::{Context, Message};

use crate::server::{
    bot::dispatch::ChannelDispatcher,
    model::{command::MessageKind, message::IncomingMessage},
};

/// Handles message creation in a channel.
///
/// Ignores messages written by bots, including this one. Everything else is classified
/// against the command prefix and the bot's own mention and queued for its channel.
pub async fn handle_message(
    dispatcher: &ChannelDispatcher,
    command_prefix: &str,
    ctx: Context,
    message: Message,
) {
    if message.author.bot {
        return;
    }

    let bot_id = ctx.cache.current_user().id.get();
    let kind = MessageKind::classify(&message.content, command_prefix, Some(bot_id));

    if let MessageKind::Command(command) = &kind {
        tracing::debug!(
            "Command {:?} from {} in channel {}",
            command,
            message.author.name,
            message.channel_id
        );
    }

    let incoming = IncomingMessage {
        channel_id: message.channel_id,
        message_id: message.id,
        author_id: message.author.id,
        author_name: message.author.display_name().to_string(),
        content: message.content,
        kind,
    };

    dispatcher.dispatch(incoming).await;
}
