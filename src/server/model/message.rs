use serenity::all::{ChannelId, MessageId, UserId};

use super::command::MessageKind;

/// A chat message handed from the Discord adapter to the round controller.
///
/// Bot-authored messages never become an `IncomingMessage`. The text is kept as typed;
/// `kind` tells whether it was addressed to the bot.
#[derive(Debug, Clone, PartialEq)]
pub struct IncomingMessage {
    /// Channel the message was posted in.
    pub channel_id: ChannelId,
    /// ID of the message itself, used for reactions.
    pub message_id: MessageId,
    /// Author's Discord user ID.
    pub author_id: UserId,
    /// Author's display name, used when congratulating.
    pub author_name: String,
    /// Raw message text.
    pub content: String,
    /// Command or plain text.
    pub kind: MessageKind,
}
