//! Posting to chat channels.

use serenity::all::{
    ChannelId, CreateAttachment, CreateEmbed, CreateMessage, MessageId, ReactionType,
};
use serenity::async_trait;
use serenity::http::Http;
use std::sync::Arc;

use crate::server::{error::platform::PlatformError, model::shot::ShotImage};

/// Embed color of posted stills.
const SHOT_EMBED_COLOR: u32 = 0xf1c40f;

/// Outgoing side of the chat platform.
///
/// Failures are returned as is; implementations do not retry.
#[async_trait]
pub trait ChatAdapter: Send + Sync {
    /// Posts a still image with a caption.
    async fn post_image(
        &self,
        channel_id: ChannelId,
        image: &ShotImage,
        caption: &str,
    ) -> Result<(), PlatformError>;

    /// Posts a text message.
    async fn post_text(&self, channel_id: ChannelId, text: &str) -> Result<(), PlatformError>;

    /// Adds a unicode emoji reaction to a message.
    async fn react(
        &self,
        channel_id: ChannelId,
        message_id: MessageId,
        emoji: &str,
    ) -> Result<(), PlatformError>;
}

/// `ChatAdapter` backed by Serenity's HTTP client.
pub struct DiscordChat {
    http: Arc<Http>,
}

impl DiscordChat {
    pub fn new(http: Arc<Http>) -> Self {
        Self { http }
    }
}

#[async_trait]
impl ChatAdapter for DiscordChat {
    /// Uploads the still as an attachment and shows it inside an embed.
    async fn post_image(
        &self,
        channel_id: ChannelId,
        image: &ShotImage,
        caption: &str,
    ) -> Result<(), PlatformError> {
        let attachment = CreateAttachment::bytes(image.data.clone(), image.filename.clone());
        let embed = CreateEmbed::new()
            .description(caption)
            .image(format!("attachment://{}", image.filename))
            .color(SHOT_EMBED_COLOR);
        let message = CreateMessage::new().embed(embed).add_file(attachment);

        channel_id.send_message(&self.http, message).await?;

        Ok(())
    }

    async fn post_text(&self, channel_id: ChannelId, text: &str) -> Result<(), PlatformError> {
        if text.trim().is_empty() {
            return Err(PlatformError::Rejected("message text is empty".to_string()));
        }

        let message = CreateMessage::new().content(text);
        channel_id.send_message(&self.http, message).await?;

        Ok(())
    }

    async fn react(
        &self,
        channel_id: ChannelId,
        message_id: MessageId,
        emoji: &str,
    ) -> Result<(), PlatformError> {
        channel_id
            .create_reaction(
                &self.http,
                message_id,
                ReactionType::Unicode(emoji.to_string()),
            )
            .await?;

        Ok(())
    }
}
