use serenity::all::{Context, Message, Ready};
use serenity::async_trait;
use serenity::prelude::EventHandler;
use std::sync::Arc;

use super::dispatch::{ChannelDispatcher, MessageHandler};

pub mod message;
pub mod ready;

/// Discord bot event handler
pub struct Handler {
    pub dispatcher: ChannelDispatcher,
    /// Text prefix marking commands, e.g. `!wtm`
    pub command_prefix: String,
}

impl Handler {
    pub fn new(message_handler: Arc<dyn MessageHandler>, command_prefix: String) -> Self {
        Self {
            dispatcher: ChannelDispatcher::new(message_handler),
            command_prefix,
        }
    }
}

#[async_trait]
impl EventHandler for Handler {
    /// Called when the bot is ready and connected to Discord
    async fn ready(&self, ctx: Context, ready: Ready) {
        ready::handle_ready(ctx, ready).await;
    }

    /// Called when a message is sent in a channel the bot can read
    async fn message(&self, ctx: Context, message: Message) {
        message::handle_message(&self.dispatcher, &self.command_prefix, ctx, message).await;
    }
}
