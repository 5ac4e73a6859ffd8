//! Discord integration for the quiz bot.
//!
//! Incoming side: the `Handler` receives gateway messages, drops those written by bots,
//! classifies the rest as commands or plain text and hands them to the
//! `ChannelDispatcher`, which feeds each channel's messages to the round controller one
//! at a time and in arrival order. Outgoing side: the `ChatAdapter` trait, implemented by
//! `DiscordChat` on top of Serenity's HTTP client, posts stills, text and reactions.
//!
//! # Gateway Intents
//!
//! The bot requires the following gateway intents:
//! - `GUILD_MESSAGES` - Receive messages posted in guild channels
//! - `DIRECT_MESSAGES` - Receive messages sent to the bot directly
//! - `MESSAGE_CONTENT` - Read message text (privileged intent)
//!
//! Note: `MESSAGE_CONTENT` is a privileged intent and must be explicitly enabled
//! in the Discord Developer Portal for the bot application.

pub mod chat;
pub mod dispatch;
pub mod handler;
pub mod start;
