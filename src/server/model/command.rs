//! Bot command parsing.
//!
//! A message is a command when it starts with the configured text prefix (`!wtm start`)
//! or with a mention of the bot (`@WhatTheMovie start`). Everything else is plain text,
//! which the controller treats as a guess when a round is active.

use thiserror::Error;

use super::difficulty::{Difficulty, UnknownDifficulty};

/// A recognized bot command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// `start` / `quiz`, with an optional difficulty argument.
    Start { difficulty: Option<Difficulty> },
    /// Reveal the answer and end the round.
    Skip,
    /// End the round without revealing.
    Stop,
    /// List available commands.
    Help,
}

/// A message addressed to the bot that is not a valid command.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CommandError {
    /// The command name is not known.
    #[error("Unknown command '{0}'")]
    Unknown(String),

    /// `start` was given a difficulty that does not exist.
    #[error(transparent)]
    InvalidDifficulty(#[from] UnknownDifficulty),
}

/// Classification of an incoming message.
#[derive(Debug, Clone, PartialEq)]
pub enum MessageKind {
    /// A valid command addressed to the bot.
    Command(Command),
    /// Addressed to the bot but not understood.
    InvalidCommand(CommandError),
    /// Anything else; a guess when a round is active.
    Text,
}

impl MessageKind {
    /// Classifies a message.
    ///
    /// # Arguments
    /// - `content` - Message text
    /// - `prefix` - Text prefix for commands, e.g. `!wtm`
    /// - `bot_id` - Bot user ID; messages starting with `<@id>` or `<@!id>` are commands
    ///
    /// # Returns
    /// - `MessageKind` - Command, invalid command, or plain text
    pub fn classify(content: &str, prefix: &str, bot_id: Option<u64>) -> Self {
        let content = content.trim_start();

        let Some(rest) = strip_mention(content, bot_id).or_else(|| strip_prefix(content, prefix))
        else {
            return MessageKind::Text;
        };

        match Command::parse(rest) {
            Ok(command) => MessageKind::Command(command),
            Err(e) => MessageKind::InvalidCommand(e),
        }
    }
}

impl Command {
    /// Parses the text following the prefix or mention.
    ///
    /// An empty command is treated as `help`. Arguments after the first one are ignored.
    pub fn parse(text: &str) -> Result<Self, CommandError> {
        let mut parts = text.split_whitespace();
        let Some(name) = parts.next() else {
            return Ok(Command::Help);
        };

        match name.to_lowercase().as_str() {
            "start" | "quiz" => {
                let difficulty = parts.next().map(str::parse::<Difficulty>).transpose()?;
                Ok(Command::Start { difficulty })
            }
            "skip" => Ok(Command::Skip),
            "stop" => Ok(Command::Stop),
            "help" => Ok(Command::Help),
            _ => Err(CommandError::Unknown(name.to_string())),
        }
    }
}

fn strip_mention(content: &str, bot_id: Option<u64>) -> Option<&str> {
    let id = bot_id?;
    [format!("<@{id}>"), format!("<@!{id}>")]
        .iter()
        .find_map(|mention| content.strip_prefix(mention.as_str()))
}

fn strip_prefix<'a>(content: &'a str, prefix: &str) -> Option<&'a str> {
    if prefix.is_empty() {
        return None;
    }
    let rest = content.strip_prefix(prefix)?;
    // "!wtmfoo" is not "!wtm foo"
    match rest.chars().next() {
        None => Some(rest),
        Some(c) if c.is_whitespace() => Some(rest),
        Some(_) => None,
    }
}
