//! Quiz round orchestration.
//!
//! The `RoundController` turns classified chat messages into round actions: it asks the
//! fetcher for content, records rounds in the tracker, checks guesses, runs the guess
//! timer and posts everything users see. It is the only component that posts error
//! notices; the layers below report failures and leave the wording to it.
//!
//! A channel goes `Idle` -> `Loading` on `start`, `Loading` -> `RoundActive` once the shot
//! is posted (guesses sent before that are ignored), and back to `Idle` on a correct
//! guess, `skip`, `stop` or timeout. A new `start` while a round is active reveals the old
//! answer first. Fetches run in their own task so that `skip` and `stop` keep working
//! while a shot loads; a fetch that completes after its start was superseded is
//! discarded by the tracker.

use rand::seq::IndexedRandom;
use serenity::all::ChannelId;
use serenity::async_trait;
use tokio::task::JoinHandle;

use crate::server::{
    bot::dispatch::MessageHandler,
    error::fetch::FetchError,
    model::{
        command::{Command, CommandError, MessageKind},
        difficulty::Difficulty,
        message::IncomingMessage,
        round::{EndedRound, QuizRound, RoundTicket},
    },
    state::AppState,
};

/// Reaction added to a correct guess.
pub const CORRECT_REACTION: &str = "✅";

/// Openers for the message announcing a correct guess.
pub const CONGRATULATIONS: [&str; 6] = ["yay", "correct", "nice", "good job", "👏", "you rock"];

/// Answer to a skip that cancelled a shot still loading.
pub const START_CANCELLED: &str = "Start cancelled. No round was started.";

/// Caption of a posted still.
pub const SHOT_CAPTION: &str = "🎬 Which movie is this? Type your guess in the chat.";

#[derive(Clone)]
pub struct RoundController {
    state: AppState,
}

impl RoundController {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    /// Performs the action a message asks for.
    ///
    /// At most one action runs per message. Plain text is a guess and is ignored unless a
    /// round is active.
    ///
    /// # Returns
    /// - `Some(JoinHandle)` - A start was requested; the handle completes once the shot is
    ///   posted or the failure reported
    /// - `None` - The action already completed
    pub async fn route(&self, message: IncomingMessage) -> Option<JoinHandle<()>> {
        let channel_id = message.channel_id;

        match &message.kind {
            MessageKind::Command(Command::Start { difficulty }) => {
                let difficulty = difficulty.unwrap_or(self.state.settings.default_difficulty);
                return Some(self.start(channel_id, difficulty).await);
            }
            MessageKind::Command(Command::Skip) => self.skip(channel_id).await,
            MessageKind::Command(Command::Stop) => self.stop(channel_id).await,
            MessageKind::Command(Command::Help) => self.help(channel_id).await,
            MessageKind::InvalidCommand(error) => self.invalid_command(channel_id, error).await,
            MessageKind::Text => self.guess(&message).await,
        }

        None
    }

    /// Begins a round in a channel.
    ///
    /// Reveals the answer of any round still active, then fetches content in a separate
    /// task.
    ///
    /// # Arguments
    /// - `channel_id` - Channel to start the round in
    /// - `difficulty` - Difficulty of the shot pool
    ///
    /// # Returns
    /// - `JoinHandle<()>` - Completes once the round is posted or the failure reported
    pub async fn start(&self, channel_id: ChannelId, difficulty: Difficulty) -> JoinHandle<()> {
        let (ticket, abandoned) = self.state.tracker.reserve(channel_id).await;

        if let Some(round) = abandoned {
            tracing::debug!("Round {} in channel {} replaced by a new start", round.id, channel_id);
            self.post_text(channel_id, &skipped_text(&round)).await;
        }

        tracing::debug!("Fetching {} shot for channel {}", difficulty, channel_id);

        let controller = self.clone();
        tokio::spawn(async move { controller.complete_start(ticket, difficulty).await })
    }

    async fn complete_start(&self, ticket: RoundTicket, difficulty: Difficulty) {
        let channel_id = ticket.channel_id;

        let content = match self.state.fetcher.fetch_random_shot(difficulty).await {
            Ok(content) => content,
            Err(e) => {
                log_fetch_error(channel_id, &e);
                if self.state.tracker.release(ticket).await {
                    self.post_text(channel_id, fetch_error_notice(&e)).await;
                }
                return;
            }
        };

        if !self.state.tracker.is_pending(ticket).await {
            tracing::debug!(
                "Discarding shot fetched for channel {}: start was superseded",
                channel_id
            );
            return;
        }

        // guesses only count once the still is up
        let posted = self
            .state
            .chat
            .post_image(channel_id, &content.image, SHOT_CAPTION)
            .await;

        let Some(round) = self.state.tracker.start_reserved(ticket, &content).await else {
            tracing::debug!(
                "Shot posted to channel {} after its start was superseded",
                channel_id
            );
            return;
        };

        match posted {
            Ok(()) => tracing::info!(
                "Started round {} in channel {} ({})",
                round.id,
                channel_id,
                round.answers.title()
            ),
            Err(e) => tracing::error!(
                "Failed to post shot for round {} to channel {}: {}",
                round.id,
                channel_id,
                e
            ),
        }

        self.schedule_timeout(&round);
    }

    /// Ends the round after the configured timeout, unless it ended some other way first.
    fn schedule_timeout(&self, round: &QuizRound) {
        let Some(timeout) = self.state.settings.guess_timeout else {
            return;
        };

        let controller = self.clone();
        let channel_id = round.channel_id;
        let round_id = round.id;

        tokio::spawn(async move {
            tokio::time::sleep(timeout).await;

            if let Some(round) = controller
                .state
                .tracker
                .end_round_if(channel_id, round_id)
                .await
            {
                tracing::info!("Round {} in channel {} timed out", round.id, channel_id);
                controller
                    .post_text(
                        channel_id,
                        &format!("Time's up! ⌛ The movie was {}.", round.reveal()),
                    )
                    .await;
            }
        });
    }

    /// Checks a plain message against the active round.
    ///
    /// A correct guess ends the round, gets a reaction and a congratulation revealing the
    /// answer. Anything else is ignored.
    async fn guess(&self, message: &IncomingMessage) {
        if message.content.trim().is_empty() {
            return;
        }

        let Some(round) = self
            .state
            .tracker
            .take_if_matches(
                message.channel_id,
                &message.content,
                self.state.settings.match_policy,
            )
            .await
        else {
            return;
        };

        tracing::info!(
            "{} guessed round {} in channel {}",
            message.author_name,
            round.id,
            message.channel_id
        );

        if let Err(e) = self
            .state
            .chat
            .react(message.channel_id, message.message_id, CORRECT_REACTION)
            .await
        {
            tracing::error!(
                "Failed to react to message {} in channel {}: {}",
                message.message_id,
                message.channel_id,
                e
            );
        }

        let text = format!(
            "{} <@{}>! It was {}.",
            pick_congratulation(),
            message.author_id,
            round.reveal()
        );
        self.post_text(message.channel_id, &text).await;
    }

    async fn skip(&self, channel_id: ChannelId) {
        match self.state.tracker.end_channel(channel_id).await {
            EndedRound::Active(round) => {
                tracing::debug!("Round {} in channel {} skipped", round.id, channel_id);
                self.post_text(channel_id, &skipped_text(&round)).await;
            }
            EndedRound::PendingStart => {
                tracing::debug!("Pending start in channel {} skipped", channel_id);
                self.post_text(channel_id, START_CANCELLED).await;
            }
            EndedRound::Nothing => {
                let text = format!(
                    "There is no shot to skip. Start one with `{} start`.",
                    self.state.settings.command_prefix
                );
                self.post_text(channel_id, &text).await;
            }
        }
    }

    async fn stop(&self, channel_id: ChannelId) {
        match self.state.tracker.end_channel(channel_id).await {
            EndedRound::Active(round) => {
                tracing::debug!("Round {} in channel {} stopped", round.id, channel_id)
            }
            EndedRound::PendingStart => {
                tracing::debug!("Pending start in channel {} stopped", channel_id)
            }
            EndedRound::Nothing => {}
        }
    }

    async fn help(&self, channel_id: ChannelId) {
        self.post_text(channel_id, &help_text(&self.state.settings.command_prefix))
            .await;
    }

    async fn invalid_command(&self, channel_id: ChannelId, error: &CommandError) {
        let text = format!(
            "{}.\n\n{}",
            error,
            help_text(&self.state.settings.command_prefix)
        );
        self.post_text(channel_id, &text).await;
    }

    /// Posts text, logging instead of propagating platform failures.
    async fn post_text(&self, channel_id: ChannelId, text: &str) {
        if let Err(e) = self.state.chat.post_text(channel_id, text).await {
            tracing::error!("Failed to post message to channel {}: {}", channel_id, e);
        }
    }
}

#[async_trait]
impl MessageHandler for RoundController {
    async fn on_message(&self, message: IncomingMessage) {
        // starts finish on their own; the channel keeps processing meanwhile
        let _ = self.route(message).await;
    }
}

fn skipped_text(round: &QuizRound) -> String {
    format!("Shot skipped. It was {}.", round.reveal())
}

fn pick_congratulation() -> &'static str {
    CONGRATULATIONS
        .choose(&mut rand::rng())
        .copied()
        .unwrap_or("correct")
}

/// Usage text listing every command.
pub fn help_text(prefix: &str) -> String {
    let difficulties = Difficulty::ALL
        .iter()
        .map(Difficulty::as_str)
        .collect::<Vec<_>>()
        .join("|");

    format!(
        "**WhatTheMovie quiz**\n\
         `{prefix} start [{difficulties}]` post a new shot (also `{prefix} quiz`)\n\
         `{prefix} skip` reveal the answer\n\
         `{prefix} stop` end the round silently\n\
         `{prefix} help` show this message\n\
         While a shot is up, just type the movie title to guess."
    )
}

fn fetch_error_notice(error: &FetchError) -> &'static str {
    match error {
        FetchError::Authentication(_) => {
            "I couldn't log in to WhatTheMovie. Ask an admin to check my credentials."
        }
        FetchError::Network(_) => "WhatTheMovie isn't answering right now. Try again in a moment.",
        FetchError::Parse { .. } => {
            "WhatTheMovie's pages changed and I can't read them anymore. Ask an admin to have a look."
        }
        FetchError::NoUsableShot { .. } => "I couldn't find a usable shot. Try again.",
    }
}

fn log_fetch_error(channel_id: ChannelId, error: &FetchError) {
    match error {
        FetchError::Network(_) | FetchError::NoUsableShot { .. } => {
            tracing::warn!("Failed to fetch shot for channel {}: {}", channel_id, error)
        }
        FetchError::Authentication(_) | FetchError::Parse { .. } => {
            tracing::error!("Failed to fetch shot for channel {}: {}", channel_id, error)
        }
    }
}
