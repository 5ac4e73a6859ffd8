//! Domain models for quiz rounds.

use chrono::{DateTime, Utc};
use serenity::all::ChannelId;

use super::{answer::AnswerSet, shot::RoundContent};

/// One active quiz round in a channel.
///
/// Immutable once created. The round tracker owns it; callers receive clones.
#[derive(Debug, Clone, PartialEq)]
pub struct QuizRound {
    /// Generation number within the channel; unique per channel.
    pub id: u64,
    /// Channel the round runs in.
    pub channel_id: ChannelId,
    /// URL of the posted still.
    pub image_url: String,
    /// Accepted answers, never empty.
    pub answers: AnswerSet,
    /// Release year, if known.
    pub year: Option<i32>,
    /// When the round was created.
    pub started_at: DateTime<Utc>,
}

impl QuizRound {
    /// Creates a round from fetched content.
    ///
    /// # Arguments
    /// - `id` - Channel generation the round belongs to
    /// - `channel_id` - Channel the round runs in
    /// - `content` - Fetched still and answers
    ///
    /// # Returns
    /// - `QuizRound` - New round stamped with the current time
    pub fn new(id: u64, channel_id: ChannelId, content: &RoundContent) -> Self {
        Self {
            id,
            channel_id,
            image_url: content.image.url.clone(),
            answers: content.answers.clone(),
            year: content.year,
            started_at: Utc::now(),
        }
    }

    /// Answer as shown to users, e.g. `**Inception** (2010)`.
    pub fn reveal(&self) -> String {
        match self.year {
            Some(year) => format!("**{}** ({})", self.answers.title(), year),
            None => format!("**{}**", self.answers.title()),
        }
    }
}

/// Round lifecycle state of a channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundState {
    /// No round and no start in progress.
    Idle,
    /// A start was requested and its fetch has not completed yet.
    Loading,
    /// A round is waiting for guesses.
    RoundActive,
}

/// What ending a channel removed.
#[derive(Debug, Clone, PartialEq)]
pub enum EndedRound {
    /// A round that was accepting guesses.
    Active(QuizRound),
    /// A start whose fetch had not completed; its content will be discarded.
    PendingStart,
    /// The channel was idle.
    Nothing,
}

/// Reservation for a round start in a channel.
///
/// Handed out when a start begins and presented again when its fetch completes. The
/// tracker only honours it if nothing else happened in the channel meanwhile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundTicket {
    /// Channel the start was requested in.
    pub channel_id: ChannelId,
    /// Channel generation at reservation time.
    pub generation: u64,
}
