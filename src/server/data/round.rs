//! In-memory round tracker.
//!
//! This module provides the `RoundTracker`, the only mutable state shared between chat
//! events. It maps each channel to its current slot: no slot means the channel is idle, a
//! slot without a round means a start is loading, and a slot with a round means guesses
//! are being accepted.
//!
//! Every operation holds the lock for its whole duration and never awaits anything else
//! while holding it, so each call is atomic with respect to concurrent events for the same
//! channel. Compound steps the controller needs (check-then-end, end-only-this-round,
//! install-only-if-still-current) are single operations for the same reason.

use serenity::all::ChannelId;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::server::model::{
    answer::MatchPolicy,
    round::{EndedRound, QuizRound, RoundState, RoundTicket},
    shot::RoundContent,
};

/// Current generation and round of one channel.
struct ChannelSlot {
    /// Generation of the start that created this slot.
    generation: u64,
    /// `None` while the start is still loading.
    round: Option<QuizRound>,
}

#[derive(Default)]
struct Rounds {
    /// Source of generation numbers, shared by all channels so a number is never reused.
    next_generation: u64,
    channels: HashMap<ChannelId, ChannelSlot>,
}

impl Rounds {
    fn next_generation(&mut self) -> u64 {
        self.next_generation += 1;
        self.next_generation
    }
}

/// Tracker of the active quiz round per channel.
///
/// Cheap to clone; clones share the same state. At most one round exists per channel at
/// any time.
#[derive(Clone, Default)]
pub struct RoundTracker {
    rounds: Arc<RwLock<Rounds>>,
}

impl RoundTracker {
    /// Creates an empty tracker with every channel idle.
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a round, replacing whatever the channel had.
    ///
    /// Starting over an active round silently abandons it, and starting over a loading
    /// start invalidates that start's ticket.
    ///
    /// # Arguments
    /// - `channel_id` - Channel to start the round in
    /// - `content` - Fetched still and answers
    ///
    /// # Returns
    /// - `QuizRound` - The new active round
    pub async fn start_round(&self, channel_id: ChannelId, content: &RoundContent) -> QuizRound {
        let mut rounds = self.rounds.write().await;
        let generation = rounds.next_generation();
        let round = QuizRound::new(generation, channel_id, content);

        rounds.channels.insert(
            channel_id,
            ChannelSlot {
                generation,
                round: Some(round.clone()),
            },
        );

        round
    }

    /// Gets the active round of a channel.
    ///
    /// # Returns
    /// - `Some(QuizRound)` - Copy of the active round
    /// - `None` - The channel is idle or loading
    pub async fn get_active_round(&self, channel_id: ChannelId) -> Option<QuizRound> {
        let rounds = self.rounds.read().await;
        rounds
            .channels
            .get(&channel_id)
            .and_then(|slot| slot.round.clone())
    }

    /// Ends whatever the channel has going on.
    ///
    /// Removes the active round and cancels a loading start. Calling it on an idle channel
    /// is a no-op.
    ///
    /// # Returns
    /// - `Some(QuizRound)` - The round that was active
    /// - `None` - No round was active
    pub async fn end_round(&self, channel_id: ChannelId) -> Option<QuizRound> {
        match self.end_channel(channel_id).await {
            EndedRound::Active(round) => Some(round),
            EndedRound::PendingStart | EndedRound::Nothing => None,
        }
    }

    /// Ends whatever the channel has going on, reporting what that was.
    ///
    /// Same effect as `end_round`, but tells a cancelled start apart from an idle channel.
    pub async fn end_channel(&self, channel_id: ChannelId) -> EndedRound {
        let mut rounds = self.rounds.write().await;
        match rounds.channels.remove(&channel_id) {
            Some(ChannelSlot {
                round: Some(round), ..
            }) => EndedRound::Active(round),
            Some(ChannelSlot { round: None, .. }) => EndedRound::PendingStart,
            None => EndedRound::Nothing,
        }
    }

    /// Checks a guess against the channel's active round without changing anything.
    ///
    /// # Returns
    /// - `true` - A round is active and the guess matches one of its answers
    /// - `false` - No active round, or the guess does not match
    pub async fn check_guess(&self, channel_id: ChannelId, guess: &str, policy: MatchPolicy) -> bool {
        let rounds = self.rounds.read().await;
        rounds
            .channels
            .get(&channel_id)
            .and_then(|slot| slot.round.as_ref())
            .is_some_and(|round| round.answers.matches(guess, policy))
    }

    /// Ends the active round if, and only if, the guess matches it.
    ///
    /// # Returns
    /// - `Some(QuizRound)` - The guessed round, now ended
    /// - `None` - No active round, or the guess does not match; nothing changed
    pub async fn take_if_matches(
        &self,
        channel_id: ChannelId,
        guess: &str,
        policy: MatchPolicy,
    ) -> Option<QuizRound> {
        let mut rounds = self.rounds.write().await;

        let matched = rounds
            .channels
            .get(&channel_id)
            .and_then(|slot| slot.round.as_ref())
            .is_some_and(|round| round.answers.matches(guess, policy));

        if !matched {
            return None;
        }

        rounds
            .channels
            .remove(&channel_id)
            .and_then(|slot| slot.round)
    }

    /// Ends the channel's active round if it is still the given round.
    ///
    /// Used by timers, which must not end a round that replaced theirs.
    ///
    /// # Returns
    /// - `Some(QuizRound)` - The round, now ended
    /// - `None` - That round is no longer active; nothing changed
    pub async fn end_round_if(&self, channel_id: ChannelId, round_id: u64) -> Option<QuizRound> {
        let mut rounds = self.rounds.write().await;

        let is_current = rounds
            .channels
            .get(&channel_id)
            .and_then(|slot| slot.round.as_ref())
            .is_some_and(|round| round.id == round_id);

        if !is_current {
            return None;
        }

        rounds
            .channels
            .remove(&channel_id)
            .and_then(|slot| slot.round)
    }

    /// Begins a start in a channel.
    ///
    /// Puts the channel into the loading state and removes any active round, which the
    /// caller may reveal. Any earlier ticket for the channel becomes stale.
    ///
    /// # Returns
    /// - `(RoundTicket, Option<QuizRound>)` - Ticket to present with the fetched content,
    ///   and the abandoned round if there was one
    pub async fn reserve(&self, channel_id: ChannelId) -> (RoundTicket, Option<QuizRound>) {
        let mut rounds = self.rounds.write().await;
        let generation = rounds.next_generation();

        let abandoned = rounds
            .channels
            .insert(
                channel_id,
                ChannelSlot {
                    generation,
                    round: None,
                },
            )
            .and_then(|slot| slot.round);

        (
            RoundTicket {
                channel_id,
                generation,
            },
            abandoned,
        )
    }

    /// Checks whether a start is still waiting for its content.
    ///
    /// # Returns
    /// - `true` - The ticket is current and no round was installed with it yet
    /// - `false` - The start was superseded, cancelled or already completed
    pub async fn is_pending(&self, ticket: RoundTicket) -> bool {
        let rounds = self.rounds.read().await;
        rounds
            .channels
            .get(&ticket.channel_id)
            .is_some_and(|slot| slot.generation == ticket.generation && slot.round.is_none())
    }

    /// Completes a start with fetched content.
    ///
    /// # Returns
    /// - `Some(QuizRound)` - The ticket was still current; the round is now active
    /// - `None` - The start was superseded or cancelled meanwhile; content discarded
    pub async fn start_reserved(
        &self,
        ticket: RoundTicket,
        content: &RoundContent,
    ) -> Option<QuizRound> {
        let mut rounds = self.rounds.write().await;
        let slot = rounds.channels.get_mut(&ticket.channel_id)?;

        if slot.generation != ticket.generation || slot.round.is_some() {
            return None;
        }

        let round = QuizRound::new(ticket.generation, ticket.channel_id, content);
        slot.round = Some(round.clone());

        Some(round)
    }

    /// Abandons a start whose fetch failed, returning the channel to idle.
    ///
    /// # Returns
    /// - `true` - The ticket was current and the channel is idle again
    /// - `false` - The ticket was already stale; nothing changed
    pub async fn release(&self, ticket: RoundTicket) -> bool {
        let mut rounds = self.rounds.write().await;

        let is_current = rounds
            .channels
            .get(&ticket.channel_id)
            .is_some_and(|slot| slot.generation == ticket.generation && slot.round.is_none());

        if is_current {
            rounds.channels.remove(&ticket.channel_id);
        }

        is_current
    }

    /// Gets the lifecycle state of a channel.
    pub async fn state(&self, channel_id: ChannelId) -> RoundState {
        let rounds = self.rounds.read().await;
        match rounds.channels.get(&channel_id) {
            None => RoundState::Idle,
            Some(ChannelSlot { round: None, .. }) => RoundState::Loading,
            Some(ChannelSlot { round: Some(_), .. }) => RoundState::RoundActive,
        }
    }

    /// Counts active rounds across all channels.
    ///
    /// Used in tests to verify the one-round-per-channel invariant.
    #[cfg(test)]
    pub async fn active_round_count(&self) -> usize {
        let rounds = self.rounds.read().await;
        rounds
            .channels
            .values()
            .filter(|slot| slot.round.is_some())
            .count()
    }
}
