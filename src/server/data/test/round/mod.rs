use crate::server::{
    data::round::RoundTracker,
    model::{answer::MatchPolicy, round::{EndedRound, RoundState}, shot::RoundContent},
};
use serenity::all::ChannelId;

mod check_guess;
mod end_round;
mod end_round_if;
mod take_if_matches;

/// Channel used by most tests.
fn channel() -> ChannelId {
    ChannelId::new(100)
}

/// A second, independent channel.
fn other_channel() -> ChannelId {
    ChannelId::new(200)
}
