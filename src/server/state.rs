//! Application state shared by the round controller.
//!
//! This module defines the `AppState` struct which holds every dependency the controller
//! needs: the round tracker, the content fetcher, the chat adapter and the round settings
//! derived from configuration. The state is built once at startup and passed in
//! explicitly; tests build it with fakes for the fetcher and chat adapter.

use std::sync::Arc;
use std::time::Duration;

use crate::server::{
    bot::chat::ChatAdapter,
    config::Config,
    data::round::RoundTracker,
    model::{answer::MatchPolicy, difficulty::Difficulty},
    service::wtm::ShotFetcher,
};

/// Round behaviour taken from configuration.
#[derive(Debug, Clone)]
pub struct RoundSettings {
    /// Difficulty used when `start` has no argument.
    pub default_difficulty: Difficulty,
    /// How long a round accepts guesses; `None` disables the timeout.
    pub guess_timeout: Option<Duration>,
    /// How guesses are compared against answers.
    pub match_policy: MatchPolicy,
    /// Text prefix for commands, shown in help messages.
    pub command_prefix: String,
}

impl RoundSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            default_difficulty: config.default_difficulty,
            guess_timeout: config.guess_timeout,
            match_policy: config.match_policy,
            command_prefix: config.command_prefix.clone(),
        }
    }
}

/// Dependencies of the round controller.
///
/// All fields are cheap to clone: the tracker and both trait objects are reference
/// counted, so clones share the same rounds, session and Discord client.
#[derive(Clone)]
pub struct AppState {
    /// Active round per channel.
    pub tracker: RoundTracker,

    /// Source of quiz content.
    pub fetcher: Arc<dyn ShotFetcher>,

    /// Outgoing side of the chat platform.
    pub chat: Arc<dyn ChatAdapter>,

    pub settings: RoundSettings,
}

impl AppState {
    /// Creates the application state with the provided dependencies.
    ///
    /// # Arguments
    /// - `tracker` - Round tracker, usually empty
    /// - `fetcher` - Quiz content source
    /// - `chat` - Chat platform adapter
    /// - `settings` - Round settings from configuration
    ///
    /// # Returns
    /// - `AppState` - Initialized application state ready for use
    pub fn new(
        tracker: RoundTracker,
        fetcher: Arc<dyn ShotFetcher>,
        chat: Arc<dyn ChatAdapter>,
        settings: RoundSettings,
    ) -> Self {
        Self {
            tracker,
            fetcher,
            chat,
            settings,
        }
    }
}
