//! Controllers turning chat messages into quiz actions.
//!
//! The bot has a single controller, `round::RoundController`, registered with the Discord
//! dispatcher as its `MessageHandler`.

pub mod round;
