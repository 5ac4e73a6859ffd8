//! In-memory state shared between chat events.
//!
//! The bot keeps no database; the only mutable state is which round, if any, each channel
//! is playing. Everything in this layer is lost on restart.

pub mod round;
