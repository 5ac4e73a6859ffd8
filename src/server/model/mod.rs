//! Server-side domain models.
//!
//! This module contains the domain models used by the fetcher, the round tracker and the
//! round controller: quiz content as scraped from the site, the accepted answers of a
//! round, the round itself, and incoming chat messages already classified into commands
//! or guesses. They carry no I/O and are cheap to clone.

pub mod answer;
pub mod command;
pub mod difficulty;
pub mod message;
pub mod round;
pub mod shot;
