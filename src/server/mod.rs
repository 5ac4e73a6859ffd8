//! Quiz bot backend.
//!
//! The bot posts movie stills scraped from whatthemovie.com to Discord channels and
//! accepts guesses from channel members until someone names the movie, the round is
//! skipped, or the guess timer runs out.
//!
//! # Architecture
//!
//! - **Bot** (`bot/`) - Discord event handling, per-channel dispatch and the chat adapter
//! - **Controller** (`controller/`) - Round orchestration and every user-visible message
//! - **Service** (`service/`) - Quiz site scraping and TMDB alternative titles
//! - **Data** (`data/`) - In-memory round tracker, one round per channel
//! - **Model** (`model/`) - Rounds, answers, commands, difficulties and shot content
//! - **Error** (`error/`) - Error types for each component and the top-level `AppError`
//!
//! # Infrastructure
//!
//! - **Configuration** (`config`) - Environment-based configuration
//! - **State** (`state`) - Dependencies handed to the controller
//! - **Startup** (`startup`) - Tracing and HTTP client setup
//!
//! # Message Flow
//!
//! 1. **Bot** receives a gateway message and classifies it as command or plain text
//! 2. **Bot** queues it on its channel's worker so a channel is handled in order
//! 3. **Controller** performs the matching action
//! 4. **Data** records the round change atomically
//! 5. **Service** fetches content for starts, in a task of its own
//! 6. **Controller** posts the still, reveal or notice through the chat adapter

pub mod bot;
pub mod config;
pub mod controller;
pub mod data;
pub mod error;
pub mod model;
pub mod service;
pub mod startup;
pub mod state;
