//! Error types for the quiz bot.
//!
//! Component errors live in their own modules: `FetchError` for the quiz site,
//! `PlatformError` for Discord posting and `ConfigError` for startup configuration. The
//! `AppError` enum aggregates them for startup code and `main`, which is the only place
//! an error ends the process. At runtime the round controller decides what each failure
//! means for users; nothing below it posts error notices.

pub mod config;
pub mod fetch;
pub mod platform;

use thiserror::Error;

use crate::server::error::{config::ConfigError, fetch::FetchError};

/// Top-level application error type.
///
/// Aggregates all errors that can abort startup. Most variants use `#[from]` for
/// automatic conversion with `?`.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration error during environment variable loading.
    ///
    /// The process cannot start without its credentials.
    #[error(transparent)]
    ConfigErr(#[from] ConfigError),

    /// Quiz site error, most importantly rejected credentials at startup.
    #[error(transparent)]
    FetchErr(#[from] FetchError),

    /// Discord gateway or client error from Serenity.
    ///
    /// Boxed due to large size.
    #[error(transparent)]
    DiscordErr(#[from] Box<serenity::Error>),

    /// HTTP client construction error from reqwest.
    #[error(transparent)]
    ReqwestErr(#[from] reqwest::Error),
}

/// Manual conversion from serenity::Error to AppError.
///
/// Boxes the error to reduce the size of the AppError enum, as serenity::Error
/// is very large and would make all AppError variants larger if not boxed.
impl From<serenity::Error> for AppError {
    fn from(err: serenity::Error) -> Self {
        AppError::DiscordErr(Box::new(err))
    }
}
