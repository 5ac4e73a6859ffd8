use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    /// Required environment variable is not set.
    ///
    /// The bot requires `WTM_USER`, `WTM_PASSWORD` and `DISCORD_TOKEN`. Check the
    /// README or your `.env` file.
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    /// Optional environment variable is set to a value that cannot be used.
    #[error("Invalid value '{value}' for environment variable {name}: {reason}")]
    InvalidEnvVar {
        /// Variable name
        name: String,
        /// The rejected value
        value: String,
        /// Why it was rejected
        reason: String,
    },
}
