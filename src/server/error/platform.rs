use thiserror::Error;

/// Failures while reading from or posting to the chat platform.
///
/// Reported to the caller as is; the client library's own rate-limit handling is the only
/// retry that happens.
#[derive(Error, Debug)]
pub enum PlatformError {
    /// Error from the Serenity HTTP client (permissions, rate limits, network).
    ///
    /// Boxed due to large size.
    #[error(transparent)]
    Discord(#[from] Box<serenity::Error>),

    /// The platform refused the action for a reason we only have as text.
    #[error("Chat platform rejected the request: {0}")]
    Rejected(String),
}

impl From<serenity::Error> for PlatformError {
    fn from(err: serenity::Error) -> Self {
        PlatformError::Discord(Box::new(err))
    }
}
