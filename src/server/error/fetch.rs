use thiserror::Error;

/// Failures while retrieving a shot from the quiz site.
///
/// Each kind calls for a different reaction from the round controller, so they are never
/// collapsed into one another.
#[derive(Error, Debug)]
pub enum FetchError {
    /// The site rejected the configured credentials.
    ///
    /// Fatal at startup. Mid-run it is reported to the channel and logged for operators.
    #[error("Quiz site rejected the login: {0}")]
    Authentication(String),

    /// Transport failure or unexpected HTTP status.
    ///
    /// Transient; the next start command simply tries again.
    #[error("Quiz site request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// An element the fetcher relies on is missing from the page.
    ///
    /// Means the site's markup changed. Retrying would reproduce the failure, so it is
    /// surfaced instead.
    #[error("Quiz site markup changed: {element} not found")]
    Parse {
        /// Description of the missing element
        element: &'static str,
    },

    /// Every attempted shot was filtered out or had no solution.
    #[error("No usable shot found after {attempts} attempts")]
    NoUsableShot {
        /// Number of shots tried
        attempts: usize,
    },
}

impl FetchError {
    /// Builds a `Parse` error for a missing element.
    pub fn missing(element: &'static str) -> Self {
        Self::Parse { element }
    }
}
