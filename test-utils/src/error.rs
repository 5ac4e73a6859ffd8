use thiserror::Error;

#[derive(Error, Debug)]
pub enum TestError {
    /// The builder was asked for a combination of routes that cannot be served.
    ///
    /// For example a solution script was configured for a shot page that has no
    /// solution link, so nothing would ever request it.
    #[error("Invalid fake site configuration: {0}")]
    InvalidFixture(String),
}
