use std::time::Duration;

use tracing_subscriber::EnvFilter;

use crate::server::error::AppError;

/// Log filter used when `RUST_LOG` is not set.
const DEFAULT_LOG_FILTER: &str = "info,serenity=warn";

/// Timeout applied to every request against the quiz site and TMDB.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

/// Installs the global tracing subscriber.
///
/// Log levels come from `RUST_LOG` when set, otherwise `info` for the bot and `warn` for
/// Serenity's gateway chatter.
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

/// Builds the HTTP client used for the quiz site and TMDB.
///
/// The quiz site keeps its login in cookies, so the client carries a cookie store.
/// Redirects are followed since both login and random shots answer with one.
///
/// # Returns
/// - `Ok(reqwest::Client)` - Client ready for use
/// - `Err(AppError::ReqwestErr)` - TLS backend could not be initialized
pub fn setup_reqwest_client() -> Result<reqwest::Client, AppError> {
    let client = reqwest::Client::builder()
        .cookie_store(true)
        .timeout(REQUEST_TIMEOUT)
        .user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ))
        .build()?;

    Ok(client)
}
