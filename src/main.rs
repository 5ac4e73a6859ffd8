mod server;

use std::sync::Arc;

use serenity::http::Http;

use crate::server::{
    bot::{self, chat::DiscordChat, handler::Handler},
    config::Config,
    controller::round::RoundController,
    data::round::RoundTracker,
    error::AppError,
    service::{
        tmdb::TmdbClient,
        wtm::{Credentials, WtmFetcher},
    },
    startup,
    state::{AppState, RoundSettings},
};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    startup::init_tracing();

    let config = Config::from_env()?;
    let http_client = startup::setup_reqwest_client()?;

    let mut fetcher = WtmFetcher::new(
        http_client.clone(),
        config.wtm_base_url.clone(),
        Credentials {
            username: config.wtm_user.clone(),
            password: config.wtm_password.clone(),
        },
    );
    match &config.tmdb_api_key {
        Some(api_key) => {
            fetcher = fetcher.with_tmdb(TmdbClient::new(
                http_client.clone(),
                config.tmdb_base_url.clone(),
                api_key.clone(),
            ));
        }
        None => tracing::info!("TMDB_API_KEY not set, alternative titles disabled"),
    }

    // Bad credentials should stop the bot before it connects to Discord
    fetcher.login().await?;

    let discord_http = Arc::new(Http::new(&config.discord_token));
    let state = AppState::new(
        RoundTracker::new(),
        Arc::new(fetcher),
        Arc::new(DiscordChat::new(discord_http)),
        RoundSettings::from_config(&config),
    );
    let controller = Arc::new(RoundController::new(state));

    let handler = Handler::new(controller, config.command_prefix.clone());
    let client = bot::start::init_bot(&config, handler).await?;

    bot::start::start_bot(client).await
}
