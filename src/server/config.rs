use std::time::Duration;
use url::Url;

use crate::server::{
    error::{config::ConfigError, AppError},
    model::{answer::MatchPolicy, difficulty::Difficulty},
};

const DEFAULT_WTM_BASE_URL: &str = "https://whatthemovie.com";
const DEFAULT_TMDB_BASE_URL: &str = "https://api.themoviedb.org/3";
const DEFAULT_COMMAND_PREFIX: &str = "!wtm";
const DEFAULT_GUESS_TIMEOUT_SECONDS: u64 = 30;

pub struct Config {
    pub wtm_user: String,
    pub wtm_password: String,
    pub wtm_base_url: Url,

    pub discord_token: String,
    pub command_prefix: String,

    pub tmdb_api_key: Option<String>,
    pub tmdb_base_url: String,

    /// `None` when rounds never time out.
    pub guess_timeout: Option<Duration>,
    pub default_difficulty: Difficulty,
    pub match_policy: MatchPolicy,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Ok(Self::from_lookup(|name| std::env::var(name).ok())?)
    }

    /// Builds the configuration from an arbitrary variable source.
    ///
    /// Blank values count as unset.
    ///
    /// # Arguments
    /// - `lookup` - Returns the value of a variable, if set
    ///
    /// # Returns
    /// - `Ok(Config)` - All required variables present and all optional ones valid
    /// - `Err(ConfigError)` - First missing or invalid variable
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let require =
            |name: &str| get(name).ok_or_else(|| ConfigError::MissingEnvVar(name.to_string()));

        let wtm_base_url = parse_base_url(
            "WTM_BASE_URL",
            get("WTM_BASE_URL").unwrap_or_else(|| DEFAULT_WTM_BASE_URL.to_string()),
        )?;
        let tmdb_base_url = parse_base_url(
            "TMDB_BASE_URL",
            get("TMDB_BASE_URL").unwrap_or_else(|| DEFAULT_TMDB_BASE_URL.to_string()),
        )?
        .as_str()
        .trim_end_matches('/')
        .to_string();

        let guess_timeout = match get("GUESS_TIMEOUT_SECONDS") {
            Some(value) => {
                let seconds = value
                    .trim()
                    .parse::<u64>()
                    .map_err(|e| invalid("GUESS_TIMEOUT_SECONDS", &value, e))?;
                (seconds > 0).then(|| Duration::from_secs(seconds))
            }
            None => Some(Duration::from_secs(DEFAULT_GUESS_TIMEOUT_SECONDS)),
        };

        let default_difficulty = match get("DEFAULT_DIFFICULTY") {
            Some(value) => value
                .parse::<Difficulty>()
                .map_err(|e| invalid("DEFAULT_DIFFICULTY", &value, e))?,
            None => Difficulty::default(),
        };

        let match_policy = match get("GUESS_SIMILARITY") {
            Some(value) => {
                let threshold = value
                    .trim()
                    .parse::<f64>()
                    .map_err(|e| invalid("GUESS_SIMILARITY", &value, e))?;
                if !(0.0..=1.0).contains(&threshold) {
                    return Err(invalid(
                        "GUESS_SIMILARITY",
                        &value,
                        "must be between 0 and 1",
                    ));
                }
                MatchPolicy::Fuzzy { threshold }
            }
            None => MatchPolicy::Exact,
        };

        Ok(Self {
            wtm_user: require("WTM_USER")?,
            wtm_password: require("WTM_PASSWORD")?,
            wtm_base_url,
            discord_token: require("DISCORD_TOKEN")?,
            command_prefix: get("COMMAND_PREFIX")
                .map(|p| p.trim().to_string())
                .unwrap_or_else(|| DEFAULT_COMMAND_PREFIX.to_string()),
            tmdb_api_key: get("TMDB_API_KEY"),
            tmdb_base_url,
            guess_timeout,
            default_difficulty,
            match_policy,
        })
    }
}

fn parse_base_url(name: &str, value: String) -> Result<Url, ConfigError> {
    let url = Url::parse(value.trim()).map_err(|e| invalid(name, &value, e))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(name, &value, "must be an http(s) URL"));
    }
    Ok(url)
}

fn invalid(name: &str, value: &str, reason: impl ToString) -> ConfigError {
    ConfigError::InvalidEnvVar {
        name: name.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}
