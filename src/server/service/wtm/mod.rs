//! Quiz content retrieval from whatthemovie.com.
//!
//! `WtmFetcher` drives a logged-in session against the site: it submits the login form,
//! sets the random shot options for the requested difficulty, requests random shots until
//! one is usable, reads its solution script and downloads the still. The site keeps the
//! random options per session, so one fetch holds the session for its whole duration and
//! concurrent fetches run one after another.

pub mod parse;

use reqwest::{header, StatusCode};
use serenity::async_trait;
use tokio::sync::Mutex;
use url::Url;

use crate::server::{
    error::fetch::FetchError,
    model::{
        answer::AnswerSet,
        difficulty::Difficulty,
        shot::{RoundContent, ShotImage},
    },
    service::tmdb::TmdbClient,
};

/// Number of random shots tried before giving up on a fetch.
pub const MAX_SHOT_ATTEMPTS: usize = 5;

/// Tags whose shots are never posted.
const EXCLUDED_TAGS: [&str; 4] = ["nude", "nudity", "boob", "boobs"];

/// Source of quiz rounds.
#[async_trait]
pub trait ShotFetcher: Send + Sync {
    /// Retrieves a random shot with a known answer.
    ///
    /// # Arguments
    /// - `difficulty` - Difficulty of the shot pool to draw from
    ///
    /// # Returns
    /// - `Ok(RoundContent)` - Still image, accepted answers and year
    /// - `Err(FetchError)` - See the variants for what each failure means
    async fn fetch_random_shot(&self, difficulty: Difficulty) -> Result<RoundContent, FetchError>;
}

#[derive(Default)]
struct Session {
    /// Token sent back with every state-changing or XHR request; `None` until logged in.
    csrf_token: Option<String>,
    /// Difficulty the site's random options are currently set to.
    difficulty: Option<Difficulty>,
}

/// Site login.
pub struct Credentials {
    pub username: String,
    pub password: String,
}

pub struct WtmFetcher {
    /// Must keep cookies; the session lives in them.
    http: reqwest::Client,
    base_url: Url,
    credentials: Credentials,
    tmdb: Option<TmdbClient>,
    session: Mutex<Session>,
}

/// Shot page as fetched, with the URL it was served from after redirects.
struct FetchedShot {
    url: Url,
    page: parse::ShotPage,
}

impl WtmFetcher {
    pub fn new(http: reqwest::Client, base_url: Url, credentials: Credentials) -> Self {
        Self {
            http,
            base_url,
            credentials,
            tmdb: None,
            session: Mutex::new(Session::default()),
        }
    }

    /// Enables alternative title lookups.
    pub fn with_tmdb(mut self, tmdb: TmdbClient) -> Self {
        self.tmdb = Some(tmdb);
        self
    }

    /// Logs in with the configured credentials, replacing any existing session.
    ///
    /// Called once at startup so that bad credentials stop the bot immediately; later
    /// fetches log in again on their own when the session expires.
    ///
    /// # Returns
    /// - `Ok(())` - Logged in, CSRF token stored
    /// - `Err(FetchError::Authentication)` - Credentials rejected
    /// - `Err(FetchError::Network)` - Site unreachable
    /// - `Err(FetchError::Parse)` - Login form or CSRF token not found
    pub async fn login(&self) -> Result<(), FetchError> {
        let mut session = self.session.lock().await;
        self.log_in(&mut session).await
    }

    async fn log_in(&self, session: &mut Session) -> Result<(), FetchError> {
        let login_url = self.url("/user/login")?;

        let form = check_status(self.http.get(login_url.clone()).send().await?)?
            .text()
            .await?;
        let authenticity_token = parse::authenticity_token(&form)?;

        let response = self
            .http
            .post(login_url)
            .form(&[
                ("name", self.credentials.username.as_str()),
                ("upassword", self.credentials.password.as_str()),
                ("authenticity_token", authenticity_token.as_str()),
                ("utf8", "✓"),
            ])
            .send()
            .await?;
        let page = check_status(response)?.text().await?;

        if parse::is_login_form(&page) {
            return Err(FetchError::Authentication(format!(
                "credentials for {} were rejected",
                self.credentials.username
            )));
        }

        session.csrf_token = Some(parse::csrf_token(&page)?);
        session.difficulty = None;

        tracing::info!("Logged in to quiz site as {}", self.credentials.username);

        Ok(())
    }

    async fn apply_difficulty(
        &self,
        session: &mut Session,
        difficulty: Difficulty,
    ) -> Result<(), FetchError> {
        if session.difficulty == Some(difficulty) {
            return Ok(());
        }

        let mut request = self.http.post(self.url("/shot/setrandomoptions")?).form(&[
            ("difficulty", difficulty.as_str()),
            ("keyword", ""),
            ("include_archive", "1"),
            ("include_solved", "1"),
        ]);
        if let Some(token) = &session.csrf_token {
            request = request.header("X-CSRF-Token", token);
        }
        check_status(request.send().await?)?;

        session.difficulty = Some(difficulty);
        tracing::debug!("Random shot difficulty set to {}", difficulty);

        Ok(())
    }

    /// Requests a random shot, logging in again once if the session has expired.
    async fn random_shot(
        &self,
        session: &mut Session,
        difficulty: Difficulty,
    ) -> Result<FetchedShot, FetchError> {
        let mut relogged = false;

        loop {
            let response = check_status(self.http.get(self.url("/shot/random")?).send().await?)?;
            let url = response.url().clone();
            let html = response.text().await?;

            if !parse::is_login_form(&html) {
                let page = parse::shot_page(&html)?;
                return Ok(FetchedShot { url, page });
            }

            if relogged {
                return Err(FetchError::Authentication(
                    "session was refused right after logging in".to_string(),
                ));
            }

            tracing::info!("Quiz site session expired, logging in again");
            self.log_in(session).await?;
            self.apply_difficulty(session, difficulty).await?;
            relogged = true;
        }
    }

    async fn fetch_solution(
        &self,
        shot: &FetchedShot,
        href: &str,
        csrf_token: Option<&str>,
    ) -> Result<Option<parse::Solution>, FetchError> {
        let mut request = self
            .http
            .get(self.link(&shot.url, href)?)
            .header(header::REFERER, shot.url.as_str())
            .header("X-Requested-With", "XMLHttpRequest");
        if let Some(token) = csrf_token {
            request = request.header("X-CSRF-Token", token);
        }

        let script = check_status(request.send().await?)?.text().await?;

        Ok(parse::solution(&script))
    }

    async fn fetch_image(&self, shot: &FetchedShot) -> Result<ShotImage, FetchError> {
        let image_url = self.link(&shot.url, &shot.page.image_src)?;

        let response = self
            .http
            .get(image_url.clone())
            .header(header::REFERER, shot.url.as_str())
            .send()
            .await?;
        let bytes = check_status(response)?.bytes().await?;

        Ok(ShotImage::new(image_url.as_str(), bytes.to_vec()))
    }

    /// Turns a fetched shot into round content.
    ///
    /// # Returns
    /// - `Ok(Some(RoundContent))` - Usable shot
    /// - `Ok(None)` - Shot filtered out or without solution; try another one
    async fn content_for(
        &self,
        session: &mut Session,
        shot: FetchedShot,
    ) -> Result<Option<RoundContent>, FetchError> {
        if let Some(token) = &shot.page.csrf_token {
            session.csrf_token = Some(token.clone());
        }

        if shot.page.nsfw {
            tracing::debug!("Skipping NSFW shot {}", shot.url);
            return Ok(None);
        }

        if let Some(tag) = shot
            .page
            .tags
            .iter()
            .find(|tag| EXCLUDED_TAGS.contains(&tag.as_str()))
        {
            tracing::debug!("Skipping shot {} tagged {}", shot.url, tag);
            return Ok(None);
        }

        let Some(href) = shot.page.solution_href.as_deref() else {
            tracing::debug!("Skipping shot {} without solution", shot.url);
            return Ok(None);
        };

        let Some(solution) = self
            .fetch_solution(&shot, href, session.csrf_token.as_deref())
            .await?
        else {
            tracing::debug!("Solution of shot {} reveals no title", shot.url);
            return Ok(None);
        };

        let alternatives = match &self.tmdb {
            Some(tmdb) => tmdb.alternative_titles(&solution.title, solution.year).await,
            None => Vec::new(),
        };

        let Some(answers) = AnswerSet::new(&solution.title, &alternatives) else {
            return Ok(None);
        };

        let image = self.fetch_image(&shot).await?;

        Ok(Some(RoundContent {
            image,
            answers,
            year: solution.year,
        }))
    }

    fn url(&self, path: &str) -> Result<Url, FetchError> {
        self.link(&self.base_url, path)
    }

    fn link(&self, base: &Url, href: &str) -> Result<Url, FetchError> {
        base.join(href)
            .map_err(|_| FetchError::missing("well-formed link"))
    }
}

#[async_trait]
impl ShotFetcher for WtmFetcher {
    async fn fetch_random_shot(&self, difficulty: Difficulty) -> Result<RoundContent, FetchError> {
        let mut session = self.session.lock().await;

        if session.csrf_token.is_none() {
            self.log_in(&mut session).await?;
        }
        self.apply_difficulty(&mut session, difficulty).await?;

        for attempt in 1..=MAX_SHOT_ATTEMPTS {
            let shot = self.random_shot(&mut session, difficulty).await?;
            let url = shot.url.clone();

            if let Some(content) = self.content_for(&mut session, shot).await? {
                tracing::debug!(
                    "Fetched shot {} ({}) on attempt {}",
                    url,
                    content.answers.title(),
                    attempt
                );
                return Ok(content);
            }
        }

        Err(FetchError::NoUsableShot {
            attempts: MAX_SHOT_ATTEMPTS,
        })
    }
}

/// Maps HTTP statuses to fetch errors.
///
/// 401 and 403 mean the session is not allowed in; any other non-success status is
/// reported as a network error.
fn check_status(response: reqwest::Response) -> Result<reqwest::Response, FetchError> {
    match response.status() {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(FetchError::Authentication(
            format!("{} answered {}", response.url(), response.status()),
        )),
        _ => Ok(response.error_for_status()?),
    }
}
