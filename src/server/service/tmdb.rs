//! Alternative titles from The Movie Database.
//!
//! The quiz site only reveals one title per shot, usually the original one. Looking the
//! movie up on TMDB lets players answer with the French or English release title as well.
//! The lookup is best effort: any failure means no alternatives, never a failed round.

use serde::Deserialize;

/// Languages whose release titles are accepted as answers.
const TITLE_LANGUAGES: [&str; 2] = ["fr-FR", "en-US"];

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<SearchResult>,
}

#[derive(Deserialize)]
struct SearchResult {
    id: u64,
}

#[derive(Deserialize)]
struct MovieDetails {
    title: Option<String>,
}

pub struct TmdbClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl TmdbClient {
    /// Creates a client for the TMDB v3 API rooted at `base_url`.
    pub fn new(http: reqwest::Client, base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    /// Looks up other titles of a movie.
    ///
    /// Searches by title (and year when known), then reads the first hit's title in each
    /// of the accepted languages.
    ///
    /// # Arguments
    /// - `title` - Title revealed by the quiz site
    /// - `year` - Release year, narrows the search
    ///
    /// # Returns
    /// - `Vec<String>` - Distinct titles other than `title`; empty when the lookup fails
    pub async fn alternative_titles(&self, title: &str, year: Option<i32>) -> Vec<String> {
        let movie_id = match self.search(title, year).await {
            Ok(Some(id)) => id,
            Ok(None) => {
                tracing::debug!("No TMDB match for {}", title);
                return Vec::new();
            }
            Err(e) => {
                tracing::warn!("TMDB search for {} failed: {}", title, e);
                return Vec::new();
            }
        };

        let (french, english) = tokio::join!(
            self.localized_title(movie_id, TITLE_LANGUAGES[0]),
            self.localized_title(movie_id, TITLE_LANGUAGES[1]),
        );

        let mut titles: Vec<String> = Vec::new();
        for result in [french, english] {
            match result {
                Ok(Some(found)) => {
                    if found != title && !titles.contains(&found) {
                        titles.push(found);
                    }
                }
                Ok(None) => {}
                Err(e) => tracing::warn!("TMDB title lookup for movie {} failed: {}", movie_id, e),
            }
        }

        titles
    }

    async fn search(&self, title: &str, year: Option<i32>) -> Result<Option<u64>, reqwest::Error> {
        let mut query = vec![
            ("api_key", self.api_key.clone()),
            ("query", title.to_string()),
        ];
        if let Some(year) = year {
            query.push(("year", year.to_string()));
        }

        let response: SearchResponse = self
            .http
            .get(format!("{}/search/movie", self.base_url))
            .query(&query)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(response.results.first().map(|result| result.id))
    }

    async fn localized_title(&self, movie_id: u64, language: &str) -> Result<Option<String>, reqwest::Error> {
        let details: MovieDetails = self
            .http
            .get(format!("{}/movie/{}", self.base_url, movie_id))
            .query(&[("api_key", self.api_key.as_str()), ("language", language)])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(details.title.map(|t| t.trim().to_string()).filter(|t| !t.is_empty()))
    }
}
