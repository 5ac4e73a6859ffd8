//! Quiz content as retrieved from the site.

use super::answer::AnswerSet;

/// File name used when the image URL has no usable last segment.
const FALLBACK_FILENAME: &str = "shot.jpg";

/// Still image of a shot, downloaded so it can be attached to a chat message.
#[derive(Debug, Clone, PartialEq)]
pub struct ShotImage {
    /// Absolute URL the image was downloaded from.
    pub url: String,
    /// File name for the attachment, derived from the URL.
    pub filename: String,
    /// Raw image bytes.
    pub data: Vec<u8>,
}

impl ShotImage {
    /// Creates an image, deriving the attachment file name from the URL's last path
    /// segment.
    pub fn new(url: impl Into<String>, data: Vec<u8>) -> Self {
        let url = url.into();
        let filename = url
            .split(['?', '#'])
            .next()
            .and_then(|path| path.rsplit('/').next())
            .filter(|name| !name.is_empty())
            .unwrap_or(FALLBACK_FILENAME)
            .to_string();

        Self {
            url,
            filename,
            data,
        }
    }
}

/// Everything a round needs, as returned by a successful fetch.
#[derive(Debug, Clone, PartialEq)]
pub struct RoundContent {
    /// The still to post.
    pub image: ShotImage,
    /// Accepted answers, never empty.
    pub answers: AnswerSet,
    /// Release year, when the solution page shows it.
    pub year: Option<i32>,
}

#[cfg(test)]
impl RoundContent {
    /// Builds content for a title with the fake site's placeholder still.
    ///
    /// Used in tests that need a round without going through the fetcher.
    pub fn fixture(title: &str, year: Option<i32>) -> Self {
        use test_utils::fixture::shot::{DEFAULT_IMAGE_BYTES, DEFAULT_IMAGE_PATH};

        let no_alternatives: [&str; 0] = [];
        Self {
            image: ShotImage::new(
                format!("https://whatthemovie.com{DEFAULT_IMAGE_PATH}"),
                DEFAULT_IMAGE_BYTES.to_vec(),
            ),
            answers: AnswerSet::new(title, &no_alternatives).expect("fixture title is not blank"),
            year,
        }
    }
}
