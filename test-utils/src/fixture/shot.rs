//! Shot page fixtures.
//!
//! A shot page is what `/shot/random` redirects to: the still image, an optional link to
//! the solution, tags and an NSFW marker.

use super::account::DEFAULT_CSRF_TOKEN;

/// Path the random endpoint redirects to.
pub const DEFAULT_SHOT_PATH: &str = "/shot/12345";

/// Path of the still image.
pub const DEFAULT_IMAGE_PATH: &str = "/images/shots/12345.jpg";

/// Path of the solution script.
pub const DEFAULT_SOLUTION_PATH: &str = "/shot/12345/showsolution";

/// Bytes served as the still image.
pub const DEFAULT_IMAGE_BYTES: &[u8] = b"\xFF\xD8\xFF\xE0fake-jpeg-still";

/// Default tags listed under the shot.
pub const DEFAULT_TAGS: [&str; 2] = ["dream", "heist"];

/// In-memory description of a shot page.
#[derive(Debug, Clone)]
pub struct ShotPage {
    pub image_src: String,
    pub solution_href: Option<String>,
    pub nsfw: bool,
    pub tags: Vec<String>,
    pub csrf_token: String,
}

/// Creates a shot page with default values.
///
/// # Default Values
/// - image_src: `"/images/shots/12345.jpg"`
/// - solution_href: `Some("/shot/12345/showsolution")`
/// - nsfw: `false`
/// - tags: `["dream", "heist"]`
/// - csrf_token: `"csrf-token-456"`
pub fn page() -> ShotPage {
    ShotPage {
        image_src: DEFAULT_IMAGE_PATH.to_string(),
        solution_href: Some(DEFAULT_SOLUTION_PATH.to_string()),
        nsfw: false,
        tags: DEFAULT_TAGS.iter().map(|t| t.to_string()).collect(),
        csrf_token: DEFAULT_CSRF_TOKEN.to_string(),
    }
}

/// Creates a shot page builder for customization.
///
/// ```rust,ignore
/// let shot = fixture::shot::page_builder()
///     .without_solution()
///     .tags(&["nudity"])
///     .build();
/// ```
pub fn page_builder() -> ShotPageBuilder {
    ShotPageBuilder { page: page() }
}

/// Builder for customized shot pages.
pub struct ShotPageBuilder {
    page: ShotPage,
}

impl ShotPageBuilder {
    pub fn image_src(mut self, src: impl Into<String>) -> Self {
        self.page.image_src = src.into();
        self
    }

    pub fn solution_href(mut self, href: impl Into<String>) -> Self {
        self.page.solution_href = Some(href.into());
        self
    }

    pub fn without_solution(mut self) -> Self {
        self.page.solution_href = None;
        self
    }

    pub fn nsfw(mut self, nsfw: bool) -> Self {
        self.page.nsfw = nsfw;
        self
    }

    pub fn tags(mut self, tags: &[&str]) -> Self {
        self.page.tags = tags.iter().map(|t| t.to_string()).collect();
        self
    }

    pub fn build(self) -> ShotPage {
        self.page
    }
}

impl ShotPage {
    /// Renders the page as the site would serve it.
    pub fn html(&self) -> String {
        let solution = match &self.solution_href {
            Some(href) => format!(
                r#"<a href="{href}" class="button" data-remote="true" id="solucebutton">Show solution</a>"#
            ),
            None => String::new(),
        };
        let nsfw = if self.nsfw {
            r#"<div class="nsfw">This shot may contain adult content</div>"#
        } else {
            ""
        };
        let tags: String = self
            .tags
            .iter()
            .map(|tag| format!(r#"<li><a href="/search?t=tag&q={tag}">{tag}</a></li>"#))
            .collect::<Vec<_>>()
            .join("\n      ");

        format!(
            r#"<!DOCTYPE html>
<html>
<head>
  <title>Shot #12345 - WhatTheMovie</title>
  <meta name="csrf-token" content="{csrf}" />
</head>
<body>
  <div id="main_shot">
    {nsfw}
    <img alt="Still" src="{src}" id="still_shot" width="640" />
  </div>
  <div id="shot_actions">
    {solution}
  </div>
  <div id="tags">
    <ul id="shot_tag_list">
      {tags}
    </ul>
  </div>
</body>
</html>"#,
            csrf = self.csrf_token,
            src = self.image_src,
        )
    }
}
