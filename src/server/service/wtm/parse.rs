//! Markup extraction for quiz site pages and solution scripts.
//!
//! The site's pages are small and their structure is stable enough that a handful of
//! regular expressions over start tags does the job: every start tag is split into its
//! attributes, and lookups select tags by name, `id`, `name` or `class`.

use regex::Regex;
use std::sync::LazyLock;

use crate::server::error::fetch::FetchError;

static START_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<([a-z][a-z0-9]*)\b([^>]*)>").expect("start tag regex is valid")
});

static ATTRIBUTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)([a-z_:][-a-z0-9_:.]*)\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'>/]+))"#)
        .expect("attribute regex is valid")
});

static LINK_TEXT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<a\b[^>]*>(.*?)</a>").expect("link regex is valid"));

static JS_UNICODE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:\\u[0-9a-fA-F]{4})+").expect("unicode escape regex is valid")
});

static AMAZON_TITLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"setAmazonMovieName\(\s*(?:"([^"]*)"|'([^']*)')\s*\)"#)
        .expect("title regex is valid")
});

static SOLUTION_YEAR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<strong>[^<]*\((\d{4})\)\s*</strong>").expect("year regex is valid")
});

/// Start tag with its attributes, attribute names lowercased.
#[derive(Debug)]
struct Tag {
    attributes: Vec<(String, String)>,
    /// Byte offset just past the tag in the source document.
    end: usize,
}

impl Tag {
    fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    fn has_class(&self, class: &str) -> bool {
        self.attr("class")
            .is_some_and(|classes| classes.split_whitespace().any(|c| c == class))
    }
}

fn tags<'a>(html: &'a str, name: &'a str) -> impl Iterator<Item = Tag> + 'a {
    START_TAG
        .captures_iter(html)
        .filter(move |caps| caps[1].eq_ignore_ascii_case(name))
        .map(|caps| {
            let attributes = ATTRIBUTE
                .captures_iter(&caps[2])
                .map(|attr| {
                    let value = attr
                        .get(2)
                        .or_else(|| attr.get(3))
                        .or_else(|| attr.get(4))
                        .map_or("", |m| m.as_str());
                    (attr[1].to_lowercase(), unescape_html(value))
                })
                .collect();

            Tag {
                attributes,
                end: caps.get(0).map_or(0, |m| m.end()),
            }
        })
}

fn find_tag(html: &str, name: &str, predicate: impl Fn(&Tag) -> bool) -> Option<Tag> {
    tags(html, name).find(|tag| predicate(tag))
}

/// Decodes the handful of entities the site uses in attribute values and link texts.
fn unescape_html(value: &str) -> String {
    value
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}

/// Reads the hidden `authenticity_token` input of the login form.
pub fn authenticity_token(html: &str) -> Result<String, FetchError> {
    find_tag(html, "input", |tag| tag.attr("name") == Some("authenticity_token"))
        .and_then(|tag| tag.attr("value").map(str::to_string))
        .ok_or_else(|| FetchError::missing("login form authenticity_token"))
}

/// Reads the `csrf-token` meta tag present on every logged-in page.
pub fn csrf_token(html: &str) -> Result<String, FetchError> {
    find_tag(html, "meta", |tag| tag.attr("name") == Some("csrf-token"))
        .and_then(|tag| tag.attr("content").map(str::to_string))
        .ok_or_else(|| FetchError::missing("csrf-token meta tag"))
}

/// Whether the page is the login form, which is what the site serves to anonymous
/// sessions.
pub fn is_login_form(html: &str) -> bool {
    find_tag(html, "input", |tag| tag.attr("name") == Some("upassword")).is_some()
}

/// Content of a shot page.
#[derive(Debug, Clone, PartialEq)]
pub struct ShotPage {
    /// `src` of the still, possibly relative.
    pub image_src: String,
    /// `href` of the solution button, absent for unsolvable shots.
    pub solution_href: Option<String>,
    pub nsfw: bool,
    /// Tag names, lowercased.
    pub tags: Vec<String>,
    pub csrf_token: Option<String>,
}

/// Parses a shot page.
///
/// # Returns
/// - `Ok(ShotPage)` - The still was found
/// - `Err(FetchError::Parse)` - No `img#still_shot` with a `src`
pub fn shot_page(html: &str) -> Result<ShotPage, FetchError> {
    let image_src = find_tag(html, "img", |tag| tag.attr("id") == Some("still_shot"))
        .and_then(|tag| tag.attr("src").map(str::to_string))
        .filter(|src| !src.is_empty())
        .ok_or_else(|| FetchError::missing("still image (img#still_shot)"))?;

    let solution_href = find_tag(html, "a", |tag| tag.attr("id") == Some("solucebutton"))
        .and_then(|tag| tag.attr("href").map(str::to_string))
        .filter(|href| !href.is_empty() && href != "#");

    let nsfw = tags(html, "div").any(|tag| tag.has_class("nsfw"));

    Ok(ShotPage {
        image_src,
        solution_href,
        nsfw,
        tags: shot_tags(html),
        csrf_token: csrf_token(html).ok(),
    })
}

fn shot_tags(html: &str) -> Vec<String> {
    let Some(list) = find_tag(html, "ul", |tag| tag.attr("id") == Some("shot_tag_list")) else {
        return Vec::new();
    };

    let rest = &html[list.end..];
    let body = rest
        .to_ascii_lowercase()
        .find("</ul>")
        .map_or(rest, |close| &rest[..close]);

    LINK_TEXT
        .captures_iter(body)
        .map(|caps| unescape_html(caps[1].trim()).to_lowercase())
        .filter(|tag| !tag.is_empty())
        .collect()
}

/// Replaces `\uXXXX` escapes, including surrogate pairs, with the characters they encode.
pub fn unescape_js(script: &str) -> String {
    JS_UNICODE
        .replace_all(script, |caps: &regex::Captures| {
            let units: Vec<u16> = caps[0]
                .split("\\u")
                .filter(|hex| !hex.is_empty())
                .filter_map(|hex| u16::from_str_radix(hex, 16).ok())
                .collect();
            String::from_utf16_lossy(&units)
        })
        .into_owned()
}

/// Solution revealed by the solution script.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    pub title: String,
    pub year: Option<i32>,
}

/// Extracts title and year from a solution script.
///
/// The title is the form-encoded argument of `setAmazonMovieName`; the year comes from
/// the `<strong>Title (YYYY)</strong>` snippet.
///
/// # Returns
/// - `Some(Solution)` - A non-blank title was found
/// - `None` - The script does not reveal the movie
pub fn solution(script: &str) -> Option<Solution> {
    let script = unescape_js(script);

    let raw = AMAZON_TITLE
        .captures(&script)
        .and_then(|caps| caps.get(1).or_else(|| caps.get(2)))
        .map(|m| m.as_str().replace('+', " "))?;

    let title = match urlencoding::decode(&raw) {
        Ok(decoded) => decoded.trim().to_string(),
        Err(_) => raw.trim().to_string(),
    };

    if title.is_empty() {
        return None;
    }

    let year = SOLUTION_YEAR
        .captures(&script)
        .and_then(|caps| caps[1].parse().ok());

    Some(Solution { title, year })
}
