//! Solution script fixtures.
//!
//! The site answers the solution button with a JavaScript snippet. Non-ASCII characters are
//! sent as `\uXXXX` escapes and the title passed to `setAmazonMovieName` is form-encoded.

/// Creates the solution script for a title and year.
///
/// # Arguments
/// - `title` - Movie title as it should be revealed
/// - `year` - Release year shown next to the title
///
/// # Returns
/// - `String` - JavaScript body as served by the site
pub fn script(title: &str, year: i32) -> String {
    let shown = js_escape(title);
    let encoded = js_escape(&title.replace(' ', "+"));

    format!(
        r##"$("#solucebutton").hide();
$("#shot_solution").html("<p>This shot is from:</p><strong>{shown} ({year})</strong>");
setAmazonMovieName("{encoded}");"##
    )
}

/// Creates a solution script that reveals nothing usable.
pub fn empty_script() -> String {
    r##"$("#solucebutton").hide();
$("#shot_solution").html("<p>No solution available yet.</p>");"##
        .to_string()
}

/// Escapes every non-ASCII character as `\uXXXX`, the way the site does.
fn js_escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for unit in value.encode_utf16() {
        if unit < 0x80 {
            out.push(unit as u8 as char);
        } else {
            out.push_str(&format!("\\u{unit:04x}"));
        }
    }
    out
}
