//! `YouTube` video identifier extraction.
//!
//! The extractor is the only gate between "internal" links, which play
//! inline, and "external" links, which navigate away. Recognized shapes:
//!
//! - `https://youtu.be/<id>`
//! - `https://www.youtube.com/v/<id>`
//! - `https://www.youtube.com/user/<name>#p/u/<n>/<id>`
//! - `https://www.youtube.com/embed/<id>`
//! - `https://www.youtube.com/watch?v=<id>`

use std::sync::LazyLock;

use regex::Regex;

/// Pattern covering every recognized URL shape.
///
/// Group `path` holds the id of the path forms, group `query` the `v=`
/// parameter of the watch form, wherever it sits in the query string.
pub const VIDEO_ID_PATTERN: &str =
    r"(?:youtu\.be/|/v/|/u/\w/|embed/)(?P<path>[^#&?/]+)|watch\?(?:[^#]*&)?v=(?P<query>[^#&?]+)";

#[allow(clippy::expect_used)]
static VIDEO_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(VIDEO_ID_PATTERN).expect("video id pattern is valid"));

/// Extract the video identifier from a `YouTube` URL.
///
/// Returns `None` when the URL matches none of the known shapes, or when
/// the id position is empty (`https://www.youtube.com/embed/`).
///
/// # Examples
///
/// ```rust
/// use ytgallery_core::video_id_from_url;
///
/// assert_eq!(video_id_from_url("https://youtu.be/abc123"), Some("abc123".to_string()));
/// assert_eq!(video_id_from_url("https://example.com/x"), None);
/// ```
#[must_use]
pub fn video_id_from_url(url: &str) -> Option<String> {
    VIDEO_ID_RE
        .captures(url)
        .and_then(|caps| caps.name("path").or_else(|| caps.name("query")))
        .map(|m| m.as_str().to_string())
}

/// Whether the URL resolves to a playable video.
#[must_use]
pub fn is_video_url(url: &str) -> bool {
    video_id_from_url(url).is_some()
}
