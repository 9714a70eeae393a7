//! Card request options
//!
//! Turns the raw query string of a card request into display options.

use std::collections::BTreeMap;

use crate::render::{Lang, Theme};

/// Raw query parameters, sorted by name.
pub type CardQuery = BTreeMap<String, String>;

pub const DEFAULT_USERNAME: &str = "octocat";
pub const DEFAULT_WIDTH: u32 = 450;
pub const MIN_WIDTH: u32 = 300;
pub const MAX_WIDTH: u32 = 1000;
pub const MIN_HEIGHT: u32 = 150;
pub const MAX_HEIGHT: u32 = 800;

/// Options parsed from a card request.
///
/// # Fields
/// - `username`: GitHub login to render (default `octocat`)
/// - `theme`/`lang`: palette and label table
/// - `color`/`bg`/`border`: raw color overrides
/// - `width`: card width, already clamped
/// - `height`: explicit height override, already clamped
/// - `show_avatar`/`show_languages`: section toggles
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardOptions {
    pub username: String,
    pub theme: Theme,
    pub lang: Lang,
    pub color: Option<String>,
    pub bg: Option<String>,
    pub border: Option<String>,
    pub width: u32,
    pub height: Option<u32>,
    pub show_avatar: bool,
    pub show_languages: bool,
}

impl CardOptions {
    pub fn from_query(query: &CardQuery) -> Self {
        let get = |name: &str| query.get(name).map(String::as_str);
        let non_empty = |name: &str| get(name).filter(|v| !v.is_empty()).map(str::to_string);

        Self {
            username: get("username")
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .unwrap_or(DEFAULT_USERNAME)
                .to_string(),
            theme: get("theme").map(Theme::from_param).unwrap_or_default(),
            lang: get("lang").map(Lang::from_param).unwrap_or_default(),
            color: non_empty("color"),
            bg: non_empty("bg"),
            border: non_empty("border"),
            width: clamp(
                get("width").and_then(parse_dimension).unwrap_or(DEFAULT_WIDTH as i64),
                MIN_WIDTH,
                MAX_WIDTH,
            ),
            height: get("height")
                .and_then(parse_dimension)
                .map(|h| clamp(h, MIN_HEIGHT, MAX_HEIGHT)),
            show_avatar: get("hide_avatar") != Some("true"),
            show_languages: get("hide_languages") != Some("true"),
        }
    }
}

impl Default for CardOptions {
    fn default() -> Self {
        Self::from_query(&CardQuery::new())
    }
}

/// Clamps a height to the allowed range.
pub fn clamp_height(height: u32) -> u32 {
    clamp(height as i64, MIN_HEIGHT, MAX_HEIGHT)
}

fn clamp(value: i64, min: u32, max: u32) -> u32 {
    value.clamp(min as i64, max as i64) as u32
}

/// Reads the leading integer of `value` ("480px" is 480). Zero and
/// unparseable input count as not given.
fn parse_dimension(value: &str) -> Option<i64> {
    let value = value.trim_start();
    let (sign, digits) = match value.as_bytes().first() {
        Some(b'-') => (-1, &value[1..]),
        Some(b'+') => (1, &value[1..]),
        _ => (1, value),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end]
        .parse::<i64>()
        .ok()
        .map(|n| sign * n)
        .filter(|n| *n != 0)
}
