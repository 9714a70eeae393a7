//! Render Module
//!
//! Builds a stats card for one request and writes it, with status and
//! headers, into a [`ResponseSink`].
//!
//! The card is always a well-formed SVG document. Upstream failures turn into
//! an error card; they never reach the caller as a bare error.

mod i18n;
mod languages;
mod svg;
mod theme;

pub use i18n::{Labels, Lang};
pub use languages::{top_languages, LanguageCount, TOP_LANGUAGES};
pub use svg::{error_svg, escape, stats_svg, StatsCard};
pub use theme::{Colors, Palette, Theme};

use axum::http::StatusCode;
use serde_json::Value;
use tracing::{debug, warn};

use crate::cache::TtlCache;
use crate::capture::ResponseSink;
use crate::config::StatusPolicy;
use crate::error::FetchError;
use crate::fetch::{fetch_avatar_data_uri, fetch_repos, fetch_user, Upstream};
use crate::models::{clamp_height, CardOptions};

pub const SVG_CONTENT_TYPE: &str = "image/svg+xml";
/// Cache-Control for rendered stats cards
pub const SUCCESS_CACHE_CONTROL: &str = "public, s-maxage=3600, stale-while-revalidate=86400";
/// Cache-Control for error cards, short so failures recover quickly
pub const ERROR_CACHE_CONTROL: &str = "public, s-maxage=60, stale-while-revalidate=120";

const BASE_HEIGHT: u32 = 140;
const AVATAR_MIN_HEIGHT: u32 = 150;
const LANGUAGE_HEADER_HEIGHT: u32 = 25;
const LANGUAGE_ROW_HEIGHT: u32 = 20;
const ERROR_CARD_HEIGHT: u32 = 120;

/// Dependencies a render needs.
pub struct RenderContext<'a> {
    pub upstream: &'a dyn Upstream,
    pub api_base_url: &'a str,
    pub user_cache: &'a TtlCache<Value>,
    pub repos_cache: &'a TtlCache<Value>,
    pub status_policy: StatusPolicy,
}

/// Card height from the enabled sections, before any override.
pub fn dynamic_height(show_avatar: bool, language_rows: usize) -> u32 {
    let mut height = BASE_HEIGHT;
    if show_avatar {
        height = height.max(AVATAR_MIN_HEIGHT);
    }
    if language_rows > 0 {
        height += LANGUAGE_HEADER_HEIGHT + language_rows as u32 * LANGUAGE_ROW_HEIGHT;
    }
    height
}

/// Status reported for an error card under `policy`.
pub fn error_status(policy: StatusPolicy, err: &FetchError) -> StatusCode {
    match policy {
        StatusPolicy::AlwaysOk => StatusCode::OK,
        StatusPolicy::Threaded if err.is_not_found() => StatusCode::NOT_FOUND,
        StatusPolicy::Threaded => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Title for an error card: the translated not-found label for 404, the
/// upstream message for other failures that carry one.
pub fn error_title(err: &FetchError, labels: &Labels) -> String {
    match err {
        _ if err.is_not_found() => labels.user_not_found.to_string(),
        FetchError::Status { .. } | FetchError::Transport(_) => err.to_string(),
        FetchError::Decode(_) => labels.error_fetching.to_string(),
    }
}

fn write_svg(sink: &mut dyn ResponseSink, status: StatusCode, cache_control: &str, svg: &str) {
    sink.set_header("Content-Type", SVG_CONTENT_TYPE);
    sink.set_header("Cache-Control", cache_control);
    sink.write_status(status);
    sink.end(Some(svg));
}

// == Render Card ==
/// Fetches the data for `options.username` and writes the finished card.
pub async fn render_card(ctx: &RenderContext<'_>, options: &CardOptions, sink: &mut dyn ResponseSink) {
    let labels = options.lang.labels();
    let colors = Colors::resolve(
        options.theme.palette(),
        options.color.as_deref(),
        options.bg.as_deref(),
        options.border.as_deref(),
    );
    let username = options.username.as_str();

    let profile = match fetch_user(ctx.upstream, ctx.api_base_url, ctx.user_cache, username).await {
        Ok(profile) => profile,
        Err(err) => {
            warn!(username, error = %err, "profile unavailable, rendering error card");
            let svg = error_svg(
                &error_title(&err, labels),
                &format!("Username: {}", username),
                &colors,
                options.width,
                ERROR_CARD_HEIGHT,
            );
            write_svg(sink, error_status(ctx.status_policy, &err), ERROR_CACHE_CONTROL, &svg);
            return;
        }
    };

    let avatar = match profile.avatar_url.as_deref() {
        Some(url) if options.show_avatar => fetch_avatar_data_uri(ctx.upstream, url).await,
        _ => None,
    };

    let languages = if options.show_languages {
        match fetch_repos(ctx.upstream, ctx.api_base_url, ctx.repos_cache, username).await {
            Ok(repos) => top_languages(&repos, TOP_LANGUAGES),
            Err(err) => {
                warn!(username, error = %err, "repositories unavailable, omitting languages");
                Vec::new()
            }
        }
    } else {
        Vec::new()
    };

    let height = clamp_height(
        options
            .height
            .unwrap_or_else(|| dynamic_height(options.show_avatar, languages.len())),
    );
    let login = profile.login.as_deref().unwrap_or(username);

    let svg = stats_svg(&StatsCard {
        login,
        public_repos: profile.public_repos,
        followers: profile.followers,
        avatar: avatar.as_deref(),
        languages: &languages,
        width: options.width,
        height,
        colors: &colors,
        labels,
    });

    debug!(username, height, languages = languages.len(), "rendered card");
    write_svg(sink, StatusCode::OK, SUCCESS_CACHE_CONTROL, &svg);
}
