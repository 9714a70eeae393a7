//! GitHub endpoint helpers.
//!
//! Profile and repository lookups go through the cache-aside fetch; avatars
//! are fetched directly every time.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::Url;
use serde_json::Value;
use tracing::warn;

use crate::cache::TtlCache;
use crate::error::{FetchError, Result};
use crate::models::{RepoSummary, UserProfile};

use super::{fetch_json, Upstream};

/// Repositories requested per page
pub const REPOS_PER_PAGE: u32 = 100;

const AVATAR_FALLBACK_TYPE: &str = "image/png";

/// Builds `<base>/users/<username>[/<suffix>]` with the username as a single
/// escaped path segment.
fn users_url(base: &str, username: &str, suffix: Option<&str>) -> Result<Url> {
    let mut url = Url::parse(base).map_err(|e| FetchError::Transport(e.to_string()))?;
    {
        let mut segments = url
            .path_segments_mut()
            .map_err(|_| FetchError::Transport(format!("cannot be a base URL: {}", base)))?;
        segments.pop_if_empty().push("users").push(username);
        if let Some(suffix) = suffix {
            segments.push(suffix);
        }
    }
    Ok(url)
}

pub fn user_url(base: &str, username: &str) -> Result<Url> {
    users_url(base, username, None)
}

pub fn repos_url(base: &str, username: &str) -> Result<Url> {
    let mut url = users_url(base, username, Some("repos"))?;
    url.query_pairs_mut()
        .append_pair("per_page", &REPOS_PER_PAGE.to_string());
    Ok(url)
}

// == Profile ==
/// Fetches the profile of `username` through `cache` under `user:<username>`.
///
/// A payload without `login` is reported as a decode failure.
pub async fn fetch_user(
    upstream: &dyn Upstream,
    base: &str,
    cache: &TtlCache<Value>,
    username: &str,
) -> Result<UserProfile> {
    let url = user_url(base, username)?;
    let data = fetch_json(upstream, url.as_str(), cache, &format!("user:{}", username)).await?;
    let profile: UserProfile = serde_json::from_value(data)?;
    if profile.login.is_none() {
        return Err(FetchError::Decode("profile has no login".to_string()));
    }
    Ok(profile)
}

// == Repositories ==
/// Fetches up to [`REPOS_PER_PAGE`] repositories through `cache` under
/// `repos:<username>`.
pub async fn fetch_repos(
    upstream: &dyn Upstream,
    base: &str,
    cache: &TtlCache<Value>,
    username: &str,
) -> Result<Vec<RepoSummary>> {
    let url = repos_url(base, username)?;
    let data = fetch_json(upstream, url.as_str(), cache, &format!("repos:{}", username)).await?;
    Ok(serde_json::from_value(data)?)
}

// == Avatar ==
/// Downloads the avatar and returns it as a `data:` URI, or `None` on any
/// failure.
pub async fn fetch_avatar_data_uri(upstream: &dyn Upstream, url: &str) -> Option<String> {
    match upstream.get_bytes(url).await {
        Ok(fetched) => {
            let content_type = fetched
                .content_type
                .as_deref()
                .unwrap_or(AVATAR_FALLBACK_TYPE);
            Some(format!(
                "data:{};base64,{}",
                content_type,
                STANDARD.encode(&fetched.bytes)
            ))
        }
        Err(err) => {
            warn!(url, error = %err, "avatar fetch failed, rendering without it");
            None
        }
    }
}
