//! API Handlers
//!
//! HTTP request handlers for the card endpoint and the plain-text routes.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
};
use serde_json::Value;
use tracing::debug;

use crate::cache::{Clock, SystemClock, TtlCache};
use crate::capture::{CaptureSink, CapturedResponse, HttpSink, ResponseSink};
use crate::config::{Config, StatusPolicy};
use crate::fetch::{HttpUpstream, Upstream};
use crate::models::{CardOptions, CardQuery};
use crate::render::{
    render_card, RenderContext, ERROR_CACHE_CONTROL, SUCCESS_CACHE_CONTROL, SVG_CONTENT_TYPE,
};

const DEMO_PAGE: &str = include_str!("demo.html");

/// Application state shared across all handlers.
///
/// Holds the three caches and the upstream client. Each cache is an
/// independent object with its own TTL.
#[derive(Clone)]
pub struct AppState {
    /// Upstream used for profiles, repositories and avatars
    pub upstream: Arc<dyn Upstream>,
    /// Base URL of the GitHub API
    pub api_base_url: Arc<str>,
    /// Profiles keyed by `user:<username>`
    pub user_cache: Arc<TtlCache<Value>>,
    /// Repository lists keyed by `repos:<username>`
    pub repos_cache: Arc<TtlCache<Value>>,
    /// Rendered SVG bodies keyed by the request's query parameters
    pub response_cache: Arc<TtlCache<String>>,
    pub status_policy: StatusPolicy,
}

impl AppState {
    /// Creates state around `upstream` using the system clock.
    pub fn new(upstream: Arc<dyn Upstream>, config: &Config) -> Self {
        Self::with_clock(upstream, config, Arc::new(SystemClock))
    }

    /// Creates state whose caches read time from `clock`.
    pub fn with_clock(upstream: Arc<dyn Upstream>, config: &Config, clock: Arc<dyn Clock>) -> Self {
        Self {
            upstream,
            api_base_url: Arc::from(config.api_base_url.as_str()),
            user_cache: Arc::new(TtlCache::with_clock(config.api_cache_ttl(), clock.clone())),
            repos_cache: Arc::new(TtlCache::with_clock(config.api_cache_ttl(), clock.clone())),
            response_cache: Arc::new(TtlCache::with_clock(config.response_cache_ttl(), clock)),
            status_policy: config.status_policy,
        }
    }

    /// Creates state with a real HTTP client built from the configuration.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let upstream = HttpUpstream::new(&config.user_agent, config.github_token.as_deref())?;
        Ok(Self::new(Arc::new(upstream), config))
    }

    fn render_context(&self) -> RenderContext<'_> {
        RenderContext {
            upstream: self.upstream.as_ref(),
            api_base_url: &self.api_base_url,
            user_cache: &self.user_cache,
            repos_cache: &self.repos_cache,
            status_policy: self.status_policy,
        }
    }
}

/// Response cache key: the query parameters as a JSON object with sorted
/// keys, so parameter order does not matter.
pub fn response_cache_key(query: &CardQuery) -> String {
    serde_json::to_string(query).unwrap_or_else(|_| format!("{:?}", query))
}

fn cached_card(svg: &str) -> Response {
    let mut sink = HttpSink::new();
    sink.set_header(header::CONTENT_TYPE.as_str(), SVG_CONTENT_TYPE);
    sink.set_header("X-Cache-Hit", "true");
    sink.set_header(header::CACHE_CONTROL.as_str(), SUCCESS_CACHE_CONTROL);
    sink.write_status(StatusCode::OK);
    sink.end(Some(svg));
    sink.into_response()
}

/// Whether a captured card may be served from the response cache.
///
/// Error cards are 200 under `AlwaysOk`, so the short error cache-control
/// marks them as not storable.
fn should_store(captured: &CapturedResponse) -> bool {
    captured.is_cacheable()
        && captured.header(header::CACHE_CONTROL.as_str()) != Some(ERROR_CACHE_CONTROL)
}

/// Handler for GET /api and GET /api/*
///
/// Serves a cached card when one is fresh. Otherwise renders into a capture
/// sink, stores the result when it is a successful card, and forwards it.
pub async fn card_handler(
    State(state): State<AppState>,
    query: Option<Query<CardQuery>>,
) -> Response {
    let query = query.map(|Query(q)| q).unwrap_or_default();
    let key = response_cache_key(&query);

    if let Some(svg) = state.response_cache.get(&key).await {
        debug!(key = %key, "response cache hit");
        return cached_card(&svg);
    }

    let options = CardOptions::from_query(&query);
    let mut capture = CaptureSink::new();
    render_card(&state.render_context(), &options, &mut capture).await;

    let captured = capture.finish();
    if should_store(&captured) {
        state.response_cache.insert(key, captured.body.clone()).await;
    }

    let mut sink = HttpSink::new();
    captured.replay(&mut sink);
    sink.into_response()
}

/// Handler for GET /
pub async fn index_handler() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        "readme-stats is running. Use /api or /stats.",
    )
}

/// Handler for GET /stats
///
/// Demo page embedding a few example cards.
pub async fn demo_handler() -> Html<&'static str> {
    Html(DEMO_PAGE)
}

/// Handler for GET /health
pub async fn health_handler() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/plain")], "OK")
}

/// Fallback for unknown paths
pub async fn not_found_handler() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        "404 - Not Found",
    )
}
