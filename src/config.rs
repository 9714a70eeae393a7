//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use tracing::warn;

use crate::cache::DEFAULT_TTL_SECS;

/// How error cards report their HTTP status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusPolicy {
    /// 404 for unknown users, 500 for other upstream failures
    #[default]
    Threaded,
    /// Always 200; the card itself carries the error
    AlwaysOk,
}

impl FromStr for StatusPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "threaded" => Ok(StatusPolicy::Threaded),
            "always_ok" | "always-ok" => Ok(StatusPolicy::AlwaysOk),
            other => Err(format!("unknown status policy: {}", other)),
        }
    }
}

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Base URL of the GitHub REST API
    pub api_base_url: String,
    /// Optional token sent as a bearer credential to raise rate limits
    pub github_token: Option<String>,
    /// User-Agent header for outbound requests
    pub user_agent: String,
    /// TTL in seconds for the profile and repository caches
    pub api_cache_ttl: u64,
    /// TTL in seconds for the rendered card cache
    pub response_cache_ttl: u64,
    /// Status reporting for error cards
    pub status_policy: StatusPolicy,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `PORT` - HTTP server port (default: 3000)
    /// - `GITHUB_API_URL` - API base URL (default: https://api.github.com)
    /// - `GITHUB_TOKEN` - Optional API token
    /// - `USER_AGENT` - Outbound User-Agent (default: readme-stats)
    /// - `API_CACHE_TTL` - Profile/repo cache TTL in seconds (default: 3600)
    /// - `RESPONSE_CACHE_TTL` - Rendered card cache TTL in seconds (default: 3600)
    /// - `STATUS_POLICY` - `threaded` or `always_ok` (default: threaded)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            server_port: parse_var("PORT").unwrap_or(defaults.server_port),
            api_base_url: env::var("GITHUB_API_URL")
                .ok()
                .map(|v| v.trim_end_matches('/').to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or(defaults.api_base_url),
            github_token: env::var("GITHUB_TOKEN").ok().filter(|v| !v.is_empty()),
            user_agent: env::var("USER_AGENT")
                .ok()
                .filter(|v| !v.is_empty())
                .unwrap_or(defaults.user_agent),
            api_cache_ttl: parse_var("API_CACHE_TTL").unwrap_or(defaults.api_cache_ttl),
            response_cache_ttl: parse_var("RESPONSE_CACHE_TTL")
                .unwrap_or(defaults.response_cache_ttl),
            status_policy: status_policy_from(env::var("STATUS_POLICY").ok())
                .unwrap_or(defaults.status_policy),
        }
    }

    pub fn api_cache_ttl(&self) -> Duration {
        Duration::from_secs(self.api_cache_ttl)
    }

    pub fn response_cache_ttl(&self) -> Duration {
        Duration::from_secs(self.response_cache_ttl)
    }
}

fn parse_var<T: FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.parse().ok())
}

/// Parses a `STATUS_POLICY` value. Unrecognized values are logged and
/// ignored.
fn status_policy_from(raw: Option<String>) -> Option<StatusPolicy> {
    let raw = raw?;
    match raw.parse() {
        Ok(policy) => Some(policy),
        Err(err) => {
            warn!(value = %raw, "{}, using the default policy", err);
            None
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 3000,
            api_base_url: "https://api.github.com".to_string(),
            github_token: None,
            user_agent: "readme-stats".to_string(),
            api_cache_ttl: DEFAULT_TTL_SECS,
            response_cache_ttl: DEFAULT_TTL_SECS,
            status_policy: StatusPolicy::Threaded,
        }
    }
}
