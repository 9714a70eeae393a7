//! GitHub payloads
//!
//! Only the fields the card displays are decoded; everything else in the
//! upstream JSON is ignored.

use serde::Deserialize;

/// Subset of `GET /users/{username}`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct UserProfile {
    pub login: Option<String>,
    pub avatar_url: Option<String>,
    pub public_repos: Option<u64>,
    pub followers: Option<u64>,
}

/// One item of `GET /users/{username}/repos`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct RepoSummary {
    #[serde(default)]
    pub language: Option<String>,
}
