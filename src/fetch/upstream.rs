//! Outbound HTTP
//!
//! The [`Upstream`] trait is the seam between the card logic and the network.
//! [`HttpUpstream`] is the reqwest-backed implementation used by the server.

use async_trait::async_trait;
use reqwest::{
    header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE, USER_AGENT},
    Client, Response,
};
use serde_json::Value;
use tracing::warn;

use crate::error::{FetchError, Result};

/// Raw bytes of a fetched resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedBytes {
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// Source of upstream data.
#[async_trait]
pub trait Upstream: Send + Sync {
    /// GETs `url` and decodes the body as JSON. Non-2xx statuses are errors.
    async fn get_json(&self, url: &str) -> Result<Value>;

    /// GETs `url` and returns the raw body. Non-2xx statuses are errors.
    async fn get_bytes(&self, url: &str) -> Result<FetchedBytes>;
}

// == HTTP Upstream ==
/// reqwest client with GitHub headers preset.
#[derive(Debug, Clone)]
pub struct HttpUpstream {
    client: Client,
}

impl HttpUpstream {
    /// Builds a client sending `user_agent` and, when present, a bearer token.
    pub fn new(user_agent: &str, token: Option<&str>) -> anyhow::Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_str(user_agent)?);
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        if let Some(token) = token {
            let mut value = HeaderValue::from_str(&format!("Bearer {}", token))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let client = Client::builder().default_headers(headers).build()?;
        Ok(Self { client })
    }

    async fn send(&self, url: &str) -> Result<Response> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        warn!(url, status = status.as_u16(), body = %body, "GitHub API returned an error");
        Err(FetchError::from_status(status.as_u16()))
    }
}

#[async_trait]
impl Upstream for HttpUpstream {
    async fn get_json(&self, url: &str) -> Result<Value> {
        let response = self.send(url).await?;
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn get_bytes(&self, url: &str) -> Result<FetchedBytes> {
        let response = self.send(url).await?;
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let bytes = response.bytes().await?.to_vec();
        Ok(FetchedBytes {
            content_type,
            bytes,
        })
    }
}
