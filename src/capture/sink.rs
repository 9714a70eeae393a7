//! Response Sink Module
//!
//! The output contract a card handler writes to, and the sink that turns
//! those writes into an axum response.

use axum::{
    body::Body,
    http::{HeaderMap, HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use tracing::warn;

/// The four output operations a handler uses to emit a response.
pub trait ResponseSink: Send {
    fn set_header(&mut self, name: &str, value: &str);
    fn write_status(&mut self, status: StatusCode);
    fn write_chunk(&mut self, chunk: &str);
    /// Writes the optional final chunk and closes the response.
    fn end(&mut self, chunk: Option<&str>);
}

// == HTTP Sink ==
/// Sink that assembles an axum [`Response`].
#[derive(Debug)]
pub struct HttpSink {
    status: StatusCode,
    headers: HeaderMap,
    body: String,
    ended: bool,
}

impl HttpSink {
    pub fn new() -> Self {
        Self {
            status: StatusCode::OK,
            headers: HeaderMap::new(),
            body: String::new(),
            ended: false,
        }
    }

    pub fn is_ended(&self) -> bool {
        self.ended
    }
}

impl Default for HttpSink {
    fn default() -> Self {
        Self::new()
    }
}

impl ResponseSink for HttpSink {
    fn set_header(&mut self, name: &str, value: &str) {
        match (
            HeaderName::from_bytes(name.as_bytes()),
            HeaderValue::from_str(value),
        ) {
            (Ok(name), Ok(value)) => {
                self.headers.insert(name, value);
            }
            _ => warn!(name, "dropping invalid response header"),
        }
    }

    fn write_status(&mut self, status: StatusCode) {
        self.status = status;
    }

    fn write_chunk(&mut self, chunk: &str) {
        if !self.ended {
            self.body.push_str(chunk);
        }
    }

    fn end(&mut self, chunk: Option<&str>) {
        if let Some(chunk) = chunk {
            self.write_chunk(chunk);
        }
        self.ended = true;
    }
}

impl IntoResponse for HttpSink {
    fn into_response(self) -> Response {
        let mut response = Response::new(Body::from(self.body));
        *response.status_mut() = self.status;
        *response.headers_mut() = self.headers;
        response
    }
}
