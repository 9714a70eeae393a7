//! Response capture
//!
//! [`CaptureSink`] stands in for the real sink while a handler runs. Nothing
//! reaches the network until the finished [`CapturedResponse`] is replayed,
//! which gives the caller a chance to cache it first.

use std::collections::BTreeMap;

use axum::http::StatusCode;
use tracing::warn;

use super::ResponseSink;

/// Root tag a cacheable body must start with
pub const SVG_ROOT_TAG: &str = "<svg";

// == Capture Sink ==
/// Buffers everything written to it.
///
/// Header names are stored lower-cased, so a later `set_header` with a
/// different casing replaces the earlier value. The last status written wins
/// and defaults to 200.
#[derive(Debug, Default)]
pub struct CaptureSink {
    headers: BTreeMap<String, String>,
    status: Option<StatusCode>,
    body: String,
    ended: bool,
}

impl CaptureSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// True once `end` has been called.
    pub fn is_ended(&self) -> bool {
        self.ended
    }

    /// Consumes the sink and returns what was written.
    pub fn finish(self) -> CapturedResponse {
        if !self.ended {
            warn!("handler finished without ending the response");
        }
        CapturedResponse {
            status: self.status.unwrap_or(StatusCode::OK),
            headers: self.headers,
            body: self.body,
        }
    }
}

impl ResponseSink for CaptureSink {
    fn set_header(&mut self, name: &str, value: &str) {
        self.headers
            .insert(name.to_ascii_lowercase(), value.to_string());
    }

    fn write_status(&mut self, status: StatusCode) {
        self.status = Some(status);
    }

    fn write_chunk(&mut self, chunk: &str) {
        if self.ended {
            warn!("write after end ignored");
            return;
        }
        self.body.push_str(chunk);
    }

    fn end(&mut self, chunk: Option<&str>) {
        if let Some(chunk) = chunk {
            self.write_chunk(chunk);
        }
        self.ended = true;
    }
}

// == Captured Response ==
/// A complete response assembled by a [`CaptureSink`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedResponse {
    pub status: StatusCode,
    pub headers: BTreeMap<String, String>,
    pub body: String,
}

impl CapturedResponse {
    /// Only successful SVG documents are worth caching.
    pub fn is_cacheable(&self) -> bool {
        self.status == StatusCode::OK && self.body.starts_with(SVG_ROOT_TAG)
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// Writes headers, status and body into `sink`. Consumes the capture so
    /// it can be forwarded only once.
    pub fn replay(self, sink: &mut dyn ResponseSink) {
        for (name, value) in &self.headers {
            sink.set_header(name, value);
        }
        sink.write_status(self.status);
        sink.end(Some(&self.body));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::HttpSink;
    use axum::response::IntoResponse;

    #[test]
    fn test_capture_accumulates_chunks() {
        let mut sink = CaptureSink::new();
        sink.write_chunk("<svg ");
        sink.write_chunk("width=\"1\">");
        sink.end(Some("</svg>"));

        let captured = sink.finish();
        assert_eq!(captured.body, "<svg width=\"1\"></svg>");
        assert_eq!(captured.status, StatusCode::OK);
    }

    #[test]
    fn test_capture_header_keys_case_insensitive() {
        let mut sink = CaptureSink::new();
        sink.set_header("Content-Type", "text/plain");
        sink.set_header("CONTENT-TYPE", "image/svg+xml");

        let captured = sink.finish();
        assert_eq!(captured.headers.len(), 1);
        assert_eq!(captured.header("content-type"), Some("image/svg+xml"));
        assert_eq!(captured.header("Content-Type"), Some("image/svg+xml"));
    }

    #[test]
    fn test_capture_last_status_wins() {
        let mut sink = CaptureSink::new();
        sink.write_status(StatusCode::OK);
        sink.write_status(StatusCode::NOT_FOUND);
        sink.end(None);
        assert_eq!(sink.finish().status, StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_writes_after_end_are_dropped() {
        let mut sink = CaptureSink::new();
        sink.end(Some("<svg/>"));
        sink.write_chunk("trailing");
        assert!(sink.is_ended());
        assert_eq!(sink.finish().body, "<svg/>");
    }

    #[test]
    fn test_cacheable_requires_ok_and_svg_root() {
        let ok_svg = CapturedResponse {
            status: StatusCode::OK,
            headers: BTreeMap::new(),
            body: "<svg></svg>".to_string(),
        };
        assert!(ok_svg.is_cacheable());

        let not_found = CapturedResponse {
            status: StatusCode::NOT_FOUND,
            ..ok_svg.clone()
        };
        assert!(!not_found.is_cacheable());

        let text = CapturedResponse {
            body: "OK".to_string(),
            ..ok_svg.clone()
        };
        assert!(!text.is_cacheable());

        let leading_space = CapturedResponse {
            body: "  <svg></svg>".to_string(),
            ..ok_svg
        };
        assert!(!leading_space.is_cacheable());
    }

    #[test]
    fn test_replay_into_http_sink() {
        let mut capture = CaptureSink::new();
        capture.set_header("Content-Type", "image/svg+xml");
        capture.set_header("Cache-Control", "public, s-maxage=60");
        capture.write_status(StatusCode::INTERNAL_SERVER_ERROR);
        capture.end(Some("<svg></svg>"));

        let mut real = HttpSink::new();
        capture.finish().replay(&mut real);
        assert!(real.is_ended());

        let response = real.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.headers()["content-type"], "image/svg+xml");
        assert_eq!(response.headers()["cache-control"], "public, s-maxage=60");
    }

    #[test]
    fn test_fresh_sink_has_no_state() {
        let mut first = CaptureSink::new();
        first.set_header("x-one", "1");
        first.write_status(StatusCode::NOT_FOUND);
        first.end(Some("first"));
        let _ = first.finish();

        let second = CaptureSink::new().finish();
        assert!(second.headers.is_empty());
        assert!(second.body.is_empty());
        assert_eq!(second.status, StatusCode::OK);
    }
}
