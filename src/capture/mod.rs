//! Capture Module
//!
//! The output contract shared by handlers and sinks, the real HTTP sink, and
//! the buffering sink used to cache complete responses.

mod proxy;
mod sink;

pub use proxy::{CaptureSink, CapturedResponse, SVG_ROOT_TAG};
pub use sink::{HttpSink, ResponseSink};
