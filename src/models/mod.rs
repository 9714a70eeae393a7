//! Request options and upstream payloads
//!
//! `requests` parses card query strings; `github` decodes the GitHub fields
//! the card displays.

pub mod github;
pub mod requests;

// Re-export commonly used types
pub use github::{RepoSummary, UserProfile};
pub use requests::{clamp_height, CardOptions, CardQuery};
