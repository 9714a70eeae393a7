//! Fetch Module
//!
//! Upstream access for cards: the network seam, the cache-aside helper and
//! the GitHub endpoints built on top of them.

mod cached;
pub mod github;
mod upstream;

pub use cached::fetch_json;
pub use github::{fetch_avatar_data_uri, fetch_repos, fetch_user};
pub use upstream::{FetchedBytes, HttpUpstream, Upstream};
