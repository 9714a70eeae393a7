//! Cache Module
//!
//! In-memory TTL caches for upstream payloads and rendered cards.

mod clock;
mod entry;
mod store;


// Re-export public types
pub use clock::{Clock, ManualClock, SystemClock};
pub use entry::CacheEntry;
pub use store::TtlCache;

// == Public Constants ==
/// Default TTL for every cache
pub const DEFAULT_TTL_SECS: u64 = 3600;
