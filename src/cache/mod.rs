//! Cache Module
//!
//! Provides in-memory caching with fixed-TTL expiration, lazy eviction on
//! read and an optional threshold-triggered sweep on write.

mod clock;
mod entry;
mod policy;
mod shared;
mod stats;
mod store;


// Re-export public types
pub use clock::{current_timestamp_ms, duration_ms, Clock, ManualClock, SystemClock};
pub use entry::CacheEntry;
pub use policy::SweepPolicy;
pub use shared::{CacheSnapshot, SharedCache};
pub use stats::CacheStats;
pub use store::TtlCache;
