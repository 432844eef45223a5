//! Letter result caching with TTL, creation-order eviction, and persisted
//! hit/miss statistics.

pub mod fingerprint;
pub mod result_cache;

pub use fingerprint::{fingerprint, KEY_PREFIX};
pub use result_cache::{CacheInfo, CacheStats, EntryInfo, ResultCache};
