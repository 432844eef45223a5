//! Cache tuning knobs.

use serde::{Deserialize, Serialize};

/// Configuration for the result cache.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Whether generated letters are cached at all. When false the
    /// caching generator calls straight through to the provider.
    pub enabled: bool,
    /// Entry lifetime in seconds. Entries older than this are treated as
    /// absent and deleted on the next lookup.
    pub ttl_secs: u64,
    /// Hard cap on stored entries. Exceeding it after a write triggers a
    /// batch eviction down to `max_entries - 10`.
    pub max_entries: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            // 24 hours
            ttl_secs: 86_400,
            max_entries: 50,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let cfg = CacheConfig::default();
        assert!(cfg.enabled);
        assert_eq!(cfg.ttl_secs, 86_400);
        assert_eq!(cfg.max_entries, 50);
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let cfg: CacheConfig = serde_json::from_str(r#"{"ttl_secs": 60}"#).unwrap();
        assert!(cfg.enabled);
        assert_eq!(cfg.ttl_secs, 60);
        assert_eq!(cfg.max_entries, 50);
    }
}
