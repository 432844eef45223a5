//! Generated-letter cache with TTL expiry, creation-order eviction, and
//! persisted hit/miss statistics.
//!
//! Entries live in a [`KvStore`] under fingerprint-derived keys, as JSON
//! `{payload, createdAt, expiresAt}` records. The cache is advisory: every
//! public method is total, and any storage fault degrades to "not cached"
//! instead of failing the caller's request.

use std::time::Duration;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::cache::fingerprint::{fingerprint, KEY_PREFIX};
use crate::config::CacheConfig;
use crate::request::LeaveRequest;
use crate::storage::KvStore;

/// Fixed store key holding the serialized [`CacheStats`] record.
const STATS_KEY: &str = "cache_stats";

/// How far below `max_entries` a batch eviction drains the store, so a
/// full cache does not evict on every single write.
const EVICTION_HEADROOM: usize = 10;

/// A single cached letter. Immutable once written; a new `set` for the
/// same key replaces the record wholesale.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CacheEntry {
    /// The generated letter text.
    payload: String,
    /// Unix milliseconds when the entry was written.
    created_at: i64,
    /// Unix milliseconds after which the entry must not be served.
    expires_at: i64,
}

/// Persisted hit/miss counters. `total_requests` and `hit_rate` are
/// derived on demand, never stored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheStats {
    /// Number of lookups served from the cache.
    pub hits: u64,
    /// Number of lookups that found nothing servable.
    pub misses: u64,
}

impl CacheStats {
    /// Total lookups recorded since the last clear.
    pub fn total_requests(&self) -> u64 {
        self.hits + self.misses
    }

    /// Hit rate as a percentage (0 when nothing has been recorded).
    pub fn hit_rate(&self) -> f64 {
        let total = self.total_requests();
        if total == 0 {
            0.0
        } else {
            100.0 * self.hits as f64 / total as f64
        }
    }
}

/// Diagnostic view of one stored entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryInfo {
    /// Store key with the namespace prefix stripped.
    pub key: String,
    /// Unix milliseconds when the entry was written (0 if unreadable).
    pub created_at: i64,
    /// Unix milliseconds when the entry expires (0 if unreadable).
    pub expires_at: i64,
}

/// Diagnostic enumeration of the store, most recent entry first.
///
/// Entries past their `expires_at` still appear here until a lookup lazily
/// deletes them; render staleness by comparing against the current time.
#[derive(Debug, Clone, Default)]
pub struct CacheInfo {
    /// Count of live namespaced keys.
    pub size: usize,
    /// Per-entry metadata, sorted by `created_at` descending.
    pub entries: Vec<EntryInfo>,
}

/// Content-addressed cache mapping leave requests to generated letters.
///
/// Constructed once at startup with the backing store and handed to
/// callers; all methods take `&self`.
pub struct ResultCache<S: KvStore> {
    store: S,
    ttl: Duration,
    max_entries: usize,
}

impl<S: KvStore> ResultCache<S> {
    /// Create a cache over `store` with the default 24-hour TTL and a
    /// 50-entry bound.
    pub fn new(store: S) -> Self {
        Self::with_config(store, &CacheConfig::default())
    }

    /// Create a cache over `store` using `config`'s TTL and size bound.
    ///
    /// `max_entries` is clamped to a minimum of 1.
    pub fn with_config(store: S, config: &CacheConfig) -> Self {
        Self {
            store,
            ttl: Duration::from_secs(config.ttl_secs),
            max_entries: config.max_entries.max(1),
        }
    }

    /// Look up the cached letter for `request`.
    ///
    /// Records a hit or miss in the persisted stats. An expired entry is
    /// deleted and reported as a miss; stale letters are never served.
    /// Storage faults and corrupt records also count as misses.
    pub fn get(&self, request: &LeaveRequest) -> Option<String> {
        let key = fingerprint(request);
        let entry = match self.load_entry(&key) {
            Some(entry) => entry,
            None => {
                self.record(false);
                return None;
            }
        };

        if now_ms() > entry.expires_at {
            debug!(key = %redact(&key), "cache entry expired, removing");
            if let Err(e) = self.store.delete(&key) {
                warn!(key = %redact(&key), error = %e, "failed to delete expired cache entry");
            }
            self.record(false);
            return None;
        }

        debug!(key = %redact(&key), "cache hit");
        self.record(true);
        Some(entry.payload)
    }

    /// Cache `payload` for `request` with the configured TTL.
    pub fn set(&self, request: &LeaveRequest, payload: &str) {
        self.set_with_ttl(request, payload, self.ttl);
    }

    /// Cache `payload` for `request` with an explicit TTL, replacing any
    /// prior entry, then enforce the size bound.
    ///
    /// Write faults are logged and swallowed; caching is best-effort.
    pub fn set_with_ttl(&self, request: &LeaveRequest, payload: &str, ttl: Duration) {
        let key = fingerprint(request);
        let now = now_ms();
        let entry = CacheEntry {
            payload: payload.to_string(),
            created_at: now,
            // Clamp so expiresAt is always strictly after createdAt.
            expires_at: now + (ttl.as_millis() as i64).max(1),
        };
        let json = match serde_json::to_string(&entry) {
            Ok(json) => json,
            Err(e) => {
                warn!(error = %e, "failed to serialize cache entry");
                return;
            }
        };
        if let Err(e) = self.store.write(&key, &json) {
            warn!(key = %redact(&key), error = %e, "failed to write cache entry");
            return;
        }
        debug!(key = %redact(&key), "cached generated letter");
        self.evict_if_over_bound();
    }

    /// Delete the entry for `request` if present. Idempotent.
    pub fn remove(&self, request: &LeaveRequest) {
        let key = fingerprint(request);
        if let Err(e) = self.store.delete(&key) {
            warn!(key = %redact(&key), error = %e, "failed to remove cache entry");
        }
    }

    /// Delete every cached letter and the stats record. Idempotent.
    pub fn clear(&self) {
        match self.store.keys(KEY_PREFIX) {
            Ok(keys) => {
                for key in keys {
                    if let Err(e) = self.store.delete(&key) {
                        warn!(key = %redact(&key), error = %e, "failed to delete cache entry");
                    }
                }
            }
            Err(e) => warn!(error = %e, "failed to enumerate cache entries for clear"),
        }
        if let Err(e) = self.store.delete(STATS_KEY) {
            warn!(error = %e, "failed to reset cache stats");
        }
        debug!("cache cleared");
    }

    /// Persisted hit/miss counters. Unreadable stats read as zeroed.
    pub fn stats(&self) -> CacheStats {
        match self.store.read(STATS_KEY) {
            Ok(Some(json)) => serde_json::from_str(&json).unwrap_or_default(),
            Ok(None) => CacheStats::default(),
            Err(e) => {
                warn!(error = %e, "failed to read cache stats");
                CacheStats::default()
            }
        }
    }

    /// Diagnostic listing of stored entries, most recent first.
    ///
    /// Expired-but-not-yet-deleted entries are included; unreadable ones
    /// report zeroed timestamps.
    pub fn info(&self) -> CacheInfo {
        let keys = match self.store.keys(KEY_PREFIX) {
            Ok(keys) => keys,
            Err(e) => {
                warn!(error = %e, "failed to enumerate cache entries");
                return CacheInfo::default();
            }
        };
        let mut entries: Vec<EntryInfo> = keys
            .iter()
            .map(|key| {
                let (created_at, expires_at) = self
                    .load_entry(key)
                    .map(|e| (e.created_at, e.expires_at))
                    .unwrap_or((0, 0));
                EntryInfo {
                    key: redact(key).to_string(),
                    created_at,
                    expires_at,
                }
            })
            .collect();
        entries.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        CacheInfo {
            size: keys.len(),
            entries,
        }
    }

    /// Whether an unexpired entry exists for `request`.
    ///
    /// Diagnostic probe: does not touch the hit/miss counters and does
    /// not delete an expired entry it encounters.
    pub fn contains(&self, request: &LeaveRequest) -> bool {
        let key = fingerprint(request);
        self.load_entry(&key)
            .map(|entry| now_ms() <= entry.expires_at)
            .unwrap_or(false)
    }

    // -- private helpers ---------------------------------------------------

    /// Read and parse an entry; storage faults and corrupt JSON both read
    /// as absent. Corrupt records are left in place for eviction to
    /// collect (they sort as oldest).
    fn load_entry(&self, key: &str) -> Option<CacheEntry> {
        match self.store.read(key) {
            Ok(Some(json)) => match serde_json::from_str(&json) {
                Ok(entry) => Some(entry),
                Err(e) => {
                    warn!(key = %redact(key), error = %e, "corrupt cache entry");
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                warn!(key = %redact(key), error = %e, "failed to read cache entry");
                None
            }
        }
    }

    /// Bump the persisted hit or miss counter, best-effort.
    fn record(&self, hit: bool) {
        let mut stats = self.stats();
        if hit {
            stats.hits = stats.hits.saturating_add(1);
        } else {
            stats.misses = stats.misses.saturating_add(1);
        }
        match serde_json::to_string(&stats) {
            Ok(json) => {
                if let Err(e) = self.store.write(STATS_KEY, &json) {
                    warn!(error = %e, "failed to persist cache stats");
                }
            }
            Err(e) => warn!(error = %e, "failed to serialize cache stats"),
        }
    }

    /// If the entry count exceeds the bound, delete the oldest entries by
    /// creation time until the count is back at `max_entries - 10`.
    /// Entries whose metadata cannot be read sort as oldest.
    fn evict_if_over_bound(&self) {
        let keys = match self.store.keys(KEY_PREFIX) {
            Ok(keys) => keys,
            Err(e) => {
                warn!(error = %e, "failed to enumerate cache entries for eviction");
                return;
            }
        };
        if keys.len() <= self.max_entries {
            return;
        }

        let mut aged: Vec<(String, i64)> = keys
            .into_iter()
            .map(|key| {
                let created_at = self.load_entry(&key).map(|e| e.created_at).unwrap_or(0);
                (key, created_at)
            })
            .collect();
        aged.sort_by_key(|(_, created_at)| *created_at);

        let low_water = self.max_entries.saturating_sub(EVICTION_HEADROOM);
        let excess = aged.len().saturating_sub(low_water);
        for (key, _) in aged.into_iter().take(excess) {
            if let Err(e) = self.store.delete(&key) {
                warn!(key = %redact(&key), error = %e, "failed to evict cache entry");
            }
        }
        debug!(evicted = excess, "evicted oldest cache entries");
    }
}

/// Current time as Unix milliseconds.
fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}

/// Strip the namespace prefix for logs and diagnostics.
fn redact(key: &str) -> &str {
    key.strip_prefix(KEY_PREFIX).unwrap_or(key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::{LeaveType, Tone};
    use crate::storage::MemoryStore;
    use std::sync::Arc;

    fn request(name: &str) -> LeaveRequest {
        LeaveRequest {
            full_name: name.into(),
            position: "Nhân viên".into(),
            recipient_name: "Trần Thị Bình".into(),
            recipient_position: "Trưởng phòng".into(),
            leave_type: LeaveType::Personal,
            start_date: "2026-09-01".into(),
            end_date: "2026-09-02".into(),
            reason: "Việc gia đình".into(),
            tone: Tone::Formal,
            ..Default::default()
        }
    }

    fn cache() -> (ResultCache<Arc<MemoryStore>>, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        (ResultCache::new(Arc::clone(&store)), store)
    }

    /// Write a raw entry record straight into the store.
    fn seed_entry(store: &MemoryStore, key: &str, created_at: i64, expires_at: i64) {
        let json = serde_json::to_string(&CacheEntry {
            payload: format!("letter for {key}"),
            created_at,
            expires_at,
        })
        .unwrap();
        store.write(key, &json).unwrap();
    }

    #[test]
    fn set_then_get_returns_payload() {
        let (cache, _) = cache();
        let req = request("Nguyễn Văn An");
        assert_eq!(cache.get(&req), None);
        cache.set(&req, "Kính gửi anh/chị...");
        assert_eq!(cache.get(&req), Some("Kính gửi anh/chị...".into()));
        let stats = cache.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
    }

    #[test]
    fn overwrite_replaces_prior_entry() {
        let (cache, _) = cache();
        let req = request("Nguyễn Văn An");
        cache.set(&req, "bản nháp");
        cache.set(&req, "bản cuối");
        assert_eq!(cache.get(&req), Some("bản cuối".into()));
    }

    #[test]
    fn expired_entry_misses_and_is_deleted() {
        let (cache, store) = cache();
        let req = request("Nguyễn Văn An");
        let key = fingerprint(&req);
        seed_entry(&store, &key, 1_000, 2_000); // long past
        assert_eq!(cache.get(&req), None);
        assert_eq!(store.read(&key).unwrap(), None, "lazy expiry deletes");
        assert_eq!(cache.stats().misses, 1);
    }

    #[test]
    fn contains_checks_expiry_without_counting() {
        let (cache, store) = cache();
        let live = request("Nguyễn Văn An");
        let stale = request("Lê Thị Chi");
        cache.set(&live, "thư");
        seed_entry(&store, &fingerprint(&stale), 1_000, 2_000);

        assert!(cache.contains(&live));
        assert!(!cache.contains(&stale));
        assert!(!cache.contains(&request("khác")));
        assert_eq!(cache.stats(), CacheStats::default());
        // The probe must not eagerly delete the stale entry either.
        assert!(store.read(&fingerprint(&stale)).unwrap().is_some());
    }

    #[test]
    fn corrupt_entry_reads_as_miss() {
        let (cache, store) = cache();
        let req = request("Nguyễn Văn An");
        store.write(&fingerprint(&req), "this is not json").unwrap();
        assert_eq!(cache.get(&req), None);
        assert_eq!(cache.stats().misses, 1);
    }

    #[test]
    fn stats_accumulate_and_derive() {
        let (cache, _) = cache();
        let a = request("Nguyễn Văn An");
        let b = request("Lê Thị Chi");
        cache.set(&a, "thư A");

        cache.get(&a); // hit
        cache.get(&a); // hit
        cache.get(&a); // hit
        cache.get(&b); // miss
        cache.get(&request("khác")); // miss

        let stats = cache.stats();
        assert_eq!(stats.hits, 3);
        assert_eq!(stats.misses, 2);
        assert_eq!(stats.total_requests(), 5);
        assert!((stats.hit_rate() - 60.0).abs() < f64::EPSILON);
    }

    #[test]
    fn hit_rate_is_zero_when_untouched() {
        let (cache, _) = cache();
        assert_eq!(cache.stats().hit_rate(), 0.0);
    }

    #[test]
    fn eviction_drops_oldest_down_to_low_water_mark() {
        let (cache, store) = cache();
        // 59 pre-existing entries with strictly increasing creation times.
        for i in 1..=59i64 {
            seed_entry(&store, &format!("{KEY_PREFIX}seed{i:02}"), i, i64::MAX);
        }
        // The 60th write tips the count over 50 and triggers a batch
        // eviction down to 40.
        cache.set(&request("Nguyễn Văn An"), "thư mới");

        let keys = store.keys(KEY_PREFIX).unwrap();
        assert_eq!(keys.len(), 40);
        for i in 1..=20i64 {
            assert!(
                !keys.contains(&format!("{KEY_PREFIX}seed{i:02}")),
                "seed{i:02} was among the oldest and should be gone"
            );
        }
        for i in 50..=59i64 {
            assert!(
                keys.contains(&format!("{KEY_PREFIX}seed{i:02}")),
                "seed{i:02} was among the newest and should survive"
            );
        }
        assert!(keys.contains(&fingerprint(&request("Nguyễn Văn An"))));
    }

    #[test]
    fn corrupt_entries_evict_first() {
        let (cache, store) = cache();
        store.write(&format!("{KEY_PREFIX}garbled"), "{{{{").unwrap();
        for i in 1..=49i64 {
            seed_entry(&store, &format!("{KEY_PREFIX}seed{i:02}"), 1_000 + i, i64::MAX);
        }
        cache.set(&request("Nguyễn Văn An"), "thư mới");

        let keys = store.keys(KEY_PREFIX).unwrap();
        assert_eq!(keys.len(), 40);
        assert!(
            !keys.contains(&format!("{KEY_PREFIX}garbled")),
            "unreadable entry sorts as oldest and goes first"
        );
    }

    #[test]
    fn no_eviction_at_or_under_the_bound() {
        let (cache, store) = cache();
        for i in 1..=49i64 {
            seed_entry(&store, &format!("{KEY_PREFIX}seed{i:02}"), i, i64::MAX);
        }
        cache.set(&request("Nguyễn Văn An"), "thư");
        assert_eq!(store.keys(KEY_PREFIX).unwrap().len(), 50);
    }

    #[test]
    fn clear_empties_store_and_stats_idempotently() {
        let (cache, store) = cache();
        let req = request("Nguyễn Văn An");
        cache.set(&req, "thư");
        cache.get(&req);
        cache.get(&request("khác"));
        assert_ne!(cache.stats(), CacheStats::default());

        cache.clear();
        assert_eq!(cache.info().size, 0);
        assert_eq!(cache.stats(), CacheStats::default());
        assert!(store.is_empty());

        cache.clear();
        assert_eq!(cache.info().size, 0);
        assert_eq!(cache.stats(), CacheStats::default());
    }

    #[test]
    fn remove_is_idempotent() {
        let (cache, _) = cache();
        let req = request("Nguyễn Văn An");
        cache.set(&req, "thư");
        cache.remove(&req);
        assert!(!cache.contains(&req));
        cache.remove(&req);
    }

    #[test]
    fn info_lists_entries_newest_first_including_expired() {
        let (cache, store) = cache();
        seed_entry(&store, &format!("{KEY_PREFIX}old"), 1_000, 2_000);
        seed_entry(&store, &format!("{KEY_PREFIX}mid"), 5_000, i64::MAX);
        seed_entry(&store, &format!("{KEY_PREFIX}new"), 9_000, i64::MAX);

        let info = cache.info();
        assert_eq!(info.size, 3);
        let keys: Vec<&str> = info.entries.iter().map(|e| e.key.as_str()).collect();
        assert_eq!(keys, vec!["new", "mid", "old"]);
        // The expired entry is still reported; staleness is the caller's
        // comparison to make.
        assert_eq!(info.entries[2].expires_at, 2_000);
    }

    #[test]
    fn info_reports_unreadable_entries_with_zeroed_timestamps() {
        let (cache, store) = cache();
        store.write(&format!("{KEY_PREFIX}garbled"), "nope").unwrap();
        let info = cache.info();
        assert_eq!(info.size, 1);
        assert_eq!(info.entries[0].key, "garbled");
        assert_eq!(info.entries[0].created_at, 0);
        assert_eq!(info.entries[0].expires_at, 0);
    }

    #[test]
    fn storage_faults_never_escape() {
        let (cache, store) = cache();
        let req = request("Nguyễn Văn An");
        cache.set(&req, "thư");

        store.fail_reads(true);
        assert_eq!(cache.get(&req), None, "read fault degrades to a miss");
        assert!(!cache.contains(&req));
        assert_eq!(cache.stats(), CacheStats::default());
        assert_eq!(cache.info().size, 0);
        store.fail_reads(false);

        store.fail_writes(true);
        cache.set(&req, "thư khác"); // swallowed
        cache.remove(&req); // swallowed
        cache.clear(); // swallowed
        store.fail_writes(false);

        // The original entry survived the failed overwrite attempts.
        assert_eq!(cache.get(&req), Some("thư".into()));
    }

    #[test]
    fn expiry_honors_custom_ttl() {
        let (cache, store) = cache();
        let req = request("Nguyễn Văn An");
        cache.set_with_ttl(&req, "thư", Duration::from_secs(3600));
        let key = fingerprint(&req);
        let entry: CacheEntry =
            serde_json::from_str(&store.read(&key).unwrap().unwrap()).unwrap();
        assert_eq!(entry.expires_at - entry.created_at, 3_600_000);
        assert!(entry.expires_at > entry.created_at);
    }

    #[test]
    fn zero_ttl_still_orders_expiry_after_creation() {
        let (cache, store) = cache();
        let req = request("Nguyễn Văn An");
        cache.set_with_ttl(&req, "thư", Duration::ZERO);
        let entry: CacheEntry =
            serde_json::from_str(&store.read(&fingerprint(&req)).unwrap().unwrap()).unwrap();
        assert!(entry.expires_at > entry.created_at);
    }

    #[test]
    fn entry_serializes_with_camel_case_keys() {
        let json = serde_json::to_string(&CacheEntry {
            payload: "thư".into(),
            created_at: 1,
            expires_at: 2,
        })
        .unwrap();
        assert_eq!(json, r#"{"payload":"thư","createdAt":1,"expiresAt":2}"#);
    }
}
