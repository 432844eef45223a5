//! In-memory key-value store for tests and ephemeral use.

use std::collections::HashMap;
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use crate::error::{LeavegenError, Result};
use crate::storage::KvStore;

/// `HashMap`-backed [`KvStore`].
///
/// Supports fault injection: flipping [`fail_reads`](Self::fail_reads) or
/// [`fail_writes`](Self::fail_writes) makes the corresponding operations
/// return a storage error, used to exercise the cache's degrade-to-miss
/// behavior.
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent `read`/`keys` call fail when `fail` is true.
    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::Relaxed);
    }

    /// Make every subsequent `write`/`delete` call fail when `fail` is true.
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::Relaxed);
    }

    /// Number of keys currently stored.
    pub fn len(&self) -> usize {
        self.entries.lock().expect("memory store lock poisoned").len()
    }

    /// Whether the store holds no keys.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn injected_fault(&self, flag: &AtomicBool) -> Result<()> {
        if flag.load(Ordering::Relaxed) {
            Err(LeavegenError::Storage(io::Error::other(
                "injected storage fault",
            )))
        } else {
            Ok(())
        }
    }
}

impl KvStore for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<String>> {
        self.injected_fault(&self.fail_reads)?;
        let entries = self.entries.lock().expect("memory store lock poisoned");
        Ok(entries.get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        self.injected_fault(&self.fail_writes)?;
        let mut entries = self.entries.lock().expect("memory store lock poisoned");
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<()> {
        self.injected_fault(&self.fail_writes)?;
        let mut entries = self.entries.lock().expect("memory store lock poisoned");
        entries.remove(key);
        Ok(())
    }

    fn keys(&self, prefix: &str) -> Result<Vec<String>> {
        self.injected_fault(&self.fail_reads)?;
        let entries = self.entries.lock().expect("memory store lock poisoned");
        Ok(entries
            .keys()
            .filter(|k| k.starts_with(prefix))
            .cloned()
            .collect())
    }
}
