//! Flat key-value storage port for cache persistence.
//!
//! The cache logic is written against [`KvStore`] so TTL, eviction, and
//! stats are unit-testable against [`MemoryStore`], with [`FileStore`]
//! as the on-disk adapter.

pub mod file;
pub mod memory;

use std::sync::Arc;

use crate::error::Result;

pub use file::FileStore;
pub use memory::MemoryStore;

/// Minimal flat key-value space with prefix enumeration.
///
/// Values are opaque strings (the cache stores JSON text). Implementations
/// handle their own interior locking; all methods take `&self`.
pub trait KvStore: Send + Sync {
    /// Read the value stored under `key`, or `None` if absent.
    fn read(&self, key: &str) -> Result<Option<String>>;

    /// Write `value` under `key`, replacing any prior value.
    fn write(&self, key: &str, value: &str) -> Result<()>;

    /// Delete the value under `key`. Deleting an absent key is not an error.
    fn delete(&self, key: &str) -> Result<()>;

    /// List every stored key beginning with `prefix`, in no particular order.
    fn keys(&self, prefix: &str) -> Result<Vec<String>>;
}

impl<T: KvStore + ?Sized> KvStore for Arc<T> {
    fn read(&self, key: &str) -> Result<Option<String>> {
        (**self).read(key)
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        (**self).write(key, value)
    }

    fn delete(&self, key: &str) -> Result<()> {
        (**self).delete(key)
    }

    fn keys(&self, prefix: &str) -> Result<Vec<String>> {
        (**self).keys(prefix)
    }
}
