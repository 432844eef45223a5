//! Directory-backed key-value store.
//!
//! Each key is persisted as one file inside the store directory, so
//! `keys(prefix)` is a directory listing and a crash can only ever lose
//! the single entry being written. Defaults to `~/.leavegen/cache`.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::{LeavegenError, Result};
use crate::storage::KvStore;

/// On-disk [`KvStore`] adapter, one file per key.
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Create a store rooted at `~/.leavegen/cache`.
    ///
    /// Falls back to a relative `.leavegen/cache` if no home directory can
    /// be resolved. The directory is created lazily on first write.
    pub fn new() -> Self {
        let dir = dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".leavegen")
            .join("cache");
        Self { dir }
    }

    /// Create a store rooted at a custom directory (for testing).
    pub fn with_dir(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The directory backing this store.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf> {
        // Keys double as filenames, so anything that could escape the
        // store directory is rejected outright.
        let safe = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
            && key != "."
            && key != "..";
        if !safe {
            return Err(LeavegenError::Storage(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("key is not a valid store filename: {key:?}"),
            )));
        }
        Ok(self.dir.join(key))
    }
}

impl Default for FileStore {
    fn default() -> Self {
        Self::new()
    }
}

impl KvStore for FileStore {
    fn read(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.dir)?;
        fs::write(&path, value)?;
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<()> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn keys(&self, prefix: &str) -> Result<Vec<String>> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            // A store that was never written to has no keys.
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        let mut keys = Vec::new();
        for entry in entries {
            let entry = entry?;
            if let Some(name) = entry.file_name().to_str() {
                if name.starts_with(prefix) {
                    keys.push(name.to_string());
                }
            }
        }
        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn read_write_delete_round_trip() {
        let tmp = TempDir::new().unwrap();
        let store = FileStore::with_dir(tmp.path());
        assert_eq!(store.read("k1").unwrap(), None);
        store.write("k1", "giá trị").unwrap();
        assert_eq!(store.read("k1").unwrap(), Some("giá trị".into()));
        store.delete("k1").unwrap();
        assert_eq!(store.read("k1").unwrap(), None);
        store.delete("k1").unwrap();
    }

    #[test]
    fn keys_lists_only_matching_prefix() {
        let tmp = TempDir::new().unwrap();
        let store = FileStore::with_dir(tmp.path());
        store.write("leave_request_cache_abc", "1").unwrap();
        store.write("leave_request_cache_def", "2").unwrap();
        store.write("cache_stats", "3").unwrap();
        let mut keys = store.keys("leave_request_cache_").unwrap();
        keys.sort();
        assert_eq!(
            keys,
            vec![
                "leave_request_cache_abc".to_string(),
                "leave_request_cache_def".to_string(),
            ]
        );
    }

    #[test]
    fn keys_on_missing_directory_is_empty() {
        let tmp = TempDir::new().unwrap();
        let store = FileStore::with_dir(tmp.path().join("never-created"));
        assert!(store.keys("").unwrap().is_empty());
    }

    #[test]
    fn hostile_key_is_rejected() {
        let tmp = TempDir::new().unwrap();
        let store = FileStore::with_dir(tmp.path());
        assert!(store.write("../escape", "x").is_err());
        assert!(store.read("a/b").is_err());
        assert!(store.write("", "x").is_err());
    }
}
