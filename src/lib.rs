//! leavegen: Vietnamese leave-request letter generation with a persistent
//! result cache.
//!
//! A UI collects a structured [`LeaveRequest`] form and a
//! [`LetterGenerator`] (backed by a generative-model API) writes the
//! letter. This crate's core is the [`ResultCache`]: it maps an equivalent
//! request seen within the last 24 hours back to its generated letter, so
//! the provider is never called twice for the same form.
//!
//! - Keys are content-addressed: a deterministic fingerprint over the
//!   request fields, stable across restarts ([`cache::fingerprint`]).
//! - Entries carry a TTL and expire lazily at lookup time.
//! - The store is bounded; overflow evicts the oldest entries in a batch.
//! - Hit/miss counters persist alongside the entries.
//! - The cache is advisory: storage faults degrade to a miss, never to a
//!   failed request.
//!
//! Persistence goes through the [`KvStore`] port: [`FileStore`] on disk
//! for the application, [`MemoryStore`] for tests.
//!
//! ```no_run
//! use leavegen::{CachedGenerator, FileStore, LeaveRequest, ResultCache};
//! # use leavegen::{LetterGenerator, Result};
//! # struct GeminiProvider;
//! # #[async_trait::async_trait]
//! # impl LetterGenerator for GeminiProvider {
//! #     async fn generate(&self, _: &LeaveRequest) -> Result<String> {
//! #         Ok(String::new())
//! #     }
//! # }
//! # async fn demo(form: LeaveRequest) -> Result<()> {
//! let cache = ResultCache::new(FileStore::new());
//! let generator = CachedGenerator::new(GeminiProvider, cache);
//! let letter = generator.generate(&form).await?;
//! # Ok(())
//! # }
//! ```

pub mod cache;
pub mod config;
pub mod error;
pub mod generator;
pub mod request;
pub mod storage;

pub use cache::{fingerprint, CacheInfo, CacheStats, EntryInfo, ResultCache};
pub use config::CacheConfig;
pub use error::{LeavegenError, Result};
pub use generator::{CachedGenerator, LetterGenerator};
pub use request::{LeaveRequest, LeaveType, Tone, WordLimit};
pub use storage::{FileStore, KvStore, MemoryStore};
