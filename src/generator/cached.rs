//! Caching decorator around a [`LetterGenerator`].

use async_trait::async_trait;

use crate::cache::ResultCache;
use crate::error::Result;
use crate::generator::LetterGenerator;
use crate::request::LeaveRequest;
use crate::storage::KvStore;

/// A [`LetterGenerator`] decorator that consults a [`ResultCache`] before
/// calling the inner provider and stores successful results afterwards.
///
/// Generation failures propagate uncached, so a transient provider error
/// never poisons the cache. When disabled, every call goes straight
/// through and the cache is neither read nor written.
pub struct CachedGenerator<G, S>
where
    G: LetterGenerator,
    S: KvStore,
{
    inner: G,
    cache: ResultCache<S>,
    enabled: bool,
}

impl<G, S> CachedGenerator<G, S>
where
    G: LetterGenerator,
    S: KvStore,
{
    /// Wrap `inner` with `cache`, caching enabled.
    pub fn new(inner: G, cache: ResultCache<S>) -> Self {
        Self::with_enabled(inner, cache, true)
    }

    /// Wrap `inner` with `cache`, honoring an explicit enabled flag
    /// (typically [`CacheConfig::enabled`](crate::config::CacheConfig)).
    pub fn with_enabled(inner: G, cache: ResultCache<S>, enabled: bool) -> Self {
        Self {
            inner,
            cache,
            enabled,
        }
    }

    /// The wrapped cache, for stats, diagnostics, and explicit clears.
    pub fn cache(&self) -> &ResultCache<S> {
        &self.cache
    }
}

#[async_trait]
impl<G, S> LetterGenerator for CachedGenerator<G, S>
where
    G: LetterGenerator,
    S: KvStore,
{
    async fn generate(&self, request: &LeaveRequest) -> Result<String> {
        if !self.enabled {
            return self.inner.generate(request).await;
        }
        if let Some(cached) = self.cache.get(request) {
            return Ok(cached);
        }
        let letter = self.inner.generate(request).await?;
        self.cache.set(request, &letter);
        Ok(letter)
    }
}
