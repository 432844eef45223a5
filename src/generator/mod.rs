//! Letter-generation seam and its caching decorator.

pub mod cached;

use async_trait::async_trait;

use crate::error::Result;
use crate::request::LeaveRequest;

pub use cached::CachedGenerator;

/// A provider that turns a leave request into a finished letter body.
///
/// Implementations wrap a generative-model API (prompt construction and
/// transport live with the implementor). Errors surface as
/// [`LeavegenError::Generation`](crate::error::LeavegenError::Generation)
/// or the provider's own variants.
#[async_trait]
pub trait LetterGenerator: Send + Sync {
    /// Generate the plain-text letter body for `request`.
    async fn generate(&self, request: &LeaveRequest) -> Result<String>;
}

#[async_trait]
impl<T: LetterGenerator + ?Sized> LetterGenerator for std::sync::Arc<T> {
    async fn generate(&self, request: &LeaveRequest) -> Result<String> {
        (**self).generate(request).await
    }
}
