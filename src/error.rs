//! Crate-wide error type.
//!
//! Storage and corruption errors never escape the cache; they are logged
//! and degraded to a miss/no-op there. Only the generator seam surfaces
//! errors to callers.

use thiserror::Error;

/// Errors produced by leavegen components.
#[derive(Debug, Error)]
pub enum LeavegenError {
    /// The backing key-value store could not be read or written.
    #[error("storage unavailable: {0}")]
    Storage(#[from] std::io::Error),

    /// A persisted record failed to deserialize.
    #[error("corrupt stored record: {0}")]
    Corrupt(#[from] serde_json::Error),

    /// The letter provider failed to produce a response.
    #[error("letter generation failed: {0}")]
    Generation(String),
}

/// Convenience result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, LeavegenError>;
