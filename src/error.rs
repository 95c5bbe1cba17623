//! Error types for the cache
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the cache.
///
/// A missing key is never an error: [`Store::get`](crate::Store::get) reports
/// it through its boolean result and [`Store::del`](crate::Store::del) is a
/// silent no-op.
#[derive(Error, Debug)]
pub enum CacheError {
    /// The value passed to a write operation failed to serialize
    #[error("value encoding failed: {0}")]
    Encoding(String),

    /// The stored bytes failed to deserialize into the destination type
    #[error("value decoding failed: {0}")]
    Decoding(String),
}

// == Result Type Alias ==
/// Convenience Result type for the cache.
pub type Result<T> = std::result::Result<T, CacheError>;
