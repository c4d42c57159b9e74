//! Error types for namespace and counter-file operations.

use thiserror::Error;

/// Errors returned by the namespace store and the mount host adapter.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FsError {
    /// Node arena could not reserve memory; fatal to mount.
    #[error("allocation failure: {0}")]
    AllocationFailure(String),

    /// A path component was absent during traversal.
    #[error("not found: {0}")]
    NotFound(String),

    /// An intermediate path component resolved to a counter file.
    #[error("not a directory: {0}")]
    NotADirectory(String),

    /// Bad offset, oversized payload, stale handle, or malformed path.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The rendered counter value exceeds the wire buffer bound.
    #[error("formatted value exceeds {limit}-byte buffer: {value}")]
    Truncated { value: i64, limit: usize },

    /// Configuration or logging setup failure.
    #[error("configuration error: {0}")]
    ConfigError(String),
}
