//! Error types for SFF header operations.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when reading an SFF header.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SffError {
    /// Fewer bytes than the header layout requires.
    #[error("SFF header truncated: expected at least {expected} bytes, got {actual}")]
    TruncatedHeader { expected: usize, actual: usize },

    /// The 12-byte signature is not `ElecbyteSpr\0`.
    #[error("SFF file has a malformed header signature")]
    MalformedHeader,

    /// Version tag does not match the layout being parsed.
    #[error("invalid SFF version {version} for {expected} header")]
    InvalidVersion {
        version: String,
        expected: &'static str,
    },

    /// Failed to read the file.
    #[error("failed to read {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for SFF operations.
pub type Result<T> = std::result::Result<T, SffError>;
