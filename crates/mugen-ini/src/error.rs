//! Error types for INI reading.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading or parsing INI-style text.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IniError {
    /// A `[` header was not closed with `]` on the same line.
    #[error("{origin}:{line}: malformed section header starting with '[{header}'")]
    MalformedHeader {
        origin: String,
        line: usize,
        header: String,
    },

    /// A value expected to hold a quoted literal had no closing quote.
    #[error("value {value:?} is not a well-formed quoted string")]
    MalformedLiteral { value: String },

    /// File not found.
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read a file.
    #[error("failed to read {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write a file.
    #[error("failed to write {path}: {source}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl IniError {
    pub(crate) fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::FileNotFound { path }
        } else {
            Self::FileRead { path, source }
        }
    }
}

/// Result type for INI operations.
pub type Result<T> = std::result::Result<T, IniError>;
