//! Error types for project resolution.

use std::path::PathBuf;

use mugen_ini::IniError;
use mugen_sff::SffError;
use thiserror::Error;

/// Errors that abort resolving or validating a project.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProjectError {
    /// The character manifest does not exist.
    #[error("character definition not found: {path}")]
    FileNotFound { path: PathBuf },

    /// `localcoord` is not two comma-separated integers.
    #[error("invalid localcoord {value:?} in {path}")]
    InvalidLocalCoord { path: PathBuf, value: String },

    /// The manifest does not declare a sprite file.
    #[error("no sprite file declared in {path}")]
    NoSpriteFile { path: PathBuf },

    /// Parse or I/O failure in the manifest or a state file.
    #[error(transparent)]
    Ini(#[from] IniError),

    /// The sprite file header could not be read.
    #[error(transparent)]
    Sff(#[from] SffError),
}

/// Result type for project operations.
pub type Result<T> = std::result::Result<T, ProjectError>;
