//! Opening sprite containers on disk.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{Result, SffError};
use crate::header::{SffHeader, SffV2Header, V2_HEADER_LEN, parse_header};

/// Reads and parses the header of the SFF file at `path`.
///
/// At most [`V2_HEADER_LEN`] bytes are read. A file that does not exist is
/// reported as a fresh v2 container.
pub fn read_sff_header(path: &Path) -> Result<SffHeader> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "sprite file absent, using fresh v2 header");
            return Ok(SffHeader::V2(SffV2Header::fresh()));
        }
        Err(source) => {
            return Err(SffError::FileRead {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    let mut data = Vec::with_capacity(V2_HEADER_LEN);
    file.take(V2_HEADER_LEN as u64)
        .read_to_end(&mut data)
        .map_err(|source| SffError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;

    let header = parse_header(&data)?;
    debug!(
        path = %path.display(),
        version = %header.version(),
        sprites = header.sprite_count(),
        "read sprite header"
    );
    Ok(header)
}

/// A sprite container referenced by a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpriteFile {
    key: String,
    path: PathBuf,
    header: SffHeader,
}

impl SpriteFile {
    /// Opens the container, reading only its header.
    pub fn open(key: impl Into<String>, path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let header = read_sff_header(&path)?;
        Ok(Self {
            key: key.into(),
            path,
            header,
        })
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn header(&self) -> &SffHeader {
        &self.header
    }
}
