//! The `[Info]` block of a character definition.

use std::fmt;
use std::path::Path;

use mugen_ini::{Document, decode_quoted};
use serde::Serialize;

use crate::error::{ProjectError, Result};

pub(crate) const INFO_SECTION: &str = "info";

const DEFAULT_NAME: &str = "New character";
const DEFAULT_DISPLAY_NAME: &str = "NewCharacter";
const DEFAULT_VERSION: &str = "win";
const DEFAULT_LOCAL_COORD: &str = "320,240";

/// Coordinate space the character was authored for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LocalCoord {
    pub width: i32,
    pub height: i32,
}

impl LocalCoord {
    /// Parses `width,height`. Surrounding whitespace and any components
    /// after the second are ignored.
    pub fn parse(value: &str) -> Option<Self> {
        let mut parts = value.split(',').map(str::trim);
        Some(Self {
            width: parts.next()?.parse().ok()?,
            height: parts.next()?.parse().ok()?,
        })
    }
}

impl Default for LocalCoord {
    fn default() -> Self {
        Self {
            width: 320,
            height: 240,
        }
    }
}

impl fmt::Display for LocalCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.width, self.height)
    }
}

/// Identity fields read from `[Info]`, with defaults for absent keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ManifestInfo {
    pub name: String,
    pub display_name: String,
    /// Declared `mugenversion`, verbatim.
    pub version: String,
    pub local_coord: LocalCoord,
}

impl ManifestInfo {
    /// Reads the info block.
    ///
    /// `name` and `displayname` are quoted literals when present; a value
    /// without its quotes is a [`mugen_ini::IniError::MalformedLiteral`].
    pub fn from_document(doc: &Document, path: &Path) -> Result<Self> {
        let name = quoted_or(doc, "name", DEFAULT_NAME)?;
        let display_name = quoted_or(doc, "displayname", DEFAULT_DISPLAY_NAME)?;
        let version = doc
            .value_or(INFO_SECTION, "mugenversion", DEFAULT_VERSION)
            .to_string();
        let raw_coord = doc.value_or(INFO_SECTION, "localcoord", DEFAULT_LOCAL_COORD);
        let local_coord =
            LocalCoord::parse(raw_coord).ok_or_else(|| ProjectError::InvalidLocalCoord {
                path: path.to_path_buf(),
                value: raw_coord.to_string(),
            })?;

        Ok(Self {
            name,
            display_name,
            version,
            local_coord,
        })
    }
}

fn quoted_or(doc: &Document, key: &str, fallback: &str) -> Result<String> {
    match doc.named_property(INFO_SECTION, key) {
        Some(raw) => Ok(decode_quoted(raw)?),
        None => Ok(fallback.to_string()),
    }
}
