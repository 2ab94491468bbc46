//! On-disk INI files.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::document::Document;
use crate::encoding::DetectedEncoding;
use crate::error::{IniError, Result};
use crate::parser::parse_named;

/// Decoded file contents together with the encoding they were read in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawText {
    pub text: String,
    pub encoding: DetectedEncoding,
}

/// Handle to an INI-style file belonging to a project.
///
/// The handle does not require the file to exist; reading a missing file
/// fails with [`IniError::FileNotFound`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    key: String,
    path: PathBuf,
}

impl SourceFile {
    /// `key` identifies the file inside its project, e.g. `st0` or `cns`.
    pub fn new(key: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            key: key.into(),
            path: path.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Reads and decodes the file, keeping the detected encoding.
    pub fn read_raw(&self) -> Result<RawText> {
        let bytes = fs::read(&self.path).map_err(|e| IniError::read(&self.path, e))?;
        let (text, encoding) = DetectedEncoding::decode(&bytes);
        Ok(RawText {
            text: text.into_owned(),
            encoding,
        })
    }

    pub fn read_text(&self) -> Result<String> {
        self.read_raw().map(|raw| raw.text)
    }

    /// Writes `raw` back using its recorded encoding.
    pub fn write_raw(&self, raw: &RawText) -> Result<()> {
        fs::write(&self.path, raw.encoding.encode(&raw.text)).map_err(|source| {
            IniError::FileWrite {
                path: self.path.clone(),
                source,
            }
        })
    }

    /// Writes `text` as UTF-8.
    pub fn write_text(&self, text: &str) -> Result<()> {
        self.write_raw(&RawText {
            text: text.to_string(),
            encoding: DetectedEncoding::utf8(),
        })
    }

    /// Reads and parses the file. Every call re-reads from disk.
    pub fn parse(&self) -> Result<Document> {
        let raw = self.read_raw()?;
        let origin = self.path.display().to_string();
        let doc = parse_named(&raw.text, &origin)?;
        debug!(
            key = %self.key,
            path = %origin,
            encoding = raw.encoding.name(),
            sections = doc.len(),
            "parsed file"
        );
        Ok(doc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_not_found() {
        let dir = tempfile::tempdir().expect("tempdir");
        let file = SourceFile::new("cmd", dir.path().join("blank.cmd"));
        assert!(!file.exists());
        assert!(matches!(file.parse(), Err(IniError::FileNotFound { .. })));
    }

    #[test]
    fn write_then_parse() {
        let dir = tempfile::tempdir().expect("tempdir");
        let file = SourceFile::new("st", dir.path().join("kfm.cns"));
        file.write_text("[Statedef 0]\ntype = S\n").expect("write");
        let doc = file.parse().expect("parse");
        assert_eq!(doc.named_property("statedef 0", "type"), Some("S"));
    }

    #[test]
    fn raw_write_keeps_shift_jis() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("jp.cns");
        let bytes = b"[Info]\nname = \"\x83\x4A\x83\x93\"\n";
        fs::write(&path, bytes).expect("seed");
        let file = SourceFile::new("cns", &path);
        let raw = file.read_raw().expect("read");
        assert_eq!(raw.encoding.name(), "Shift_JIS");
        assert!(raw.text.contains("カン"));
        file.write_raw(&raw).expect("write");
        assert_eq!(fs::read(&path).expect("reread"), bytes.to_vec());
    }
}
