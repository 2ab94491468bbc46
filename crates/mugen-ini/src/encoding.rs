//! Text encoding detection for character files.
//!
//! Files are sniffed for a byte-order mark first. Without one, the bytes
//! are taken as UTF-8 when they validate and as Shift_JIS otherwise, since
//! a large share of character files were authored on Japanese systems.

use std::borrow::Cow;

use encoding_rs::{Encoding, SHIFT_JIS, UTF_8, UTF_16BE, UTF_16LE};

/// Encoding a file was decoded with, remembered for writing it back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetectedEncoding {
    encoding: &'static Encoding,
    bom: bool,
}

impl Default for DetectedEncoding {
    fn default() -> Self {
        Self::utf8()
    }
}

impl DetectedEncoding {
    /// UTF-8 without a byte-order mark.
    pub fn utf8() -> Self {
        Self {
            encoding: UTF_8,
            bom: false,
        }
    }

    pub fn encoding(&self) -> &'static Encoding {
        self.encoding
    }

    /// WHATWG label of the encoding, e.g. `Shift_JIS`.
    pub fn name(&self) -> &'static str {
        self.encoding.name()
    }

    pub fn has_bom(&self) -> bool {
        self.bom
    }

    /// Sniffs `bytes` and decodes them.
    pub fn decode(bytes: &[u8]) -> (Cow<'_, str>, Self) {
        if let Some((encoding, bom_len)) = Encoding::for_bom(bytes) {
            let (text, _) = encoding.decode_without_bom_handling(&bytes[bom_len..]);
            return (text, Self { encoding, bom: true });
        }
        if let Ok(text) = std::str::from_utf8(bytes) {
            return (Cow::Borrowed(text), Self::utf8());
        }
        let (text, _) = SHIFT_JIS.decode_without_bom_handling(bytes);
        (
            text,
            Self {
                encoding: SHIFT_JIS,
                bom: false,
            },
        )
    }

    /// Encodes `text` back into this encoding, restoring the BOM if the
    /// source carried one.
    pub fn encode(&self, text: &str) -> Vec<u8> {
        if self.encoding == UTF_16LE || self.encoding == UTF_16BE {
            return self.encode_utf16(text);
        }
        let mut out = Vec::with_capacity(text.len() + 3);
        if self.bom && self.encoding == UTF_8 {
            out.extend_from_slice(&[0xEF, 0xBB, 0xBF]);
        }
        let (bytes, _, _) = self.encoding.encode(text);
        out.extend_from_slice(&bytes);
        out
    }

    fn encode_utf16(&self, text: &str) -> Vec<u8> {
        let big_endian = self.encoding == UTF_16BE;
        let mut out = Vec::with_capacity(text.len() * 2 + 2);
        if self.bom {
            out.extend_from_slice(if big_endian { &[0xFE, 0xFF] } else { &[0xFF, 0xFE] });
        }
        for unit in text.encode_utf16() {
            let bytes = if big_endian {
                unit.to_be_bytes()
            } else {
                unit.to_le_bytes()
            };
            out.extend_from_slice(&bytes);
        }
        out
    }
}
