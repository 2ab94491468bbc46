//! SFF header parsing and building.
//!
//! Both container versions share the first 16 bytes:
//!
//! | Offset | Length | Field     | Description                        |
//! |--------|--------|-----------|------------------------------------|
//! | 0-11   | 12     | signature | `ElecbyteSpr\0`                    |
//! | 12-15  | 4      | version   | read high byte first: `1.010` etc. |
//!
//! The version tag selects the rest of the layout; see [`v1`] and [`v2`].

pub mod v1;
pub mod v2;

use std::fmt;

use serde::Serialize;

use crate::error::{Result, SffError};

pub use v1::{SffV1Header, V1_HEADER_LEN, parse_v1};
pub use v2::{SffV2Header, V2_HEADER_LEN, parse_v2};

/// Fixed signature at the start of every SFF file.
pub const SIGNATURE: &[u8; 12] = b"ElecbyteSpr\0";

/// Byte offset of the version tag.
pub const VERSION_OFFSET: usize = 12;

/// Four version bytes as stored on disk (`[lo3, lo2, lo1, hi]`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SffVersion([u8; 4]);

impl SffVersion {
    /// Version tag of SFF v1 files.
    pub const V1: Self = Self([0, 1, 0, 1]);
    /// Version tag written for a fresh v2 file (2.1.0.0).
    pub const V2: Self = Self([0, 0, 1, 2]);

    pub const fn from_bytes(bytes: [u8; 4]) -> Self {
        Self(bytes)
    }

    pub const fn to_bytes(self) -> [u8; 4] {
        self.0
    }

    /// Reads the tag at [`VERSION_OFFSET`], if enough bytes are present.
    pub fn read(data: &[u8]) -> Option<Self> {
        let bytes = data.get(VERSION_OFFSET..VERSION_OFFSET + 4)?;
        Some(Self([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    /// True when this is the v1 tag `1.010`.
    pub fn is_v1(self) -> bool {
        self == Self::V1
    }
}

impl fmt::Display for SffVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [b12, b13, b14, b15] = self.0;
        write!(f, "{b15}.{b14}{b13}{b12}")
    }
}

impl Serialize for SffVersion {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A parsed header of either version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "format", rename_all = "lowercase")]
pub enum SffHeader {
    V1(SffV1Header),
    V2(SffV2Header),
}

impl SffHeader {
    pub fn version(&self) -> SffVersion {
        match self {
            Self::V1(h) => h.version,
            Self::V2(h) => h.version,
        }
    }

    pub fn sprite_count(&self) -> u32 {
        match self {
            Self::V1(h) => h.sprite_count,
            Self::V2(h) => h.sprite_count,
        }
    }

    /// Whether `index` addresses a sprite in this container.
    pub fn contains_sprite(&self, index: u32) -> bool {
        index < self.sprite_count()
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        match self {
            Self::V1(h) => h.to_bytes().to_vec(),
            Self::V2(h) => h.to_bytes().to_vec(),
        }
    }
}

/// Parses a header, choosing the layout from the version tag.
///
/// `1.010` selects v1; every other tag selects v2.
pub fn parse_header(data: &[u8]) -> Result<SffHeader> {
    let is_v1 = SffVersion::read(data).is_some_and(SffVersion::is_v1);
    if is_v1 {
        parse_v1(data).map(SffHeader::V1)
    } else {
        parse_v2(data).map(SffHeader::V2)
    }
}

/// Length, then signature, then version.
pub(crate) fn check_prefix(data: &[u8], min_len: usize) -> Result<SffVersion> {
    if data.len() < min_len {
        return Err(SffError::TruncatedHeader {
            expected: min_len,
            actual: data.len(),
        });
    }
    if !data.starts_with(SIGNATURE) {
        return Err(SffError::MalformedHeader);
    }
    SffVersion::read(data).ok_or(SffError::TruncatedHeader {
        expected: min_len,
        actual: data.len(),
    })
}

pub(crate) fn read_u32(data: &[u8], offset: usize) -> u32 {
    let mut buf = [0u8; 4];
    buf.copy_from_slice(&data[offset..offset + 4]);
    u32::from_le_bytes(buf)
}

pub(crate) fn write_u32(out: &mut [u8], offset: usize, value: u32) {
    out[offset..offset + 4].copy_from_slice(&value.to_le_bytes());
}

/// Writes the shared signature and version prefix.
pub(crate) fn write_prefix(out: &mut [u8], version: SffVersion) {
    out[..SIGNATURE.len()].copy_from_slice(SIGNATURE);
    out[VERSION_OFFSET..VERSION_OFFSET + 4].copy_from_slice(&version.to_bytes());
}
