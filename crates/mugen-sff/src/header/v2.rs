//! SFF v2 header.
//!
//! | Offset | Length | Field               |
//! |--------|--------|---------------------|
//! | 36-39  | 4      | first sprite node   |
//! | 40-43  | 4      | sprite count        |
//! | 44-47  | 4      | first palette node  |
//! | 48-51  | 4      | palette count       |
//! | 52-55  | 4      | ldata offset        |
//! | 56-59  | 4      | ldata length        |
//! | 60-63  | 4      | tdata offset        |
//! | 64-67  | 4      | tdata length        |
//!
//! Bytes 16-35 are reserved and left zero by [`SffV2Header::to_bytes`].

use serde::Serialize;

use super::{SffVersion, check_prefix, read_u32, write_prefix, write_u32};
use crate::error::{Result, SffError};

/// Bytes needed to parse a v2 header.
pub const V2_HEADER_LEN: usize = 68;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SffV2Header {
    pub version: SffVersion,
    pub first_sprite_offset: u32,
    pub sprite_count: u32,
    pub first_palette_offset: u32,
    pub palette_count: u32,
    pub ldata_offset: u32,
    pub ldata_length: u32,
    pub tdata_offset: u32,
    pub tdata_length: u32,
}

impl SffV2Header {
    /// Header of an empty container: version 2.1.0.0, every field zero.
    pub fn fresh() -> Self {
        Self {
            version: SffVersion::V2,
            first_sprite_offset: 0,
            sprite_count: 0,
            first_palette_offset: 0,
            palette_count: 0,
            ldata_offset: 0,
            ldata_length: 0,
            tdata_offset: 0,
            tdata_length: 0,
        }
    }

    #[must_use]
    pub fn to_bytes(&self) -> [u8; V2_HEADER_LEN] {
        let mut out = [0u8; V2_HEADER_LEN];
        write_prefix(&mut out, self.version);
        write_u32(&mut out, 36, self.first_sprite_offset);
        write_u32(&mut out, 40, self.sprite_count);
        write_u32(&mut out, 44, self.first_palette_offset);
        write_u32(&mut out, 48, self.palette_count);
        write_u32(&mut out, 52, self.ldata_offset);
        write_u32(&mut out, 56, self.ldata_length);
        write_u32(&mut out, 60, self.tdata_offset);
        write_u32(&mut out, 64, self.tdata_length);
        out
    }
}

impl Default for SffV2Header {
    fn default() -> Self {
        Self::fresh()
    }
}

/// Parses a v2 header; any version tag other than `1.010` is accepted.
pub fn parse_v2(data: &[u8]) -> Result<SffV2Header> {
    let version = check_prefix(data, V2_HEADER_LEN)?;
    if version.is_v1() {
        return Err(SffError::InvalidVersion {
            version: version.to_string(),
            expected: "v2",
        });
    }
    Ok(SffV2Header {
        version,
        first_sprite_offset: read_u32(data, 36),
        sprite_count: read_u32(data, 40),
        first_palette_offset: read_u32(data, 44),
        palette_count: read_u32(data, 48),
        ldata_offset: read_u32(data, 52),
        ldata_length: read_u32(data, 56),
        tdata_offset: read_u32(data, 60),
        tdata_length: read_u32(data, 64),
    })
}
