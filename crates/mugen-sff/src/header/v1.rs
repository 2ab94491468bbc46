//! SFF v1 header.
//!
//! | Offset | Length | Field            |
//! |--------|--------|------------------|
//! | 16-19  | 4      | group count      |
//! | 20-23  | 4      | sprite count     |
//! | 24-27  | 4      | first subfile    |
//! | 28-31  | 4      | subheader length |

use serde::Serialize;

use super::{SffVersion, check_prefix, read_u32, write_prefix, write_u32};
use crate::error::{Result, SffError};

/// Bytes needed to parse a v1 header.
pub const V1_HEADER_LEN: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SffV1Header {
    pub version: SffVersion,
    pub group_count: u32,
    pub sprite_count: u32,
    /// Byte offset of the first subfile.
    pub subfile_offset: u32,
    pub subheader_length: u32,
}

impl SffV1Header {
    #[must_use]
    pub fn to_bytes(&self) -> [u8; V1_HEADER_LEN] {
        let mut out = [0u8; V1_HEADER_LEN];
        write_prefix(&mut out, self.version);
        write_u32(&mut out, 16, self.group_count);
        write_u32(&mut out, 20, self.sprite_count);
        write_u32(&mut out, 24, self.subfile_offset);
        write_u32(&mut out, 28, self.subheader_length);
        out
    }
}

/// Parses a v1 header; the version tag must be `1.010`.
pub fn parse_v1(data: &[u8]) -> Result<SffV1Header> {
    let version = check_prefix(data, V1_HEADER_LEN)?;
    if !version.is_v1() {
        return Err(SffError::InvalidVersion {
            version: version.to_string(),
            expected: "v1",
        });
    }
    Ok(SffV1Header {
        version,
        group_count: read_u32(data, 16),
        sprite_count: read_u32(data, 20),
        subfile_offset: read_u32(data, 24),
        subheader_length: read_u32(data, 28),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_v2_tag() {
        let mut data = [0u8; V1_HEADER_LEN];
        write_prefix(&mut data, SffVersion::V2);
        let err = parse_v1(&data).unwrap_err();
        assert!(matches!(err, SffError::InvalidVersion { ref version, .. } if version == "2.100"));
    }

    #[test]
    fn length_is_checked_before_signature() {
        let err = parse_v1(b"garbage").unwrap_err();
        assert!(matches!(
            err,
            SffError::TruncatedHeader {
                expected: 32,
                actual: 7
            }
        ));
    }
}
