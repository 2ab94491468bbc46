//! MUGEN SFF sprite container headers.
//!
//! Only the fixed-size header is handled here; sprite and palette data are
//! never decoded. Version `1.010` files use the 32-byte v1 layout, anything
//! else the 68-byte v2 layout.
//!
//! ```
//! use mugen_sff::{SffHeader, SffV2Header, parse_header};
//!
//! let bytes = SffV2Header::fresh().to_bytes();
//! let header = parse_header(&bytes).unwrap();
//! assert!(matches!(header, SffHeader::V2(_)));
//! assert_eq!(header.version().to_string(), "2.100");
//! ```

mod error;
pub mod header;
mod reader;

pub use error::{Result, SffError};
pub use header::{
    SIGNATURE, SffHeader, SffV1Header, SffV2Header, SffVersion, V1_HEADER_LEN, V2_HEADER_LEN,
    parse_header, parse_v1, parse_v2,
};
pub use reader::{SpriteFile, read_sff_header};
