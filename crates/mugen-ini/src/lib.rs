//! Tolerant INI-style parsing for MUGEN definition files.
//!
//! The parser keeps sections and pairs in source order, lowercases names
//! and keys, strips `;` comments, and retains duplicates. The only hard
//! failure is an unclosed `[` header.
//!
//! # Example
//!
//! ```
//! use mugen_ini::{decode_quoted, parse_str};
//!
//! let doc = parse_str("[Info]\nname = \"Kung Fu Man\" ; display\n").unwrap();
//! let name = decode_quoted(doc.named_property("info", "name").unwrap()).unwrap();
//! assert_eq!(name, "Kung Fu Man");
//! ```

mod document;
mod encoding;
mod error;
mod file;
mod parser;
mod quoted;

pub use document::{Document, KeyValue, Section};
pub use encoding::DetectedEncoding;
pub use error::{IniError, Result};
pub use file::{RawText, SourceFile};
pub use parser::{parse_named, parse_str};
pub use quoted::decode_quoted;
