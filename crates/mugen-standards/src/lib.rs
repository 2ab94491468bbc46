#![deny(unsafe_code)]

//! Schema catalog and bundled resources.
//!
//! The catalog is read from three XML documents under `<resources>/schema/`.
//! The same resource root holds the built-in common state templates used
//! when a character does not ship its own `common1.cns`.

mod catalog;
pub mod error;
mod loader;
pub mod paths;
pub mod signature;

pub use crate::catalog::SchemaCatalog;
pub use crate::error::{Result, StandardsError};
pub use crate::paths::{CommonTemplate, RESOURCES_ENV_VAR, ResourcePaths};
pub use crate::signature::parse_signature;
