//! Schema-driven validation of MUGEN state files.
//!
//! Each state file of a project is checked section by section against the
//! [`mugen_standards::SchemaCatalog`]. Findings are collected as
//! [`mugen_model::Diagnostic`]s; nothing here fails hard.

mod section;
mod statedef_map;
mod validator;

pub use section::{SectionKind, StateHeader, StateNumber, StatedefHeader};
pub use statedef_map::{StatedefIndex, StatedefMap};
pub use validator::{StateFileContext, StateValidator};
