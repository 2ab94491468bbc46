//! MUGEN character projects.
//!
//! A project is rooted at a `.def` manifest. [`Project::resolve`] reads the
//! manifest, resolves the files it names relative to the manifest folder,
//! picks the common state file, and validates every state file against a
//! [`mugen_standards::SchemaCatalog`].

mod common;
mod error;
mod manifest;
mod project;

pub use common::{CommonSource, DEFAULT_COMMON_FILE};
pub use error::{ProjectError, Result};
pub use manifest::{LocalCoord, ManifestInfo};
pub use project::{
    AssetPaths, COMMON_KEY, Project, StatedefLocation, UNINDEXED_STATE_KEY, state_file_keys,
};
