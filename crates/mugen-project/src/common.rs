//! Selection of the shared common state file.

use std::fmt;
use std::path::{Path, PathBuf};

use mugen_standards::{CommonTemplate, ResourcePaths};
use tracing::debug;

use crate::project::manifest_relative;

/// Value of `stcommon` that falls back to the engine copy, then a bundled template.
pub const DEFAULT_COMMON_FILE: &str = "common1.cns";

/// Where the engine keeps its own copy, relative to the character folder
/// (`<mugen>/chars/<name>/` next to `<mugen>/data/`).
const ENGINE_DATA_DIR: [&str; 3] = ["..", "..", "data"];

/// How the common state file was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommonSource {
    /// Non-default name, used as written relative to the manifest.
    Declared,
    /// The engine's `data/common1.cns` was found.
    EngineData,
    /// A bundled template picked by `mugenversion`.
    Template(CommonTemplate),
}

impl fmt::Display for CommonSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Declared => f.write_str("declared"),
            Self::EngineData => f.write_str("engine data"),
            Self::Template(template) => write!(f, "bundled {}", template.file_name()),
        }
    }
}

pub(crate) fn resolve_common(
    base_dir: &Path,
    declared: &str,
    version: &str,
    resources: &ResourcePaths,
) -> (PathBuf, CommonSource) {
    if !declared.eq_ignore_ascii_case(DEFAULT_COMMON_FILE) {
        return (manifest_relative(base_dir, declared), CommonSource::Declared);
    }

    let engine_copy: PathBuf = ENGINE_DATA_DIR
        .iter()
        .fold(base_dir.to_path_buf(), |path, part| path.join(part))
        .join(DEFAULT_COMMON_FILE);
    if engine_copy.is_file() {
        debug!(path = %engine_copy.display(), "using engine common file");
        return (engine_copy, CommonSource::EngineData);
    }

    let template = CommonTemplate::for_version(version);
    let path = resources.common_template(version);
    debug!(
        engine_copy = %engine_copy.display(),
        template = template.file_name(),
        "engine common file not found, using bundled template"
    );
    (path, CommonSource::Template(template))
}
