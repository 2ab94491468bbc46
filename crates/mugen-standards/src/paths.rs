//! Resource directory path resolution.

use std::path::{Path, PathBuf};

/// Environment variable for overriding the resource directory.
pub const RESOURCES_ENV_VAR: &str = "MUGEN_RESOURCES_DIR";

/// Schema document file names under `schema/`.
pub const STATEDEF_SCHEMA_FILE: &str = "statedef.xml";
pub const STATE_SCHEMA_FILE: &str = "state.xml";
pub const CONTROLLER_SCHEMA_FILE: &str = "controller.xml";

/// Built-in common state file, chosen by the manifest's `mugenversion`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommonTemplate {
    V1_0,
    V1_1,
    /// Windows MUGEN (and any unrecognised version)
    Win,
}

impl CommonTemplate {
    pub fn for_version(version: &str) -> Self {
        match version.trim() {
            "1.0" => Self::V1_0,
            "1.1" => Self::V1_1,
            _ => Self::Win,
        }
    }

    pub fn file_name(self) -> &'static str {
        match self {
            Self::V1_0 => "common1-1.0.cns",
            Self::V1_1 => "common1-1.1.cns",
            Self::Win => "common1-win.cns",
        }
    }
}

/// Location of the bundled schema documents and common-state templates.
///
/// Resolution order:
/// 1. an explicit directory supplied by the caller
/// 2. `MUGEN_RESOURCES_DIR` environment variable
/// 3. `resources/` directory relative to workspace root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourcePaths {
    root: PathBuf,
}

impl ResourcePaths {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn locate(explicit: Option<&Path>) -> Self {
        if let Some(dir) = explicit {
            return Self::new(dir);
        }
        if let Ok(root) = std::env::var(RESOURCES_ENV_VAR) {
            return Self::new(root);
        }
        Self::new(PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../resources"))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn schema_dir(&self) -> PathBuf {
        self.root.join("schema")
    }

    pub fn common_dir(&self) -> PathBuf {
        self.root.join("common")
    }

    /// Template substituted for a missing default common state file.
    pub fn common_template(&self, version: &str) -> PathBuf {
        self.common_dir()
            .join(CommonTemplate::for_version(version).file_name())
    }
}

impl Default for ResourcePaths {
    fn default() -> Self {
        Self::locate(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_by_version() {
        assert_eq!(CommonTemplate::for_version("1.0"), CommonTemplate::V1_0);
        assert_eq!(CommonTemplate::for_version(" 1.1 "), CommonTemplate::V1_1);
        assert_eq!(CommonTemplate::for_version("win"), CommonTemplate::Win);
        assert_eq!(CommonTemplate::for_version("2002.04.14"), CommonTemplate::Win);
    }

    #[test]
    fn explicit_root_wins() {
        let paths = ResourcePaths::locate(Some(Path::new("/opt/mugen-res")));
        assert_eq!(paths.schema_dir(), Path::new("/opt/mugen-res/schema"));
        assert_eq!(
            paths.common_template("1.1"),
            Path::new("/opt/mugen-res/common/common1-1.1.cns")
        );
    }
}
