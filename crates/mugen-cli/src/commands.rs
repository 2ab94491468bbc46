use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use mugen_model::{Diagnostic, Severity, ValidController};
use mugen_project::Project;
use mugen_sff::SpriteFile;
use mugen_standards::{ResourcePaths, SchemaCatalog};
use tracing::{debug, info, info_span};

/// Result of `mugen check`.
#[derive(Debug)]
pub struct CheckResult {
    pub project: Project,
    /// Lowest severity shown.
    pub min_severity: Severity,
}

impl CheckResult {
    /// Diagnostics at or above the threshold, in report order.
    pub fn shown(&self) -> Vec<&Diagnostic> {
        self.project
            .diagnostics()
            .at_least(self.min_severity)
            .collect()
    }

    /// Errors count toward the exit status even when filtered from the output.
    pub fn has_errors(&self) -> bool {
        self.project.diagnostics().has_errors()
    }
}

/// Output of `mugen schema`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaListing {
    /// Controller names with their parameter counts.
    Controllers(Vec<(String, usize)>),
    Controller(ValidController),
}

pub fn load_catalog(resources: &ResourcePaths) -> Result<SchemaCatalog> {
    let schema_dir = resources.schema_dir();
    SchemaCatalog::load(&schema_dir)
        .with_context(|| format!("load schema from {}", schema_dir.display()))
}

pub fn run_check(
    manifest: &Path,
    resources: &ResourcePaths,
    min_severity: Severity,
) -> Result<CheckResult> {
    let span = info_span!("check", manifest = %manifest.display());
    let _guard = span.enter();
    let start = Instant::now();

    let catalog = load_catalog(resources)?;
    let project = Project::resolve(manifest, &catalog, resources)
        .with_context(|| format!("resolve {}", manifest.display()))?;

    info!(
        name = project.name(),
        diagnostics = project.diagnostics().len(),
        elapsed = ?start.elapsed(),
        "check complete"
    );
    Ok(CheckResult {
        project,
        min_severity,
    })
}

/// Reads a sprite container header.
///
/// A missing file reads as an empty v2 container, the same as a declared
/// but absent sprite file of a character.
pub fn run_sff(path: &Path) -> Result<SpriteFile> {
    let sprite = SpriteFile::open("sprite", path)
        .with_context(|| format!("read sprite header of {}", path.display()))?;
    debug!(version = %sprite.header().version(), "read sprite header");
    Ok(sprite)
}

pub fn run_schema(resources: &ResourcePaths, controller: Option<&str>) -> Result<SchemaListing> {
    let catalog = load_catalog(resources)?;
    match controller {
        Some(name) => catalog
            .controller(name)
            .cloned()
            .map(SchemaListing::Controller)
            .with_context(|| format!("unknown controller type: {name}")),
        None => {
            let mut controllers: Vec<(String, usize)> = catalog
                .controllers()
                .map(|c| (c.name.clone(), c.properties.len()))
                .collect();
            controllers.sort_by_key(|(name, _)| name.to_lowercase());
            Ok(SchemaListing::Controllers(controllers))
        }
    }
}
