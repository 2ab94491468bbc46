//! Character project: manifest, dependent files and validation results.

use std::collections::BTreeMap;
use std::iter;
use std::path::{Path, PathBuf};

use mugen_ini::{Document, IniError, SourceFile};
use mugen_model::{Diagnostic, DiagnosticReport, Severity};
use mugen_sff::SpriteFile;
use mugen_standards::{ResourcePaths, SchemaCatalog};
use mugen_validate::{StateFileContext, StateValidator, StatedefIndex, StatedefMap};
use serde::Serialize;
use tracing::{debug, info, info_span, trace};

use crate::common::{CommonSource, DEFAULT_COMMON_FILE, resolve_common};
use crate::error::{ProjectError, Result};
use crate::manifest::{LocalCoord, ManifestInfo};

const FILES_SECTION: &str = "files";
const MANIFEST_KEY: &str = "def";
const SPRITE_KEY: &str = "sprite";

/// Project key of the shared common state file.
pub const COMMON_KEY: &str = "stcommon";
/// Key of the unindexed state file, validated before `st0`..`st9`.
pub const UNINDEXED_STATE_KEY: &str = "st";
const INDEXED_STATE_FILES: u8 = 10;

const DEFAULT_CMD: &str = "blank.cmd";
const DEFAULT_CNS: &str = "blank.cns";

/// State file keys in validation order: `st`, then `st0` to `st9`.
pub fn state_file_keys() -> impl Iterator<Item = String> {
    iter::once(UNINDEXED_STATE_KEY.to_string())
        .chain((0..INDEXED_STATE_FILES).map(|i| format!("{UNINDEXED_STATE_KEY}{i}")))
}

/// Optional resource files declared under `[Files]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AssetPaths {
    pub sprite: Option<PathBuf>,
    pub anim: Option<PathBuf>,
    pub sound: Option<PathBuf>,
    pub ai: Option<PathBuf>,
}

/// Where a statedef is declared, for jump-to-definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatedefLocation {
    pub file_key: String,
    pub path: PathBuf,
    /// Ordinal of the `[Statedef N]` section within its file.
    pub position: usize,
}

/// A resolved character definition.
///
/// Every dependent path is the manifest's directory joined with the
/// declared relative path. Files are not required to exist; reading a
/// missing one fails when attempted.
#[derive(Debug, Clone)]
pub struct Project {
    manifest: SourceFile,
    info: ManifestInfo,
    cmd: SourceFile,
    cns: SourceFile,
    common: SourceFile,
    common_source: CommonSource,
    state_files: Vec<SourceFile>,
    assets: AssetPaths,
    statedefs: StatedefMap,
    locators: BTreeMap<String, StatedefIndex>,
    diagnostics: DiagnosticReport,
}

impl Project {
    /// Resolves the manifest at `manifest_path` and validates its state files.
    pub fn resolve(
        manifest_path: &Path,
        catalog: &SchemaCatalog,
        resources: &ResourcePaths,
    ) -> Result<Self> {
        let mut project = Self::load(manifest_path, resources)?;
        project.validate(catalog)?;
        Ok(project)
    }

    /// Resolves the manifest without validating.
    pub fn load(manifest_path: &Path, resources: &ResourcePaths) -> Result<Self> {
        let span = info_span!("resolve_project", manifest = %manifest_path.display());
        let _guard = span.enter();

        let manifest = SourceFile::new(MANIFEST_KEY, manifest_path);
        let doc = manifest.parse().map_err(|err| match err {
            IniError::FileNotFound { path } => ProjectError::FileNotFound { path },
            other => other.into(),
        })?;
        let info = ManifestInfo::from_document(&doc, manifest_path)?;
        let base_dir = manifest_path.parent().unwrap_or(Path::new(""));

        let cmd = SourceFile::new(
            "cmd",
            manifest_relative(base_dir, doc.value_or(FILES_SECTION, "cmd", DEFAULT_CMD)),
        );
        let cns = SourceFile::new(
            "cns",
            manifest_relative(base_dir, doc.value_or(FILES_SECTION, "cns", DEFAULT_CNS)),
        );

        let declared_common = doc.value_or(FILES_SECTION, COMMON_KEY, DEFAULT_COMMON_FILE);
        let (common_path, common_source) =
            resolve_common(base_dir, declared_common, &info.version, resources);
        let common = SourceFile::new(COMMON_KEY, common_path);

        let mut state_files = Vec::new();
        for key in state_file_keys() {
            match doc.named_property(FILES_SECTION, &key) {
                Some(relative) => {
                    let path = manifest_relative(base_dir, relative);
                    state_files.push(SourceFile::new(key, path));
                }
                None => trace!(%key, "state file not declared"),
            }
        }

        let assets = AssetPaths {
            sprite: declared_path(&doc, base_dir, SPRITE_KEY),
            anim: declared_path(&doc, base_dir, "anim"),
            sound: declared_path(&doc, base_dir, "sound"),
            ai: declared_path(&doc, base_dir, "ai"),
        };

        debug!(
            name = %info.name,
            version = %info.version,
            state_files = state_files.len(),
            common = %common_source,
            "resolved character definition"
        );

        Ok(Self {
            manifest,
            info,
            cmd,
            cns,
            common,
            common_source,
            state_files,
            assets,
            statedefs: StatedefMap::new(),
            locators: BTreeMap::new(),
            diagnostics: DiagnosticReport::new(),
        })
    }

    /// Re-reads every state file and rebuilds the statedef map and the
    /// diagnostics from scratch.
    ///
    /// Declared state files are checked in key order, the common file last.
    /// A missing state file is reported as a warning; a state file that
    /// fails to parse aborts the pass.
    pub fn validate(&mut self, catalog: &SchemaCatalog) -> Result<&DiagnosticReport> {
        let span = info_span!("validate_project", name = %self.info.name);
        let _guard = span.enter();

        let validator = StateValidator::new(catalog);
        let mut statedefs = StatedefMap::new();
        let mut locators = BTreeMap::new();
        let mut diagnostics = DiagnosticReport::new();

        let files = self
            .state_files
            .iter()
            .map(|file| (file, StateFileContext::new(file.key())))
            .chain(iter::once((
                &self.common,
                StateFileContext::common(self.common.key()),
            )));
        for (file, context) in files {
            let Some(doc) = read_state_file(file, &mut diagnostics)? else {
                continue;
            };
            let index = validator.validate(&doc, context, &mut statedefs, &mut diagnostics);
            locators.insert(file.key().to_string(), index);
        }

        info!(
            statedefs = statedefs.len(),
            diagnostics = diagnostics.len(),
            errors = diagnostics.count(Severity::Error),
            "validated project"
        );
        self.statedefs = statedefs;
        self.locators = locators;
        self.diagnostics = diagnostics;
        Ok(&self.diagnostics)
    }

    pub fn manifest(&self) -> &SourceFile {
        &self.manifest
    }

    pub fn info(&self) -> &ManifestInfo {
        &self.info
    }

    pub fn name(&self) -> &str {
        &self.info.name
    }

    pub fn display_name(&self) -> &str {
        &self.info.display_name
    }

    pub fn version(&self) -> &str {
        &self.info.version
    }

    pub fn local_coord(&self) -> LocalCoord {
        self.info.local_coord
    }

    pub fn cmd(&self) -> &SourceFile {
        &self.cmd
    }

    pub fn cns(&self) -> &SourceFile {
        &self.cns
    }

    pub fn common(&self) -> &SourceFile {
        &self.common
    }

    pub fn common_source(&self) -> CommonSource {
        self.common_source
    }

    /// Declared state files in validation order (common file excluded).
    pub fn state_files(&self) -> &[SourceFile] {
        &self.state_files
    }

    pub fn state_file(&self, key: &str) -> Option<&SourceFile> {
        if key.eq_ignore_ascii_case(COMMON_KEY) {
            return Some(&self.common);
        }
        self.state_files
            .iter()
            .find(|file| file.key().eq_ignore_ascii_case(key))
    }

    pub fn assets(&self) -> &AssetPaths {
        &self.assets
    }

    pub fn statedefs(&self) -> &StatedefMap {
        &self.statedefs
    }

    /// Statedef positions of one validated file.
    pub fn statedef_index(&self, key: &str) -> Option<&StatedefIndex> {
        self.locators.get(key)
    }

    pub fn diagnostics(&self) -> &DiagnosticReport {
        &self.diagnostics
    }

    /// Finds the file and section that own statedef `id`.
    pub fn locate_statedef(&self, id: i32) -> Option<StatedefLocation> {
        let file_key = self.statedefs.owner(id)?;
        let position = self.locators.get(file_key)?.position(id)?;
        let file = self.state_file(file_key)?;
        Some(StatedefLocation {
            file_key: file_key.to_string(),
            path: file.path().to_path_buf(),
            position,
        })
    }

    /// Reads the header of the declared sprite file.
    ///
    /// A declared but missing file opens as an empty v2 container.
    pub fn open_sprite(&self) -> Result<SpriteFile> {
        let path = self
            .assets
            .sprite
            .as_ref()
            .ok_or_else(|| ProjectError::NoSpriteFile {
                path: self.manifest.path().to_path_buf(),
            })?;
        Ok(SpriteFile::open(SPRITE_KEY, path)?)
    }
}

/// Joins a path declared in the manifest onto the manifest's directory.
///
/// Declared paths are always relative to that directory, so leading
/// separators are dropped instead of letting them replace `base_dir`.
pub(crate) fn manifest_relative(base_dir: &Path, declared: &str) -> PathBuf {
    base_dir.join(declared.trim_start_matches(['/', '\\']))
}

fn declared_path(doc: &Document, base_dir: &Path, key: &str) -> Option<PathBuf> {
    doc.named_property(FILES_SECTION, key)
        .map(|relative| manifest_relative(base_dir, relative))
}

fn read_state_file(file: &SourceFile, diagnostics: &mut DiagnosticReport) -> Result<Option<Document>> {
    match file.parse() {
        Ok(doc) => Ok(Some(doc)),
        Err(IniError::FileNotFound { path }) => {
            diagnostics.push(
                Diagnostic::new(
                    format!("State file {} not found at {}!", file.key(), path.display()),
                    Severity::Warning,
                )
                .with_file(file.key()),
            );
            Ok(None)
        }
        Err(err) => Err(err.into()),
    }
}
