use std::fs;
use std::path::Path;

use mugen_model::{CaseInsensitiveMap, SchemaSection, ValidController, ValidProperty};
use tracing::debug;

use crate::error::{Result, StandardsError};
use crate::loader::{parse_controllers, parse_section};
use crate::paths::{CONTROLLER_SCHEMA_FILE, ResourcePaths, STATE_SCHEMA_FILE, STATEDEF_SCHEMA_FILE};

/// Property schemas for statedef headers, state controller blocks and every
/// known controller type.
///
/// Loaded once and shared by reference; nothing mutates it afterwards.
#[derive(Debug, Clone)]
pub struct SchemaCatalog {
    statedef: SchemaSection,
    state: SchemaSection,
    controllers: CaseInsensitiveMap<ValidController>,
}

impl SchemaCatalog {
    /// Loads `statedef.xml`, `state.xml` and `controller.xml` from `schema_dir`.
    pub fn load(schema_dir: &Path) -> Result<Self> {
        if !schema_dir.is_dir() {
            return Err(StandardsError::DirectoryNotFound {
                path: schema_dir.to_path_buf(),
            });
        }
        let read = |name: &str| {
            let path = schema_dir.join(name);
            fs::read_to_string(&path)
                .map(|text| (path.clone(), text))
                .map_err(|e| StandardsError::read(&path, e))
        };
        let (statedef_path, statedef_xml) = read(STATEDEF_SCHEMA_FILE)?;
        let (state_path, state_xml) = read(STATE_SCHEMA_FILE)?;
        let (controller_path, controller_xml) = read(CONTROLLER_SCHEMA_FILE)?;

        let catalog = Self {
            statedef: parse_section(&statedef_xml, &statedef_path, "statedef")?,
            state: parse_section(&state_xml, &state_path, "state")?,
            controllers: parse_controllers(&controller_xml, &controller_path)?,
        };
        debug!(
            dir = %schema_dir.display(),
            statedef_properties = catalog.statedef.properties.len(),
            state_properties = catalog.state.properties.len(),
            controllers = catalog.controllers.len(),
            "loaded schema catalog"
        );
        Ok(catalog)
    }

    /// Loads the catalog from the default resource location.
    pub fn load_default() -> Result<Self> {
        Self::load(&ResourcePaths::default().schema_dir())
    }

    /// Builds a catalog from in-memory XML documents.
    pub fn from_xml(statedef: &str, state: &str, controllers: &str) -> Result<Self> {
        Ok(Self {
            statedef: parse_section(statedef, Path::new(STATEDEF_SCHEMA_FILE), "statedef")?,
            state: parse_section(state, Path::new(STATE_SCHEMA_FILE), "state")?,
            controllers: parse_controllers(controllers, Path::new(CONTROLLER_SCHEMA_FILE))?,
        })
    }

    pub fn statedef(&self) -> &SchemaSection {
        &self.statedef
    }

    pub fn state(&self) -> &SchemaSection {
        &self.state
    }

    pub fn statedef_properties(&self) -> &[ValidProperty] {
        &self.statedef.properties
    }

    pub fn state_properties(&self) -> &[ValidProperty] {
        &self.state.properties
    }

    /// Properties of controller type `name`; empty for an unknown type.
    pub fn controller_properties(&self, name: &str) -> &[ValidProperty] {
        self.controllers
            .get(name.trim())
            .map(|c| c.properties.as_slice())
            .unwrap_or_default()
    }

    pub fn controller(&self, name: &str) -> Option<&ValidController> {
        self.controllers.get(name.trim())
    }

    pub fn is_controller(&self, name: &str) -> bool {
        self.controllers.contains(name.trim())
    }

    /// Controller types ordered by case-folded name.
    pub fn controllers(&self) -> impl Iterator<Item = &ValidController> {
        self.controllers.iter().map(|(_, c)| c)
    }

    pub fn controller_count(&self) -> usize {
        self.controllers.len()
    }
}
