//! Per-file state validation.
//!
//! A file is scanned once, top to bottom. The scan is either outside any
//! definition or inside the most recent `[Statedef N]`; `[State ...]`
//! blocks are checked against the definition that encloses them.

use mugen_ini::{Document, Section};
use mugen_model::{Diagnostic, DiagnosticReport, Severity, ValidProperty};
use mugen_standards::SchemaCatalog;
use tracing::{debug, info_span};

use crate::section::{SectionKind, StateHeader, StateNumber, StatedefHeader};
use crate::statedef_map::{StatedefIndex, StatedefMap};

const TYPE_KEY: &str = "type";
const TRIGGER_PREFIX: &str = "trigger";

/// Identity of the file being validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateFileContext<'a> {
    /// Project key of the file, e.g. `st`, `st3` or `stcommon`.
    pub key: &'a str,
    /// The shared common file may redeclare statedefs without a diagnostic.
    pub is_common: bool,
}

impl<'a> StateFileContext<'a> {
    pub fn new(key: &'a str) -> Self {
        Self {
            key,
            is_common: false,
        }
    }

    pub fn common(key: &'a str) -> Self {
        Self {
            key,
            is_common: true,
        }
    }
}

/// Checks state files against a [`SchemaCatalog`].
#[derive(Debug, Clone, Copy)]
pub struct StateValidator<'c> {
    catalog: &'c SchemaCatalog,
}

impl<'c> StateValidator<'c> {
    pub fn new(catalog: &'c SchemaCatalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &'c SchemaCatalog {
        self.catalog
    }

    /// Validates one parsed state file.
    ///
    /// Statedef numbers are claimed in `statedefs` (first file wins) and
    /// diagnostics are appended to `report`. Returns the file's statedef
    /// number to section position index.
    pub fn validate(
        &self,
        doc: &Document,
        file: StateFileContext<'_>,
        statedefs: &mut StatedefMap,
        report: &mut DiagnosticReport,
    ) -> StatedefIndex {
        let span = info_span!("validate_state_file", file = file.key, common = file.is_common);
        let _guard = span.enter();

        let before = report.len();
        let mut scan = FileScan {
            catalog: self.catalog,
            file,
            statedefs,
            report,
            index: StatedefIndex::new(),
            state: ScanState::NoActiveDefinition,
        };
        for section in doc.sections() {
            scan.visit(section);
        }
        let FileScan { index, report, .. } = scan;
        debug!(
            statedefs = index.len(),
            diagnostics = report.len() - before,
            "validated state file"
        );
        index
    }
}

/// Enclosing definition of the controllers currently being scanned.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Definition {
    id: Option<i32>,
    /// Number as written, used in messages.
    label: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum ScanState {
    NoActiveDefinition,
    InsideDefinition(Definition),
}

struct FileScan<'a, 'f> {
    catalog: &'a SchemaCatalog,
    file: StateFileContext<'f>,
    statedefs: &'a mut StatedefMap,
    report: &'a mut DiagnosticReport,
    index: StatedefIndex,
    state: ScanState,
}

impl FileScan<'_, '_> {
    fn emit(&mut self, severity: Severity, message: String) {
        self.report
            .push(Diagnostic::new(message, severity).with_file(self.file.key));
    }

    fn visit(&mut self, section: &Section) {
        match SectionKind::classify(section.name()) {
            SectionKind::Statedef(header) => {
                let definition = self.check_statedef(section, header);
                self.state = ScanState::InsideDefinition(definition);
            }
            SectionKind::State(header) => match &self.state {
                ScanState::InsideDefinition(definition) => {
                    let definition = definition.clone();
                    self.check_state(section, header, &definition);
                }
                ScanState::NoActiveDefinition => self.emit(
                    Severity::Info,
                    format!("State `{}` found outside of statedef group!", section.name()),
                ),
            },
            SectionKind::Other => {}
        }
    }

    fn check_statedef(&mut self, section: &Section, header: StatedefHeader<'_>) -> Definition {
        let key = self.file.key;
        let label = header.raw_id.to_string();

        match header.id {
            Some(id) => {
                let owner = self.statedefs.claim(id, key).map(str::to_string);
                if let Some(owner) = owner
                    && !self.file.is_common
                {
                    self.emit(
                        Severity::Info,
                        format!("Statedef {id} in file {key} already defined in file {owner}!"),
                    );
                }
            }
            None => self.emit(
                Severity::Warning,
                format!(
                    "Statedef `{}` in file {key} has invalid statedef number {:?}!",
                    section.name(),
                    header.raw_id
                ),
            ),
        }

        let props = self.catalog.statedef_properties();

        for entry in section.entries() {
            if find_property(props, entry.key()).is_none() {
                self.emit(
                    Severity::Warning,
                    format!(
                        "Statedef {label} in file {key} has invalid parameter {}!",
                        entry.key()
                    ),
                );
            }
        }

        for prop in props.iter().filter(|p| !p.optional) {
            if !section.contains_key(&prop.name) {
                self.emit(
                    Severity::Warning,
                    format!(
                        "Statedef {label} in file {key} is missing required parameter {}!",
                        prop.name
                    ),
                );
            }
        }

        for prop in props.iter().filter(|p| p.is_single_enum()) {
            if let Some(value) = section.get(&prop.name)
                && !prop.permits_option(value)
            {
                self.emit(
                    Severity::Warning,
                    format!(
                        "Statedef {label} in file {key} has invalid option {value} for property {}!",
                        prop.name
                    ),
                );
            }
        }

        if let Some(id) = header.id {
            self.index.record(id, section.position());
        }
        Definition {
            id: header.id,
            label,
        }
    }

    fn check_state(&mut self, section: &Section, header: StateHeader<'_>, definition: &Definition) {
        let name = section.name();
        let group = &definition.label;

        match header.number {
            StateNumber::Omitted => self.emit(
                Severity::Debug,
                format!("State `{name}` has number omitted for statedef group {group}!"),
            ),
            StateNumber::Number(n) if definition.id.is_some_and(|id| id != n) => self.emit(
                Severity::Debug,
                format!("State `{name}` not numbered correctly for statedef group {group}!"),
            ),
            StateNumber::Malformed(_) => self.emit(
                Severity::Debug,
                format!("State `{name}` not numbered correctly for statedef group {group}!"),
            ),
            StateNumber::Number(_) => {}
        }

        if !header.has_separator {
            self.emit(
                Severity::Error,
                format!("State `{name}` in statedef group {group} has no trailing space!"),
            );
        }

        let catalog = self.catalog;
        let controller_type = section.get(TYPE_KEY);
        let controller_props = controller_type
            .map(|ty| catalog.controller_properties(ty))
            .unwrap_or_default();

        if let Some(ty) = controller_type
            && catalog.is_controller(ty)
            && let Some(type_prop) = find_property(catalog.state_properties(), TYPE_KEY)
            && !type_prop.permits_option(ty)
        {
            self.emit(
                Severity::Error,
                format!("State `{name}` in statedef group {group} has invalid type {ty}!"),
            );
        }

        let state_props = catalog.state_properties();
        let type_label = controller_type.unwrap_or("(none)");
        for entry in section.entries() {
            let key = entry.key();
            if key.starts_with(TRIGGER_PREFIX)
                || find_property(state_props, key).is_some()
                || find_property(controller_props, key).is_some()
            {
                continue;
            }
            self.emit(
                Severity::Info,
                format!(
                    "State `{name}` with type {type_label} in statedef group {group} has invalid parameter {key}!"
                ),
            );
        }
    }
}

fn find_property<'p>(props: &'p [ValidProperty], name: &str) -> Option<&'p ValidProperty> {
    props.iter().find(|p| p.name.eq_ignore_ascii_case(name))
}
