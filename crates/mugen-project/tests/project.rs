use std::fs;
use std::path::{Path, PathBuf};

use mugen_ini::IniError;
use mugen_model::{Diagnostic, Severity};
use mugen_project::{CommonSource, LocalCoord, Project, ProjectError, state_file_keys};
use mugen_sff::{SffHeader, SffV1Header, SffVersion};
use mugen_standards::{CommonTemplate, ResourcePaths, SchemaCatalog};
use tempfile::TempDir;

const KFM_DEF: &str = r#"; Kung Fu Man
[Info]
name = "Kung Fu Man"
displayname = "Kung Fu Man"
mugenversion = 1.1
localcoord = 320,240

[Files]
cmd = kfm.cmd
cns = kfm.cns
st = kfm.cns
st0 = kfm0.st
st2 = kfm2.st
stcommon = common1.cns
sprite = kfm.sff
anim = kfm.air
sound = kfm.snd
"#;

const KFM_CNS: &str = "\
[Data]
life = 1000

[Statedef 0]
type = S
physics = S
sprpriority = 0

[State 0, 1]
type = ChangeState
trigger1 = Time = 0
value = 0
foobar = 1
";

const KFM0_ST: &str = "\
[Statedef 0]
type = S

[Statedef 200]
type = S
movetype = A
anim = 200

[State 200, 1]
type = ChangeState
trigger1 = AnimTime = 0
value = 0
ctrl = 1
";

struct Fixture {
    root: TempDir,
}

impl Fixture {
    /// Lays out `<root>/chars/kfm/` with the given files.
    fn new(files: &[(&str, &str)]) -> Self {
        let root = tempfile::tempdir().expect("tempdir");
        let dir = root.path().join("chars").join("kfm");
        fs::create_dir_all(&dir).expect("create char dir");
        for (name, text) in files {
            fs::write(dir.join(name), text).expect("write fixture");
        }
        Self { root }
    }

    fn kfm() -> Self {
        Self::new(&[("kfm.def", KFM_DEF), ("kfm.cns", KFM_CNS), ("kfm0.st", KFM0_ST)])
    }

    fn char_dir(&self) -> PathBuf {
        self.root.path().join("chars").join("kfm")
    }

    fn manifest(&self) -> PathBuf {
        self.char_dir().join("kfm.def")
    }

    fn resolve(&self) -> Result<Project, ProjectError> {
        Project::resolve(&self.manifest(), &catalog(), &ResourcePaths::default())
    }
}

fn catalog() -> SchemaCatalog {
    SchemaCatalog::load_default().expect("bundled catalog")
}

fn character_diagnostics(project: &Project, root: &Path) -> Vec<Diagnostic> {
    let root = root.display().to_string();
    project
        .diagnostics()
        .iter()
        .filter(|d| d.file.as_deref() != Some("stcommon"))
        .map(|d| Diagnostic {
            message: d.message.replace(&root, "<root>").replace('\\', "/"),
            ..d.clone()
        })
        .collect()
}

#[test]
fn resolves_manifest_fields() {
    let fixture = Fixture::kfm();
    let project = fixture.resolve().expect("resolve");
    let dir = fixture.char_dir();

    assert_eq!(project.name(), "Kung Fu Man");
    assert_eq!(project.display_name(), "Kung Fu Man");
    assert_eq!(project.version(), "1.1");
    assert_eq!(
        project.local_coord(),
        LocalCoord {
            width: 320,
            height: 240
        }
    );
    assert_eq!(project.cmd().path(), dir.join("kfm.cmd"));
    assert_eq!(project.cns().path(), dir.join("kfm.cns"));
    assert_eq!(project.assets().sprite, Some(dir.join("kfm.sff")));
    assert_eq!(project.assets().sound, Some(dir.join("kfm.snd")));
    assert_eq!(project.assets().ai, None);

    let keys: Vec<_> = project.state_files().iter().map(|f| f.key()).collect();
    assert_eq!(keys, vec!["st", "st0", "st2"]);
    assert_eq!(
        project.state_file("st0").map(|f| f.path().to_path_buf()),
        Some(dir.join("kfm0.st"))
    );
}

#[test]
fn default_common_falls_back_to_versioned_template() {
    let fixture = Fixture::kfm();
    let project = fixture.resolve().expect("resolve");
    assert_eq!(
        project.common_source(),
        CommonSource::Template(CommonTemplate::V1_1)
    );
    assert!(
        project
            .common()
            .path()
            .ends_with(CommonTemplate::V1_1.file_name())
    );
    assert!(
        project
            .diagnostics()
            .iter()
            .all(|d| d.file.as_deref() != Some("stcommon") || d.severity < Severity::Warning)
    );
}

#[test]
fn engine_common_file_is_found() {
    let fixture = Fixture::kfm();
    let data = fixture.root.path().join("data");
    fs::create_dir_all(&data).expect("data dir");
    fs::write(data.join("common1.cns"), "[Statedef 5150]\ntype = L\n").expect("write");

    let project = fixture.resolve().expect("resolve");
    assert_eq!(project.common_source(), CommonSource::EngineData);
    let location = project.locate_statedef(5150).expect("common statedef");
    assert_eq!(location.file_key, "stcommon");
    assert_eq!(location.position, 0);
}

#[test]
fn declared_common_is_used_verbatim() {
    let text = KFM_DEF.replace("stcommon = common1.cns", "stcommon = mycommon.cns");
    let fixture = Fixture::new(&[
        ("kfm.def", &text),
        ("kfm.cns", KFM_CNS),
        ("kfm0.st", KFM0_ST),
    ]);
    let project = fixture.resolve().expect("resolve");
    assert_eq!(project.common_source(), CommonSource::Declared);
    assert_eq!(
        project.common().path(),
        fixture.char_dir().join("mycommon.cns")
    );

    let missing: Vec<_> = project
        .diagnostics()
        .iter()
        .filter(|d| d.file.as_deref() == Some("stcommon"))
        .collect();
    assert_eq!(missing.len(), 1);
    assert_eq!(missing[0].severity, Severity::Warning);
}

#[test]
fn statedefs_belong_to_first_declaring_file() {
    let fixture = Fixture::kfm();
    let project = fixture.resolve().expect("resolve");

    assert_eq!(project.statedefs().owner(0), Some("st"));
    assert_eq!(project.statedefs().owner(200), Some("st0"));
    assert_eq!(project.statedefs().owner(5000), Some("stcommon"));

    let location = project.locate_statedef(200).expect("statedef 200");
    assert_eq!(location.file_key, "st0");
    assert_eq!(location.path, fixture.char_dir().join("kfm0.st"));
    assert_eq!(location.position, 1);
    assert_eq!(project.locate_statedef(0).map(|l| l.position), Some(1));
    assert_eq!(project.locate_statedef(123_456), None);
}

#[test]
fn fixture_diagnostics_snapshot() {
    let fixture = Fixture::kfm();
    let project = fixture.resolve().expect("resolve");
    let diagnostics = character_diagnostics(&project, fixture.root.path());
    insta::assert_json_snapshot!(diagnostics, @r#"
    [
      {
        "message": "State `state 0, 1` with type ChangeState in statedef group 0 has invalid parameter foobar!",
        "severity": "INFO",
        "file": "st"
      },
      {
        "message": "Statedef 0 in file st0 already defined in file st!",
        "severity": "INFO",
        "file": "st0"
      },
      {
        "message": "State file st2 not found at <root>/chars/kfm/kfm2.st!",
        "severity": "WARNING",
        "file": "st2"
      }
    ]
    "#);
    assert!(!project.diagnostics().has_errors());
}

#[test]
fn revalidation_starts_from_scratch() {
    let fixture = Fixture::kfm();
    let catalog = catalog();
    let mut project = fixture.resolve().expect("resolve");
    let before = project.diagnostics().len();

    fs::write(fixture.char_dir().join("kfm2.st"), "[Statedef 300]\ntype = S\n").expect("write");
    let report = project.validate(&catalog).expect("revalidate");
    assert_eq!(report.len(), before - 1);
    assert_eq!(project.statedefs().owner(300), Some("st2"));
}

#[test]
fn missing_manifest_is_fatal() {
    let fixture = Fixture::new(&[]);
    let err = fixture.resolve().unwrap_err();
    match err {
        ProjectError::FileNotFound { path } => assert_eq!(path, fixture.manifest()),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn malformed_state_file_is_fatal() {
    let fixture = Fixture::new(&[
        ("kfm.def", KFM_DEF),
        ("kfm.cns", "[Statedef 0\ntype = S\n"),
        ("kfm0.st", KFM0_ST),
    ]);
    let err = fixture.resolve().unwrap_err();
    assert!(matches!(
        err,
        ProjectError::Ini(IniError::MalformedHeader { line: 1, .. })
    ));
}

#[test]
fn manifest_defaults() {
    let fixture = Fixture::new(&[("kfm.def", "[Info]\n")]);
    let project = fixture.resolve().expect("resolve");
    assert_eq!(project.name(), "New character");
    assert_eq!(project.display_name(), "NewCharacter");
    assert_eq!(project.version(), "win");
    assert_eq!(project.cmd().path(), fixture.char_dir().join("blank.cmd"));
    assert_eq!(project.cns().path(), fixture.char_dir().join("blank.cns"));
    assert!(project.state_files().is_empty());
    assert_eq!(
        project.common_source(),
        CommonSource::Template(CommonTemplate::Win)
    );
    assert!(matches!(
        project.open_sprite(),
        Err(ProjectError::NoSpriteFile { .. })
    ));
}

#[test]
fn declared_paths_with_leading_separators_stay_in_char_dir() {
    let text = KFM_DEF
        .replace("cmd = kfm.cmd", "cmd = /abs/kfm.cmd")
        .replace("st0 = kfm0.st", "st0 = /kfm0.st")
        .replace("sprite = kfm.sff", "sprite = \\kfm.sff")
        .replace("localcoord = 320,240", "localcoord = 320,240,1");
    let fixture = Fixture::new(&[
        ("kfm.def", &text),
        ("kfm.cns", KFM_CNS),
        ("kfm0.st", KFM0_ST),
    ]);
    let project = fixture.resolve().expect("resolve");

    assert_eq!(
        project.cmd().path(),
        fixture.char_dir().join("abs").join("kfm.cmd")
    );
    assert_eq!(
        project.state_file("st0").expect("st0").path(),
        fixture.char_dir().join("kfm0.st")
    );
    assert_eq!(
        project.assets().sprite.as_deref(),
        Some(fixture.char_dir().join("kfm.sff").as_path())
    );
    assert_eq!(
        project.local_coord(),
        LocalCoord {
            width: 320,
            height: 240
        }
    );
    let location = project.locate_statedef(200).expect("statedef 200");
    assert_eq!(location.file_key, "st0");
}

#[test]
fn opens_declared_sprite() {
    let fixture = Fixture::kfm();
    let project = fixture.resolve().expect("resolve");

    // Not on disk yet: reads as a fresh container.
    let fresh = project.open_sprite().expect("fresh sprite");
    assert!(matches!(fresh.header(), SffHeader::V2(_)));
    assert_eq!(fresh.header().sprite_count(), 0);

    let header = SffV1Header {
        version: SffVersion::V1,
        group_count: 3,
        sprite_count: 42,
        subfile_offset: 512,
        subheader_length: 32,
    };
    fs::write(fixture.char_dir().join("kfm.sff"), header.to_bytes()).expect("write sff");
    let sprite = project.open_sprite().expect("sprite");
    assert_eq!(sprite.header(), &SffHeader::V1(header));
    assert_eq!(sprite.key(), "sprite");
}

#[test]
fn state_keys_are_ordered() {
    let keys: Vec<_> = state_file_keys().collect();
    assert_eq!(keys.first().map(String::as_str), Some("st"));
    assert_eq!(keys.get(1).map(String::as_str), Some("st0"));
    assert_eq!(keys.last().map(String::as_str), Some("st9"));
    assert_eq!(keys.len(), 11);
}
