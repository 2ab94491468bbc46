use std::fs;
use std::path::PathBuf;

use mugen_cli::commands::{SchemaListing, run_check, run_schema, run_sff};
use mugen_cli::summary::{check_json, diagnostics_table, schema_table, severity_counts, sff_table};
use mugen_model::Severity;
use mugen_sff::SffV2Header;
use mugen_standards::ResourcePaths;
use tempfile::TempDir;

const DEF: &str = r#"[Info]
name = "Tester"
displayname = "Test Character"
mugenversion = 1.0

[Files]
cns = test.cns
st = test.cns
st1 = missing.st
sprite = test.sff
"#;

const CNS: &str = "\
[Statedef 100]
type = S
bogus = 1

[State 100, 1]
type = ChangeState
value = 0
extra = 1

[State100]
type = Null
";

fn fixture() -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("tempdir");
    fs::write(dir.path().join("test.def"), DEF).expect("write def");
    fs::write(dir.path().join("test.cns"), CNS).expect("write cns");
    let def = dir.path().join("test.def");
    (dir, def)
}

#[test]
fn check_filters_by_severity_but_keeps_errors() {
    let (_dir, def) = fixture();
    let resources = ResourcePaths::default();

    let result = run_check(&def, &resources, Severity::Warning).expect("check");
    assert!(result.has_errors());
    assert!(
        result
            .shown()
            .iter()
            .all(|d| d.severity >= Severity::Warning)
    );

    let result = run_check(&def, &resources, Severity::Error).expect("check");
    let shown = result.shown();
    assert_eq!(shown.len(), 1);
    assert_eq!(
        shown[0].message,
        "State `state100` in statedef group 100 has no trailing space!"
    );

    let table = diagnostics_table(&shown).to_string();
    assert!(table.contains("ERROR"));
    assert!(table.contains("no trailing space"));
}

#[test]
fn severity_totals_line() {
    let (_dir, def) = fixture();
    let result = run_check(&def, &ResourcePaths::default(), Severity::Debug).expect("check");
    let line = severity_counts(&result.project);
    assert!(line.starts_with("1 error, 2 warnings, 1 info, 1 debug"), "{line}");
}

#[test]
fn check_json_output() {
    let (_dir, def) = fixture();
    let result = run_check(&def, &ResourcePaths::default(), Severity::Warning).expect("check");
    let json: serde_json::Value =
        serde_json::from_str(&check_json(&result).expect("json")).expect("valid json");

    assert_eq!(json["name"], "Tester");
    assert_eq!(json["display_name"], "Test Character");
    assert_eq!(json["version"], "1.0");
    assert_eq!(json["local_coord"]["width"], 320);
    assert_eq!(json["has_errors"], true);
    let severities: Vec<_> = json["diagnostics"]
        .as_array()
        .expect("diagnostics array")
        .iter()
        .map(|d| d["severity"].as_str().unwrap_or_default().to_string())
        .collect();
    assert_eq!(severities, vec!["WARNING", "ERROR", "WARNING"]);
}

#[test]
fn check_reports_missing_definition() {
    let dir = tempfile::tempdir().expect("tempdir");
    let err = run_check(
        &dir.path().join("nope.def"),
        &ResourcePaths::default(),
        Severity::Info,
    )
    .unwrap_err();
    assert!(format!("{err:#}").contains("character definition not found"));
}

#[test]
fn check_reports_missing_resources() {
    let (dir, def) = fixture();
    let resources = ResourcePaths::new(dir.path().join("no-resources"));
    let err = run_check(&def, &resources, Severity::Info).unwrap_err();
    assert!(format!("{err}").starts_with("load schema from"));
}

#[test]
fn sff_header_table() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("test.sff");
    let header = SffV2Header {
        sprite_count: 120,
        palette_count: 4,
        ..SffV2Header::fresh()
    };
    fs::write(&path, header.to_bytes()).expect("write sff");

    let sprite = run_sff(&path).expect("sff");
    assert_eq!(sprite.header().sprite_count(), 120);
    let table = sff_table(&sprite).to_string();
    assert!(table.contains("2.100"));
    assert!(table.contains("palettes"));
    assert!(table.contains("120"));
}

#[test]
fn sff_missing_file_reads_as_fresh_container() {
    let dir = tempfile::tempdir().expect("tempdir");
    let sprite = run_sff(&dir.path().join("missing.sff")).expect("sff");
    assert_eq!(sprite.header().sprite_count(), 0);
    let table = sff_table(&sprite).to_string();
    assert!(table.contains("2.100"));
}

#[test]
fn schema_listing() {
    let resources = ResourcePaths::default();
    let SchemaListing::Controllers(controllers) = run_schema(&resources, None).expect("schema")
    else {
        panic!("expected controller list");
    };
    let names: Vec<_> = controllers.iter().map(|(name, _)| name.to_lowercase()).collect();
    let mut sorted = names.clone();
    sorted.sort();
    assert_eq!(names, sorted);
    assert!(names.iter().any(|name| name == "changestate"));

    let listing = run_schema(&resources, Some("changestate")).expect("controller");
    let SchemaListing::Controller(controller) = &listing else {
        panic!("expected one controller");
    };
    assert_eq!(controller.name, "ChangeState");
    let table = schema_table(&listing).to_string();
    assert!(table.contains("value"));
    assert!(table.contains("yes"));

    let err = run_schema(&resources, Some("Teleport")).unwrap_err();
    assert_eq!(err.to_string(), "unknown controller type: Teleport");
}
