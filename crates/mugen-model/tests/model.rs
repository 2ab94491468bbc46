//! Tests for mugen-model types.

use mugen_model::{Diagnostic, DiagnosticReport, PropType, Severity, ValidProperty};

#[test]
fn severities_are_ordered() {
    assert!(Severity::Debug < Severity::Info);
    assert!(Severity::Info < Severity::Warning);
    assert!(Severity::Warning < Severity::Error);
    let mut shuffled = vec![
        Severity::Error,
        Severity::Debug,
        Severity::Warning,
        Severity::Info,
    ];
    shuffled.sort();
    assert_eq!(shuffled, Severity::ALL.to_vec());
}

#[test]
fn severity_parses_labels() {
    assert_eq!("warning".parse::<Severity>().unwrap(), Severity::Warning);
    assert_eq!("WARN".parse::<Severity>().unwrap(), Severity::Warning);
    assert_eq!(" Error ".parse::<Severity>().unwrap(), Severity::Error);
    assert!("fatal".parse::<Severity>().is_err());
}

#[test]
fn severity_serializes_uppercase() {
    let json = serde_json::to_string(&Severity::Info).expect("serialize severity");
    assert_eq!(json, "\"INFO\"");
}

#[test]
fn at_least_filters_and_keeps_order() {
    let report = DiagnosticReport::from(vec![
        Diagnostic::new("a", Severity::Warning),
        Diagnostic::new("b", Severity::Debug),
        Diagnostic::new("c", Severity::Error),
        Diagnostic::new("d", Severity::Info),
    ]);
    let kept: Vec<&str> = report
        .at_least(Severity::Info)
        .map(|d| d.message.as_str())
        .collect();
    assert_eq!(kept, vec!["a", "c", "d"]);
}

#[test]
fn duplicates_are_kept() {
    let mut report = DiagnosticReport::new();
    report.push(Diagnostic::new("same", Severity::Info));
    report.push(Diagnostic::new("same", Severity::Info));
    assert_eq!(report.len(), 2);
}

#[test]
fn report_serializes_as_plain_list() {
    let report = DiagnosticReport::from(vec![Diagnostic::new("missing", Severity::Warning)]);
    let value = serde_json::to_value(&report).expect("serialize report");
    assert_eq!(
        value,
        serde_json::json!([{ "message": "missing", "severity": "WARNING" }])
    );
}

#[test]
fn multienum_property_has_enum_slot() {
    let prop = ValidProperty::new("flag", vec![PropType::MultiEnum], false)
        .with_enum_options(["nowalk", "noairguard"]);
    assert!(prop.has_enum_slot());
    assert!(!prop.is_single_enum());
    assert_eq!(prop.describe(), "MultiEnum (nowalk noairguard)");
}
