//! Tests for the validation pass

use schemroute::prelude::*;
use schemroute::validation::{validate_document, validate_netlist};
use schemroute::{check_document, load_catalog, load_document, Severity};
use std::path::PathBuf;

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

#[test]
fn test_valid_fixtures_have_no_findings() {
    let catalog = SymbolCatalog::builtin();
    for fixture in ["divider.json", "editor_labels.json", "blocked.json"] {
        let doc = load_document(&fixture_path(fixture)).unwrap();
        let report = check_document(&doc, &catalog);
        assert!(report.issues.is_empty(), "{fixture}:\n{report}");
    }
}

#[test]
fn test_broken_document_findings() {
    let doc = load_document(&fixture_path("broken.json")).unwrap();
    let catalog = SymbolCatalog::builtin();
    let report = check_document(&doc, &catalog);

    assert!(!report.is_valid());
    assert_eq!(report.errors(), 1, "{report}");
    assert!(report
        .issues
        .iter()
        .any(|i| i.severity == Severity::Error && i.message.contains("Duplicate instance id 'r1'")));
    assert!(report.issues.iter().any(|i| i.message.contains("flux_capacitor")));
    assert!(report.issues.iter().any(|i| i.message.contains("missing instance 'ghost'")));
}

#[test]
fn test_without_lookup_only_structure_is_checked() {
    let doc = load_document(&fixture_path("broken.json")).unwrap();
    let report = validate_document(&doc, None);
    assert!(!report.issues.iter().any(|i| i.message.contains("flux_capacitor")));
    assert_eq!(report.errors(), 1);
}

#[test]
fn test_custom_symbols_resolve_pins() {
    let doc = load_document(&fixture_path("sensor.json")).unwrap();

    let builtin_only = SymbolCatalog::builtin();
    let report = validate_document(&doc, Some(&builtin_only));
    assert_eq!(report.warnings(), 1, "{report}");

    let catalog = load_catalog(Some(&fixture_path("custom_symbols.json"))).unwrap();
    assert!(check_document(&doc, &catalog).issues.is_empty());
}

#[test]
fn test_extracted_netlists_meet_output_contract() {
    for fixture in ["divider.json", "editor_labels.json", "broken.json"] {
        let doc = load_document(&fixture_path(fixture)).unwrap();
        let report = validate_netlist(&NetExtractor::extract(&doc));
        assert!(report.is_valid(), "{fixture}:\n{report}");
    }
}
