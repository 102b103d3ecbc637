//! Tests for document and symbol library loading

use schemroute::prelude::*;
use schemroute::{load_catalog, load_document, Rotation};
use std::path::PathBuf;

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

#[test]
fn test_load_document() {
    let doc = load_document(&fixture_path("divider.json")).expect("Should load divider");

    assert_eq!(doc.schema_version, 1);
    assert_eq!(doc.instances.len(), 3);
    assert_eq!(doc.wires.len(), 2);

    let r2 = doc.instance("r2").expect("Should find r2");
    assert_eq!(r2.position, Point::new(130.0, 0.0));
    assert_eq!(doc.wire("w2").unwrap().endpoint_b.pin_name, "GND");
}

#[test]
fn test_load_editor_field_names() {
    let doc = load_document(&fixture_path("editor_labels.json")).expect("Should accept editor aliases");

    let r1 = doc.instance("r1").unwrap();
    assert_eq!(r1.symbol_kind, "resistor");
    assert_eq!(r1.rotation, Rotation::R90);

    let t1 = doc.instance("t1").unwrap();
    assert_eq!(t1.declared_net(), Some("VOUT"));

    let w1 = doc.wire("w1").unwrap();
    assert_eq!(w1.endpoint_a.key(), "u1:OUT");
    assert_eq!(w1.endpoint_b.key(), "t1:TAG");
}

#[test]
fn test_missing_file_is_io_error() {
    let result = load_document(&PathBuf::from("no_such_schematic.json"));
    assert!(matches!(result, Err(SchemrouteError::Io(_))));
}

#[test]
fn test_unknown_schema_version_rejected() {
    let result = load_document(&fixture_path("future_schema.json"));
    assert!(matches!(result, Err(SchemrouteError::UnsupportedSchema(7))));
}

#[test]
fn test_bad_rotation_rejected() {
    let json = r#"{"schemaVersion":1,"instances":[{"id":"a","symbolKind":"R","position":{"x":0,"y":0},"rotation":45}],"wires":[]}"#;
    assert!(matches!(SchematicDoc::from_json(json), Err(SchemrouteError::Json(_))));
}

#[test]
fn test_save_and_reload() {
    let doc = load_document(&fixture_path("editor_labels.json")).unwrap();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("saved.json");
    std::fs::write(&path, doc.to_json().unwrap()).unwrap();

    let reloaded = load_document(&path).unwrap();
    assert_eq!(reloaded, doc);
}

#[test]
fn test_load_symbol_library() {
    let catalog = load_catalog(Some(&fixture_path("custom_symbols.json"))).expect("Should load library");

    let sensor = catalog.get("sensor_3pin").expect("Should register sensor");
    assert!(!catalog.is_builtin("sensor_3pin"));
    assert_eq!(sensor.pins.len(), 3);

    // bbox computed from the drawing and pins
    let bbox = sensor.bbox.expect("bbox filled in on registration");
    assert_eq!(bbox.x, -22.0);
    assert_eq!(bbox.y, -35.0);
    assert_eq!(bbox.x + bbox.w, 35.0);
    assert_eq!(bbox.y + bbox.h, 35.0);

    // built-ins still present
    assert!(catalog.contains("resistor"));
}
