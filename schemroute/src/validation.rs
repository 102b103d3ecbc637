//! Consistency checks over documents, symbols and extracted netlists.
//!
//! Extraction and routing tolerate broken input by skipping it; this pass
//! reports what was skipped. Nothing here rejects a document.

use std::collections::{HashMap, HashSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::netlist::{is_power_designator, Netlist};
use crate::schematic::{SchematicDoc, WireEndpoint};
use crate::symbols::{SymbolDef, SymbolLookup};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl Severity {
    fn rank(self) -> u8 {
        match self {
            Severity::Error => 2,
            Severity::Warning => 1,
            Severity::Info => 0,
        }
    }

    /// True when `self` is as serious as `threshold` or more.
    pub fn is_at_least(self, threshold: Severity) -> bool {
        self.rank() >= threshold.rank()
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Info => "info",
        };
        f.write_str(s)
    }
}

/// One finding, located by a JSON-ish path into the checked value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationIssue {
    pub path: String,
    pub message: String,
    pub severity: Severity,
}

impl ValidationIssue {
    pub fn new(path: impl Into<String>, message: impl Into<String>, severity: Severity) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
            severity,
        }
    }

    pub fn error(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(path, message, Severity::Error)
    }

    pub fn warning(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(path, message, Severity::Warning)
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}: {}", self.severity, self.path, self.message)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, issue: ValidationIssue) {
        self.issues.push(issue);
    }

    pub fn merge(&mut self, other: ValidationReport) {
        self.issues.extend(other.issues);
    }

    /// No errors; warnings and info are allowed.
    pub fn is_valid(&self) -> bool {
        self.count(Severity::Error) == 0
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.issues.iter().filter(|i| i.severity == severity).count()
    }

    pub fn errors(&self) -> usize {
        self.count(Severity::Error)
    }

    pub fn warnings(&self) -> usize {
        self.count(Severity::Warning)
    }

    pub fn infos(&self) -> usize {
        self.count(Severity::Info)
    }

    pub fn has_at_least(&self, threshold: Severity) -> bool {
        self.issues.iter().any(|i| i.severity.is_at_least(threshold))
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.issues.is_empty() {
            return f.write_str("✓ Valid");
        }
        for (n, issue) in self.issues.iter().enumerate() {
            if n > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", issue)?;
        }
        Ok(())
    }
}

/// Structural checks on a document.
///
/// Symbol-dependent checks (unknown kinds and pins) run only when a lookup
/// is supplied.
pub fn validate_document(doc: &SchematicDoc, symbols: Option<&dyn SymbolLookup>) -> ValidationReport {
    let mut report = ValidationReport::new();

    let mut seen = HashSet::new();
    for (i, inst) in doc.instances.iter().enumerate() {
        let path = format!("instances[{i}]");
        if !seen.insert(inst.id.as_str()) {
            report.push(ValidationIssue::error(
                format!("{path}.id"),
                format!("Duplicate instance id '{}'", inst.id),
            ));
        }
        if inst.is_label() && inst.declared_net().map_or(true, str::is_empty) {
            report.push(ValidationIssue::warning(
                format!("{path}.label"),
                format!("Net label '{}' has no text and names no net", inst.id),
            ));
        }
        if let Some(lookup) = symbols {
            if !lookup.contains(&inst.symbol_kind) {
                report.push(ValidationIssue::warning(
                    format!("{path}.symbolKind"),
                    format!("Unknown symbol kind '{}'", inst.symbol_kind),
                ));
            }
        }
    }

    let mut seen = HashSet::new();
    for (i, wire) in doc.wires.iter().enumerate() {
        let path = format!("wires[{i}]");
        if !seen.insert(wire.id.as_str()) {
            report.push(ValidationIssue::error(
                format!("{path}.id"),
                format!("Duplicate wire id '{}'", wire.id),
            ));
        }
        if wire.endpoint_a == wire.endpoint_b {
            report.push(ValidationIssue::warning(
                path.clone(),
                format!("Wire '{}' connects {} to itself", wire.id, wire.endpoint_a.key()),
            ));
        }
        for (side, endpoint) in ["a", "b"].into_iter().zip(wire.endpoints()) {
            check_endpoint(doc, symbols, &format!("{path}.{side}"), &wire.id, endpoint, &mut report);
        }
    }

    report
}

fn check_endpoint(
    doc: &SchematicDoc,
    symbols: Option<&dyn SymbolLookup>,
    path: &str,
    wire_id: &str,
    endpoint: &WireEndpoint,
    report: &mut ValidationReport,
) {
    let Some(inst) = doc.instance(&endpoint.instance_id) else {
        report.push(ValidationIssue::warning(
            path,
            format!(
                "Wire '{}' references missing instance '{}'; it is ignored for connectivity",
                wire_id, endpoint.instance_id
            ),
        ));
        return;
    };
    let Some(symbol) = symbols.and_then(|lookup| lookup.symbol(&inst.symbol_kind)) else {
        return;
    };
    if symbol.pin(&endpoint.pin_name).is_none() {
        report.push(ValidationIssue::warning(
            format!("{path}.pin"),
            format!("Symbol '{}' has no pin '{}'", symbol.id, endpoint.pin_name),
        ));
    }
}

/// Geometry and pin sanity of one symbol definition.
pub fn validate_symbol(symbol: &SymbolDef) -> ValidationReport {
    let mut report = ValidationReport::new();
    let base = format!("symbols.{}", symbol.id);

    if let Some(bbox) = symbol.bbox {
        if !(bbox.w > 0.0) {
            report.push(ValidationIssue::error(format!("{base}.bbox.w"), "Bounding box width must be positive"));
        }
        if !(bbox.h > 0.0) {
            report.push(ValidationIssue::error(format!("{base}.bbox.h"), "Bounding box height must be positive"));
        }
    }

    let mut names = HashSet::new();
    for (i, pin) in symbol.pins.iter().enumerate() {
        if !names.insert(pin.name.as_str()) {
            report.push(ValidationIssue::error(
                format!("{base}.pins[{i}].name"),
                format!("Duplicate pin name '{}'", pin.name),
            ));
        }
    }

    report
}

/// Output contract of an extracted netlist: unique refs, nets that only
/// name known components, and no single-node nets.
pub fn validate_netlist(netlist: &Netlist) -> ValidationReport {
    let mut report = ValidationReport::new();

    let mut refs: HashMap<&str, usize> = HashMap::new();
    for (i, comp) in netlist.components.iter().enumerate() {
        let known = refs.insert(comp.reference.as_str(), i).is_some();
        if known && !is_power_designator(&comp.reference) {
            report.push(ValidationIssue::error(
                format!("components[{i}].ref"),
                format!("Duplicate reference designator '{}'", comp.reference),
            ));
        }
    }

    for (i, net) in netlist.nets.iter().enumerate() {
        if net.nodes.len() < 2 {
            report.push(ValidationIssue::error(
                format!("nets[{i}]"),
                format!("Net '{}' has {} node(s), expected at least 2", net.name, net.nodes.len()),
            ));
        }
        for (j, node) in net.nodes.iter().enumerate() {
            if !refs.contains_key(node.reference.as_str()) {
                report.push(ValidationIssue::error(
                    format!("nets[{i}].nodes[{j}]"),
                    format!("Net '{}' references unknown component '{}'", net.name, node.reference),
                ));
            }
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;
    use crate::netlist::{CircuitComponent, Net, NetExtractor, NetNode};
    use crate::schematic::{Instance, Wire, LABEL_KIND};
    use crate::symbols::{Pin, PinDirection, SymbolCatalog};

    fn has(report: &ValidationReport, path: &str, severity: Severity) -> bool {
        report.issues.iter().any(|i| i.path == path && i.severity == severity)
    }

    #[test]
    fn test_clean_document() {
        let mut doc = SchematicDoc::new();
        doc.add_instance(Instance::new("r1", "resistor", Point::default()))
            .add_instance(Instance::new("g", "GND", Point::new(0.0, 50.0)))
            .add_wire(Wire::new("w1", WireEndpoint::new("r1", "1"), WireEndpoint::new("g", "GND")));
        let catalog = SymbolCatalog::builtin();

        let report = validate_document(&doc, Some(&catalog));
        assert!(report.issues.is_empty(), "{}", report);
        assert_eq!(report.to_string(), "✓ Valid");
    }

    #[test]
    fn test_document_findings() {
        let mut doc = SchematicDoc::new();
        doc.add_instance(Instance::new("r1", "resistor", Point::default()))
            .add_instance(Instance::new("r1", "capacitor", Point::default()))
            .add_instance(Instance::new("x", "flux_capacitor", Point::default()))
            .add_instance(Instance::new("t", LABEL_KIND, Point::default()))
            .add_wire(Wire::new("w", WireEndpoint::new("r1", "1"), WireEndpoint::new("r1", "1")))
            .add_wire(Wire::new("w", WireEndpoint::new("r1", "7"), WireEndpoint::new("ghost", "1")));
        let catalog = SymbolCatalog::builtin();

        let report = validate_document(&doc, Some(&catalog));
        assert!(has(&report, "instances[1].id", Severity::Error));
        assert!(has(&report, "instances[2].symbolKind", Severity::Warning));
        assert!(has(&report, "instances[3].label", Severity::Warning));
        assert!(has(&report, "wires[0]", Severity::Warning));
        assert!(has(&report, "wires[1].id", Severity::Error));
        assert!(has(&report, "wires[1].a.pin", Severity::Warning));
        assert!(has(&report, "wires[1].b", Severity::Warning));
        assert!(!report.is_valid());
        assert_eq!(report.errors(), 2);
    }

    #[test]
    fn test_symbol_checks_need_lookup() {
        let mut doc = SchematicDoc::new();
        doc.add_instance(Instance::new("x", "flux_capacitor", Point::default()));
        assert!(validate_document(&doc, None).issues.is_empty());
    }

    #[test]
    fn test_symbol_validation() {
        let bad = SymbolDef::new("bad")
            .with_bbox(0.0, 0.0, 0.0, 10.0)
            .with_pin(Pin::new("1", 0.0, 0.0, PinDirection::Left))
            .with_pin(Pin::new("1", 10.0, 0.0, PinDirection::Right));
        let report = validate_symbol(&bad);
        assert!(has(&report, "symbols.bad.bbox.w", Severity::Error));
        assert!(has(&report, "symbols.bad.pins[1].name", Severity::Error));
        assert_eq!(report.errors(), 2);

        let catalog = SymbolCatalog::builtin();
        for symbol in catalog.symbols() {
            assert!(validate_symbol(symbol).is_valid(), "{}", symbol.id);
        }
    }

    #[test]
    fn test_extracted_netlist_satisfies_contract() {
        let mut doc = SchematicDoc::new();
        doc.add_instance(Instance::new("a", "resistor", Point::default()))
            .add_instance(Instance::new("b", "resistor", Point::default()))
            .add_instance(Instance::new("g1", "GND", Point::default()))
            .add_instance(Instance::new("g2", "GND", Point::default()))
            .add_wire(Wire::new("w1", WireEndpoint::new("a", "1"), WireEndpoint::new("g1", "GND")))
            .add_wire(Wire::new("w2", WireEndpoint::new("b", "1"), WireEndpoint::new("g2", "GND")));

        let report = validate_netlist(&NetExtractor::extract(&doc));
        assert!(report.is_valid(), "{}", report);
    }

    #[test]
    fn test_netlist_contract_violations() {
        let netlist = Netlist {
            components: vec![
                CircuitComponent {
                    reference: "R1".into(),
                    symbol_kind: "resistor".into(),
                    net_label: None,
                },
                CircuitComponent {
                    reference: "R1".into(),
                    symbol_kind: "resistor".into(),
                    net_label: None,
                },
            ],
            nets: vec![
                Net {
                    name: "NET1".into(),
                    nodes: vec![NetNode::new("R1", "1")],
                },
                Net {
                    name: "NET2".into(),
                    nodes: vec![NetNode::new("R1", "2"), NetNode::new("U9", "3")],
                },
            ],
        };

        let report = validate_netlist(&netlist);
        assert!(has(&report, "components[1].ref", Severity::Error));
        assert!(has(&report, "nets[0]", Severity::Error));
        assert!(has(&report, "nets[1].nodes[1]", Severity::Error));
        assert_eq!(report.errors(), 3);
    }

    #[test]
    fn test_severity_threshold() {
        let mut report = ValidationReport::new();
        report.push(ValidationIssue::warning("wires[0]", "loop"));
        assert!(report.has_at_least(Severity::Warning));
        assert!(!report.has_at_least(Severity::Error));
        assert!(report.is_valid());
        assert_eq!(report.to_string(), "warning: wires[0]: loop");
    }
}
