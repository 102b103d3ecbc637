//! Schemroute - connectivity and wire routing for schematic editors
//!
//! This library turns a schematic document (placed symbol instances plus
//! pin-to-pin wires) into a netlist, and routes wires as orthogonal
//! polylines around the bodies of other symbols.
//!
//! # Quick Start
//!
//! ```no_run
//! use schemroute::{load_document, route_all, NetExtractor, RouteOptions, SymbolCatalog};
//! use std::path::Path;
//!
//! let doc = load_document(Path::new("divider.json")).unwrap();
//!
//! let netlist = NetExtractor::extract(&doc);
//! for net in &netlist.nets {
//!     println!("{}: {} nodes", net.name, net.nodes.len());
//! }
//!
//! let catalog = SymbolCatalog::builtin();
//! for route in route_all(&doc, &catalog, &RouteOptions::default()) {
//!     println!("{}: {:?}", route.wire_id, route.points);
//! }
//! ```
//!
//! # Features
//!
//! - **Net extraction**: union-find over pins, net labels, power symbols
//! - **Routing**: shortest Manhattan paths on a sparse visibility grid
//! - **Symbols**: built-in catalog, JSON libraries, bbox computation
//! - **Validation**: non-fatal checks on documents, symbols and netlists

pub mod core;
pub mod geometry;
pub mod netlist;
pub mod routing;
pub mod schematic;
pub mod symbols;
pub mod validation;

// Re-export main types
pub use core::{load_catalog, load_document, RouteOptions, SchemrouteError, DEFAULT_ROUTE_MARGIN};
pub use geometry::{BBox, Point, Rect, Rotation};
pub use netlist::{export_circuit, export_circuit_json, CircuitDoc, Net, NetExtractor, NetNode, Netlist};
pub use routing::{obstacles_for, route_all, route_wire, Obstacle, OrthogonalRouter, WireRoute};
pub use schematic::{abs_pins, pin_position, Instance, SchematicDoc, Wire, WireEndpoint};
pub use symbols::{Pin, PinDirection, SymbolCatalog, SymbolDef, SymbolLookup};
pub use validation::{Severity, ValidationIssue, ValidationReport};

/// Extract the netlist of a document on disk (convenience wrapper).
pub fn extract_file(path: &std::path::Path) -> Result<Netlist, SchemrouteError> {
    let doc = load_document(path)?;
    Ok(NetExtractor::extract(&doc))
}

/// Run every validation pass over a document (convenience wrapper).
///
/// Covers the document itself, the symbols of `catalog`, and the netlist
/// extracted from the document.
pub fn check_document(doc: &SchematicDoc, catalog: &SymbolCatalog) -> ValidationReport {
    let mut report = validation::validate_document(doc, Some(catalog));
    for symbol in catalog.symbols() {
        report.merge(validation::validate_symbol(symbol));
    }
    report.merge(validation::validate_netlist(&NetExtractor::extract(doc)));
    report
}

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{
        Instance, NetExtractor, Netlist, Point, RouteOptions, SchematicDoc, SchemrouteError,
        SymbolCatalog, SymbolLookup, Wire, WireEndpoint,
    };
}
