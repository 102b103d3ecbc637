//! Netlist derivation from wires and net labels.

pub mod export;
pub mod extract;
pub mod union_find;

pub use export::{export_circuit, export_circuit_json, CircuitDoc, CircuitMetadata, ExportedComponent};
pub use extract::{
    is_power_designator, ref_prefix, CircuitComponent, Net, NetExtractor, NetNode, Netlist,
    POWER_KINDS,
};
pub use union_find::DisjointSet;

use crate::schematic::SchematicDoc;

/// Extract components and nets from a document (convenience wrapper).
pub fn extract_nets(doc: &SchematicDoc) -> Netlist {
    NetExtractor::extract(doc)
}
