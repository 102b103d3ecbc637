//! Flat `circuit.v1` netlist document for exporters.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::extract::{CircuitComponent, Net, NetExtractor};
use crate::core::SchemrouteError;
use crate::schematic::SchematicDoc;

pub const CIRCUIT_FORMAT: &str = "circuit.v1";
pub const CIRCUIT_FORMAT_VERSION: &str = "1.0";
pub const EXPORTER_NAME: &str = "schemroute";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CircuitMetadata {
    pub exporter: String,
    pub export_date: DateTime<Utc>,
    pub schematic_version: u32,
}

/// Component as written to `circuit.v1`.
///
/// Label components carry their net twice: as `net` and as
/// `schematic_net_label`, the property name netlist consumers look for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportedComponent {
    #[serde(rename = "ref")]
    pub reference: String,
    #[serde(rename = "symbolId")]
    pub symbol_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub net: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schematic_net_label: Option<String>,
}

impl From<CircuitComponent> for ExportedComponent {
    fn from(component: CircuitComponent) -> Self {
        Self {
            reference: component.reference,
            symbol_id: component.symbol_kind,
            schematic_net_label: component.net_label.clone(),
            net: component.net_label,
        }
    }
}

/// Serialized netlist with format header and export metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CircuitDoc {
    #[serde(rename = "type")]
    pub format: String,
    pub version: String,
    pub components: Vec<ExportedComponent>,
    pub nets: Vec<Net>,
    pub metadata: CircuitMetadata,
}

/// Extract and wrap the netlist, stamped with the current time.
pub fn export_circuit(doc: &SchematicDoc) -> CircuitDoc {
    let netlist = NetExtractor::extract(doc);
    CircuitDoc {
        format: CIRCUIT_FORMAT.to_string(),
        version: CIRCUIT_FORMAT_VERSION.to_string(),
        components: netlist.components.into_iter().map(Into::into).collect(),
        nets: netlist.nets,
        metadata: CircuitMetadata {
            exporter: EXPORTER_NAME.to_string(),
            export_date: Utc::now(),
            schematic_version: doc.schema_version,
        },
    }
}

/// Pretty-printed JSON of [`export_circuit`].
pub fn export_circuit_json(doc: &SchematicDoc) -> Result<String, SchemrouteError> {
    Ok(serde_json::to_string_pretty(&export_circuit(doc))?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;
    use crate::schematic::{Instance, Wire, WireEndpoint};

    #[test]
    fn test_export_shape() {
        let mut doc = SchematicDoc::new();
        doc.add_instance(Instance::new("a", "resistor", Point::default()))
            .add_instance(Instance::new("b", "GND", Point::default()))
            .add_wire(Wire::new("w", WireEndpoint::new("a", "1"), WireEndpoint::new("b", "GND")));

        let json = export_circuit_json(&doc).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["type"], "circuit.v1");
        assert_eq!(value["version"], "1.0");
        assert_eq!(value["components"][0]["ref"], "R1");
        assert_eq!(value["components"][0]["symbolId"], "resistor");
        assert!(value["components"][0].get("symbolKind").is_none());
        assert!(value["components"][0].get("net").is_none());
        assert!(value["components"][0].get("schematic_net_label").is_none());
        assert_eq!(value["nets"][0]["name"], "GND");
        assert_eq!(value["nets"][0]["nodes"][1]["ref"], "GND");
        assert_eq!(value["metadata"]["exporter"], "schemroute");
        assert_eq!(value["metadata"]["schematicVersion"], 1);
        assert!(value["metadata"]["exportDate"].is_string());
    }

    #[test]
    fn test_export_label_component_names_its_net() {
        let mut doc = SchematicDoc::new();
        doc.add_instance(Instance::new("r1", "resistor", Point::default()))
            .add_instance(Instance::new("t1", "Tag", Point::new(60.0, 0.0)).with_label("SDA"))
            .add_wire(Wire::new("w", WireEndpoint::new("r1", "2"), WireEndpoint::new("t1", "TAG")));

        let value = serde_json::to_value(export_circuit(&doc)).unwrap();
        let tag = &value["components"][1];

        assert_eq!(tag["ref"], "TAG1");
        assert_eq!(tag["symbolId"], "Tag");
        assert_eq!(tag["net"], "SDA");
        assert_eq!(tag["schematic_net_label"], "SDA");
        assert_eq!(value["nets"][0]["name"], "SDA");
    }

    #[test]
    fn test_export_round_trips_through_serde() {
        let doc = SchematicDoc::new();
        let exported = export_circuit(&doc);
        let json = serde_json::to_string(&exported).unwrap();
        let back: CircuitDoc = serde_json::from_str(&json).unwrap();
        assert_eq!(back, exported);
    }
}
