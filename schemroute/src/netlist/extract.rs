//! Net extraction: pin connectivity, reference designators, and net naming.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::union_find::DisjointSet;
use crate::schematic::{Instance, SchematicDoc, WireEndpoint, LABEL_KIND, LABEL_PIN};

/// Power symbol kinds. Their designator is the kind itself, unnumbered,
/// and a net touching one is named after it.
pub const POWER_KINDS: [&str; 3] = ["GND", "VCC", "VDD"];

pub fn is_power_designator(reference: &str) -> bool {
    POWER_KINDS.contains(&reference)
}

/// Designator prefix for a symbol kind.
pub fn ref_prefix(symbol_kind: &str) -> &'static str {
    match symbol_kind {
        "R" | "resistor" => "R",
        "C" | "capacitor" => "C",
        "L" | "inductor" => "L",
        "D" | "diode" | "zener_diode" | "led" => "D",
        "Q" | "transistor_npn" | "transistor_pnp" | "mosfet_n" | "mosfet_p" => "Q",
        "J" | "usb_c" | "pin_header_1" | "pin_header_n" => "J",
        "P" => "P",
        "GND" => "GND",
        "VCC" => "VCC",
        "VDD" => "VDD",
        LABEL_KIND => "TAG",
        _ => "U",
    }
}

/// One pin of one component on a net.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NetNode {
    #[serde(rename = "ref")]
    pub reference: String,
    pub pin: String,
}

impl NetNode {
    pub fn new(reference: impl Into<String>, pin: impl Into<String>) -> Self {
        Self {
            reference: reference.into(),
            pin: pin.into(),
        }
    }
}

/// A set of electrically equivalent pins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Net {
    pub name: String,
    pub nodes: Vec<NetNode>,
}

impl Net {
    /// Designators of every component on this net, first appearance order.
    pub fn connected_components(&self) -> Vec<&str> {
        let mut refs: Vec<&str> = Vec::new();
        for node in &self.nodes {
            if !refs.contains(&node.reference.as_str()) {
                refs.push(&node.reference);
            }
        }
        refs
    }

    pub fn has_node(&self, reference: &str, pin: &str) -> bool {
        self.nodes.iter().any(|n| n.reference == reference && n.pin == pin)
    }
}

/// One entry per instance, in document order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CircuitComponent {
    #[serde(rename = "ref")]
    pub reference: String,
    pub symbol_kind: String,
    /// Net name declared by a label instance
    #[serde(rename = "net", default, skip_serializing_if = "Option::is_none")]
    pub net_label: Option<String>,
}

/// Extraction result: components plus nets with at least two nodes.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Netlist {
    pub components: Vec<CircuitComponent>,
    pub nets: Vec<Net>,
}

impl Netlist {
    pub fn component(&self, reference: &str) -> Option<&CircuitComponent> {
        self.components.iter().find(|c| c.reference == reference)
    }

    pub fn net(&self, name: &str) -> Option<&Net> {
        self.nets.iter().find(|n| n.name == name)
    }

    /// The net a given pin ended up on, if any.
    pub fn net_of(&self, reference: &str, pin: &str) -> Option<&Net> {
        self.nets.iter().find(|n| n.has_node(reference, pin))
    }
}

/// Union-find based netlist extractor.
pub struct NetExtractor;

impl NetExtractor {
    /// Derive components and nets from a document snapshot.
    ///
    /// Never fails. Wires touching a missing instance join nothing, and
    /// their endpoints disappear with the single-node nets.
    pub fn extract(doc: &SchematicDoc) -> Netlist {
        let mut instances: HashMap<&str, &Instance> = HashMap::new();
        for inst in &doc.instances {
            instances.entry(inst.id.as_str()).or_insert(inst);
        }

        let mut sets = DisjointSet::new();
        let mut endpoints: HashMap<String, WireEndpoint> = HashMap::new();
        let mut register = |sets: &mut DisjointSet, endpoint: &WireEndpoint| -> String {
            let key = endpoint.key();
            sets.insert(&key);
            endpoints.entry(key.clone()).or_insert_with(|| endpoint.clone());
            key
        };

        // Step 1: wires join their two endpoints
        for wire in &doc.wires {
            let a = register(&mut sets, &wire.endpoint_a);
            let b = register(&mut sets, &wire.endpoint_b);
            let dangling = wire
                .endpoints()
                .iter()
                .any(|e| !instances.contains_key(e.instance_id.as_str()));
            if dangling {
                tracing::debug!("Wire {} references a missing instance, not connecting", wire.id);
                continue;
            }
            sets.union(&a, &b);
        }

        // Step 2: labels with the same text share a net
        for group in Self::label_groups(doc) {
            let Some((first, rest)) = group.split_first() else {
                continue;
            };
            if rest.is_empty() {
                continue;
            }
            let anchor = register(&mut sets, &WireEndpoint::new(&first.id, LABEL_PIN));
            for inst in rest {
                let key = register(&mut sets, &WireEndpoint::new(&inst.id, LABEL_PIN));
                sets.union(&anchor, &key);
            }
        }

        // Step 3: reference designators
        let (components, refs) = Self::assign_designators(doc);

        // Step 4: connected groups become nets
        let mut nets = Vec::new();
        let mut auto_index = 1;
        for members in sets.groups() {
            if members.len() < 2 {
                continue;
            }
            let member_endpoints: Vec<&WireEndpoint> =
                members.iter().filter_map(|k| endpoints.get(k)).collect();

            let nodes: Vec<NetNode> = member_endpoints
                .iter()
                .map(|e| {
                    let reference = refs
                        .get(e.instance_id.as_str())
                        .cloned()
                        .unwrap_or_else(|| e.instance_id.clone());
                    NetNode::new(reference, &e.pin_name)
                })
                .collect();

            let label_name = member_endpoints.iter().find_map(|e| {
                instances
                    .get(e.instance_id.as_str())
                    .and_then(|inst| inst.declared_net())
            });
            let name = match label_name {
                Some(text) => text.to_string(),
                None => match nodes.iter().find(|n| is_power_designator(&n.reference)) {
                    Some(power) => power.reference.clone(),
                    None => {
                        let name = format!("NET{}", auto_index);
                        auto_index += 1;
                        name
                    }
                },
            };

            nets.push(Net { name, nodes });
        }

        tracing::debug!(
            "Extracted {} nets from {} instances and {} wires",
            nets.len(),
            doc.instances.len(),
            doc.wires.len()
        );

        Netlist { components, nets }
    }

    /// Label instances grouped by text, groups in first-appearance order.
    fn label_groups(doc: &SchematicDoc) -> Vec<Vec<&Instance>> {
        let mut slot_of: HashMap<&str, usize> = HashMap::new();
        let mut groups: Vec<Vec<&Instance>> = Vec::new();
        for inst in &doc.instances {
            let Some(text) = inst.declared_net() else {
                continue;
            };
            let slot = *slot_of.entry(text).or_insert_with(|| {
                groups.push(Vec::new());
                groups.len() - 1
            });
            groups[slot].push(inst);
        }
        groups
    }

    /// Number instances in document order.
    ///
    /// Counters are kept per prefix, so kinds sharing a prefix never hand
    /// out the same designator twice. Power kinds are not numbered.
    fn assign_designators(doc: &SchematicDoc) -> (Vec<CircuitComponent>, HashMap<&str, String>) {
        let mut counters: HashMap<&'static str, usize> = HashMap::new();
        let mut refs: HashMap<&str, String> = HashMap::new();
        let mut components = Vec::with_capacity(doc.instances.len());

        for inst in &doc.instances {
            let reference = if POWER_KINDS.contains(&inst.symbol_kind.as_str()) {
                inst.symbol_kind.clone()
            } else {
                let prefix = ref_prefix(&inst.symbol_kind);
                let count = counters.entry(prefix).or_insert(0);
                *count += 1;
                format!("{}{}", prefix, count)
            };

            refs.entry(inst.id.as_str()).or_insert_with(|| reference.clone());
            components.push(CircuitComponent {
                reference,
                symbol_kind: inst.symbol_kind.clone(),
                net_label: inst.declared_net().map(str::to_string),
            });
        }

        (components, refs)
    }
}
