//! Schematic document data types.
//!
//! The document is owned by the editor; the engine only reads snapshots of
//! it. Field names serialize as camelCase, and the aliases accept documents
//! written by the canvas editor (`symbolId`, `pos`, `rotDeg`, ...).

use serde::{Deserialize, Serialize};

use crate::core::SchemrouteError;
use crate::geometry::{Point, Rotation};

/// Schema version understood by [`SchematicDoc::from_json`].
pub const CURRENT_SCHEMA_VERSION: u32 = 1;

/// Symbol kind reserved for net labels (tags).
pub const LABEL_KIND: &str = "Tag";

/// Synthetic pin through which same-named labels are joined.
pub const LABEL_PIN: &str = "TAG";

/// A placed occurrence of a symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Instance {
    pub id: String,

    #[serde(alias = "symbolId")]
    pub symbol_kind: String,

    #[serde(alias = "pos")]
    pub position: Point,

    #[serde(default, alias = "rotDeg")]
    pub rotation: Rotation,

    /// Net name declared by a label instance
    #[serde(default, alias = "tag", skip_serializing_if = "Option::is_none")]
    pub label_text: Option<String>,
}

impl Instance {
    pub fn new(id: impl Into<String>, symbol_kind: impl Into<String>, position: Point) -> Self {
        Self {
            id: id.into(),
            symbol_kind: symbol_kind.into(),
            position,
            rotation: Rotation::R0,
            label_text: None,
        }
    }

    /// Place a new instance with a freshly generated id.
    pub fn place(symbol_kind: impl Into<String>, position: Point) -> Self {
        Self::new(uuid::Uuid::new_v4().to_string(), symbol_kind, position)
    }

    pub fn with_rotation(mut self, rotation: Rotation) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_label(mut self, text: impl Into<String>) -> Self {
        self.label_text = Some(text.into());
        self
    }

    pub fn is_label(&self) -> bool {
        self.symbol_kind == LABEL_KIND
    }

    /// Label text, only for label instances that actually carry one.
    pub fn declared_net(&self) -> Option<&str> {
        if self.is_label() {
            self.label_text.as_deref().filter(|text| !text.is_empty())
        } else {
            None
        }
    }
}

/// Reference to one pin of one instance.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireEndpoint {
    #[serde(alias = "instId")]
    pub instance_id: String,
    pub pin_name: String,
}

impl WireEndpoint {
    pub fn new(instance_id: impl Into<String>, pin_name: impl Into<String>) -> Self {
        Self {
            instance_id: instance_id.into(),
            pin_name: pin_name.into(),
        }
    }

    /// Union-find key, `"{instanceId}:{pinName}"`.
    pub fn key(&self) -> String {
        format!("{}:{}", self.instance_id, self.pin_name)
    }
}

/// A point-to-point connection between two pins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Wire {
    pub id: String,
    #[serde(alias = "a")]
    pub endpoint_a: WireEndpoint,
    #[serde(alias = "b")]
    pub endpoint_b: WireEndpoint,
}

impl Wire {
    pub fn new(id: impl Into<String>, a: WireEndpoint, b: WireEndpoint) -> Self {
        Self {
            id: id.into(),
            endpoint_a: a,
            endpoint_b: b,
        }
    }

    /// Connect two pins with a wire carrying a fresh id.
    pub fn connect(a: WireEndpoint, b: WireEndpoint) -> Self {
        Self::new(uuid::Uuid::new_v4().to_string(), a, b)
    }

    pub fn endpoints(&self) -> [&WireEndpoint; 2] {
        [&self.endpoint_a, &self.endpoint_b]
    }
}

fn default_schema_version() -> u32 {
    CURRENT_SCHEMA_VERSION
}

/// In-memory snapshot of a schematic: instances plus wires.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchematicDoc {
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
    #[serde(default)]
    pub instances: Vec<Instance>,
    #[serde(default)]
    pub wires: Vec<Wire>,
}

impl SchematicDoc {
    pub fn new() -> Self {
        Self {
            schema_version: CURRENT_SCHEMA_VERSION,
            instances: Vec::new(),
            wires: Vec::new(),
        }
    }

    /// Parse a document from JSON, rejecting schema versions we don't know.
    pub fn from_json(content: &str) -> Result<Self, SchemrouteError> {
        let doc: SchematicDoc = serde_json::from_str(content)?;
        if doc.schema_version != CURRENT_SCHEMA_VERSION {
            return Err(SchemrouteError::UnsupportedSchema(doc.schema_version));
        }
        Ok(doc)
    }

    pub fn to_json(&self) -> Result<String, SchemrouteError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn add_instance(&mut self, instance: Instance) -> &mut Self {
        self.instances.push(instance);
        self
    }

    pub fn add_wire(&mut self, wire: Wire) -> &mut Self {
        self.wires.push(wire);
        self
    }

    /// Look up an instance by id.
    pub fn instance(&self, id: &str) -> Option<&Instance> {
        self.instances.iter().find(|i| i.id == id)
    }

    pub fn wire(&self, id: &str) -> Option<&Wire> {
        self.wires.iter().find(|w| w.id == id)
    }
}

impl Default for SchematicDoc {
    fn default() -> Self {
        Self::new()
    }
}
