//! Symbol definitions and the symbol lookup collaborator.
//!
//! The engine never reaches for a process-wide registry. Callers build a
//! [`SymbolCatalog`] (or any other [`SymbolLookup`]) and pass it in.

mod bbox;
mod builtin;

pub use bbox::{compute_symbol_bbox, primitive_bbox};
pub use builtin::builtin_symbols;

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use crate::core::SchemrouteError;
use crate::geometry::{BBox, Point};

/// Side of the symbol body a pin projects from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PinDirection {
    Left,
    Right,
    Up,
    Down,
}

/// A named attachment point in symbol-local coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pin {
    pub name: String,
    #[serde(alias = "pos")]
    pub position: Point,
    #[serde(alias = "dir")]
    pub direction: PinDirection,
}

impl Pin {
    pub fn new(name: impl Into<String>, x: f64, y: f64, direction: PinDirection) -> Self {
        Self {
            name: name.into(),
            position: Point::new(x, y),
            direction,
        }
    }
}

/// Drawing primitive. Only its extent matters to the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Primitive {
    Line {
        a: Point,
        b: Point,
    },
    Rect {
        x: f64,
        y: f64,
        w: f64,
        h: f64,
    },
    Circle {
        cx: f64,
        cy: f64,
        r: f64,
    },
    Arc {
        cx: f64,
        cy: f64,
        r: f64,
        #[serde(rename = "startAngle")]
        start_angle: f64,
        #[serde(rename = "endAngle")]
        end_angle: f64,
    },
    Polyline {
        points: Vec<Point>,
    },
    Text {
        x: f64,
        y: f64,
        text: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        size: Option<f64>,
    },
}

/// A symbol definition: body extent plus pins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymbolDef {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bbox: Option<BBox>,
    #[serde(default)]
    pub primitives: Vec<Primitive>,
    #[serde(default)]
    pub pins: Vec<Pin>,
}

impl SymbolDef {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            bbox: None,
            primitives: Vec::new(),
            pins: Vec::new(),
        }
    }

    pub fn with_bbox(mut self, x: f64, y: f64, w: f64, h: f64) -> Self {
        self.bbox = Some(BBox::new(x, y, w, h));
        self
    }

    pub fn with_pin(mut self, pin: Pin) -> Self {
        self.pins.push(pin);
        self
    }

    pub fn with_primitive(mut self, primitive: Primitive) -> Self {
        self.primitives.push(primitive);
        self
    }

    pub fn pin(&self, name: &str) -> Option<&Pin> {
        self.pins.iter().find(|p| p.name == name)
    }

    /// Declared bounding box, or one computed from the drawing when the
    /// declared box is missing or degenerate.
    pub fn body(&self) -> BBox {
        match self.bbox {
            Some(bb) if !bb.is_degenerate() => bb,
            _ => compute_symbol_bbox(self),
        }
    }

    /// Replace a missing or degenerate bbox with the computed one.
    pub fn ensure_bbox(&mut self) {
        if self.bbox.map_or(true, |bb| bb.is_degenerate()) {
            self.bbox = Some(compute_symbol_bbox(self));
        }
    }
}

/// Symbol lookup collaborator used by pin placement and obstacle extraction.
pub trait SymbolLookup: Send + Sync {
    /// Definition for a symbol kind, if known.
    fn symbol(&self, kind: &str) -> Option<&SymbolDef>;

    fn contains(&self, kind: &str) -> bool {
        self.symbol(kind).is_some()
    }
}

impl SymbolLookup for HashMap<String, SymbolDef> {
    fn symbol(&self, kind: &str) -> Option<&SymbolDef> {
        self.get(kind)
    }
}

/// Caller-owned symbol table.
#[derive(Debug, Clone, Default)]
pub struct SymbolCatalog {
    symbols: HashMap<String, SymbolDef>,
    builtin_ids: HashSet<String>,
}

impl SymbolCatalog {
    /// Empty catalog with no built-in symbols.
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog seeded with the built-in generic symbols.
    pub fn builtin() -> Self {
        let mut catalog = Self::new();
        for mut symbol in builtin_symbols() {
            symbol.ensure_bbox();
            catalog.builtin_ids.insert(symbol.id.clone());
            catalog.symbols.insert(symbol.id.clone(), symbol);
        }
        catalog
    }

    /// Add a symbol. Replacing an existing one needs `allow_overwrite`, and
    /// built-ins are only replaced that way too.
    pub fn register(&mut self, mut symbol: SymbolDef, allow_overwrite: bool) -> Result<(), SchemrouteError> {
        if !allow_overwrite {
            if self.builtin_ids.contains(&symbol.id) {
                return Err(SchemrouteError::Symbol(format!(
                    "cannot overwrite built-in symbol: {}",
                    symbol.id
                )));
            }
            if self.symbols.contains_key(&symbol.id) {
                return Err(SchemrouteError::Symbol(format!(
                    "symbol {} already exists",
                    symbol.id
                )));
            }
        }
        symbol.ensure_bbox();
        self.symbols.insert(symbol.id.clone(), symbol);
        Ok(())
    }

    /// Remove a user symbol. Built-ins stay.
    pub fn unregister(&mut self, id: &str) -> bool {
        if self.builtin_ids.contains(id) {
            tracing::warn!("Cannot remove built-in symbol: {}", id);
            return false;
        }
        self.symbols.remove(id).is_some()
    }

    /// Register every symbol of a JSON array; returns how many were added.
    ///
    /// Ids that already exist are skipped rather than treated as errors.
    pub fn load_json(&mut self, content: &str) -> Result<usize, SchemrouteError> {
        let defs: Vec<SymbolDef> = serde_json::from_str(content)?;
        let mut added = 0;
        for def in defs {
            if self.symbols.contains_key(&def.id) {
                tracing::debug!("Skipping symbol {}: already registered", def.id);
                continue;
            }
            self.register(def, false)?;
            added += 1;
        }
        Ok(added)
    }

    pub fn get(&self, id: &str) -> Option<&SymbolDef> {
        self.symbols.get(id)
    }

    pub fn is_builtin(&self, id: &str) -> bool {
        self.builtin_ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// All symbols sorted by id.
    pub fn symbols(&self) -> Vec<&SymbolDef> {
        let mut all: Vec<&SymbolDef> = self.symbols.values().collect();
        all.sort_by(|a, b| a.id.cmp(&b.id));
        all
    }
}

impl SymbolLookup for SymbolCatalog {
    fn symbol(&self, kind: &str) -> Option<&SymbolDef> {
        self.symbols.get(kind)
    }
}
