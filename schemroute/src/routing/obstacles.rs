//! Obstacle boxes derived from placed instances.

use serde::Serialize;

use crate::geometry::Rect;
use crate::schematic::{Instance, SchematicDoc};
use crate::symbols::SymbolLookup;

/// Footprint assumed for symbols the lookup doesn't know.
pub const DEFAULT_OBSTACLE: Rect = Rect::new(-10.0, -10.0, 10.0, 10.0);

/// Canvas-space body of one instance, before any routing margin.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Obstacle {
    pub instance_id: String,
    pub rect: Rect,
}

impl Obstacle {
    pub fn new(instance_id: impl Into<String>, rect: Rect) -> Self {
        Self {
            instance_id: instance_id.into(),
            rect,
        }
    }
}

/// Rotated, translated body rectangle of an instance.
pub fn instance_rect(instance: &Instance, symbols: &dyn SymbolLookup) -> Rect {
    let local = match symbols.symbol(&instance.symbol_kind) {
        Some(symbol) => symbol.body().to_rect(),
        None => {
            tracing::warn!(
                "Unknown symbol kind {} on {}, using default obstacle",
                instance.symbol_kind,
                instance.id
            );
            DEFAULT_OBSTACLE
        }
    };
    local.rotated(instance.rotation).translated(instance.position)
}

/// Obstacles for every instance whose id is not in `exclude`.
pub fn obstacles_for(doc: &SchematicDoc, symbols: &dyn SymbolLookup, exclude: &[&str]) -> Vec<Obstacle> {
    doc.instances
        .iter()
        .filter(|inst| !exclude.contains(&inst.id.as_str()))
        .map(|inst| Obstacle::new(&inst.id, instance_rect(inst, symbols)))
        .collect()
}
