//! Absolute pin positions of placed instances.

use serde::Serialize;

use super::types::{Instance, SchematicDoc, WireEndpoint};
use crate::geometry::Point;
use crate::symbols::SymbolLookup;

/// A pin resolved to canvas coordinates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AbsPin {
    pub instance_id: String,
    pub pin_name: String,
    pub position: Point,
}

/// All pins of an instance: rotated about the origin, then translated.
///
/// An instance of an unknown symbol kind has no pins.
pub fn abs_pins(instance: &Instance, symbols: &dyn SymbolLookup) -> Vec<AbsPin> {
    let Some(symbol) = symbols.symbol(&instance.symbol_kind) else {
        return Vec::new();
    };
    symbol
        .pins
        .iter()
        .map(|pin| {
            let rotated = instance.rotation.apply(pin.position);
            AbsPin {
                instance_id: instance.id.clone(),
                pin_name: pin.name.clone(),
                position: rotated.translate(instance.position.x, instance.position.y),
            }
        })
        .collect()
}

/// Canvas position of a wire endpoint, if both instance and pin exist.
pub fn pin_position(
    endpoint: &WireEndpoint,
    doc: &SchematicDoc,
    symbols: &dyn SymbolLookup,
) -> Option<Point> {
    let instance = doc.instance(&endpoint.instance_id)?;
    abs_pins(instance, symbols)
        .into_iter()
        .find(|pin| pin.pin_name == endpoint.pin_name)
        .map(|pin| pin.position)
}
