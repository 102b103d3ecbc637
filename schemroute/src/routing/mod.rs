//! Obstacle-avoiding wire routing.
//!
//! [`router`] works on bare points and rectangles; the functions here resolve
//! wires of a [`SchematicDoc`] to pin positions and obstacle sets first.

pub mod obstacles;
pub mod router;

pub use obstacles::{instance_rect, obstacles_for, Obstacle, DEFAULT_OBSTACLE};
pub use router::{compress_collinear, fallback_route, route, OrthogonalRouter};

use serde::Serialize;

use crate::core::RouteOptions;
use crate::geometry::Point;
use crate::schematic::{pin_position, SchematicDoc, Wire};
use crate::symbols::SymbolLookup;

/// Routed polyline of one wire.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WireRoute {
    pub wire_id: String,
    pub points: Vec<Point>,
}

/// Route one wire between its resolved pin positions.
///
/// The instances the wire connects are not treated as obstacles. Returns
/// `None` when either endpoint can't be resolved to a pin.
pub fn route_wire(
    wire: &Wire,
    doc: &SchematicDoc,
    symbols: &dyn SymbolLookup,
    options: &RouteOptions,
) -> Option<Vec<Point>> {
    let Some(start) = pin_position(&wire.endpoint_a, doc, symbols) else {
        tracing::warn!("Wire {}: cannot resolve endpoint {}", wire.id, wire.endpoint_a.key());
        return None;
    };
    let Some(end) = pin_position(&wire.endpoint_b, doc, symbols) else {
        tracing::warn!("Wire {}: cannot resolve endpoint {}", wire.id, wire.endpoint_b.key());
        return None;
    };

    let exclude = [
        wire.endpoint_a.instance_id.as_str(),
        wire.endpoint_b.instance_id.as_str(),
    ];
    let obstacles = obstacles_for(doc, symbols, &exclude);
    Some(OrthogonalRouter::from_options(options).route(start, end, &obstacles))
}

/// Route every resolvable wire, in document order.
pub fn route_all(doc: &SchematicDoc, symbols: &dyn SymbolLookup, options: &RouteOptions) -> Vec<WireRoute> {
    doc.wires
        .iter()
        .filter_map(|wire| {
            route_wire(wire, doc, symbols, options).map(|points| WireRoute {
                wire_id: wire.id.clone(),
                points,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schematic::{Instance, WireEndpoint};
    use crate::symbols::SymbolCatalog;

    fn divider() -> SchematicDoc {
        let mut doc = SchematicDoc::new();
        doc.add_instance(Instance::new("r1", "resistor", Point::new(0.0, 0.0)))
            .add_instance(Instance::new("r2", "resistor", Point::new(130.0, 0.0)))
            .add_wire(Wire::new("w1", WireEndpoint::new("r1", "2"), WireEndpoint::new("r2", "1")));
        doc
    }

    #[test]
    fn test_own_instances_do_not_block() {
        let doc = divider();
        let catalog = SymbolCatalog::builtin();
        let points = route_wire(&doc.wires[0], &doc, &catalog, &RouteOptions::default()).unwrap();
        assert_eq!(points, vec![Point::new(30.0, 0.0), Point::new(100.0, 0.0)]);
    }

    #[test]
    fn test_detours_around_third_instance() {
        let mut doc = divider();
        doc.add_instance(Instance::new("c1", "capacitor", Point::new(65.0, 0.0)));
        let catalog = SymbolCatalog::builtin();

        let points = route_wire(&doc.wires[0], &doc, &catalog, &RouteOptions::default()).unwrap();
        assert_eq!(points.len(), 4);
        assert_eq!(points[0], Point::new(30.0, 0.0));
        assert_eq!(points[3], Point::new(100.0, 0.0));
        assert_eq!(points[1].y.abs(), 30.0);
        assert_eq!(points[1].y, points[2].y);
    }

    #[test]
    fn test_unresolvable_wire_is_skipped() {
        let mut doc = divider();
        doc.add_wire(Wire::new("w2", WireEndpoint::new("r1", "1"), WireEndpoint::new("ghost", "1")));
        let catalog = SymbolCatalog::builtin();

        assert!(route_wire(&doc.wires[1], &doc, &catalog, &RouteOptions::default()).is_none());
        let routes = route_all(&doc, &catalog, &RouteOptions::default());
        assert_eq!(routes.len(), 1);
        assert_eq!(routes[0].wire_id, "w1");
    }
}
