//! Build a small schematic in code and route its wires.

use schemroute::prelude::*;
use schemroute::route_all;

fn main() {
    let mut doc = SchematicDoc::new();
    doc.add_instance(Instance::new("r1", "resistor", Point::new(0.0, 0.0)))
        .add_instance(Instance::new("r2", "resistor", Point::new(130.0, 0.0)))
        .add_instance(Instance::new("c1", "capacitor", Point::new(65.0, 0.0)))
        .add_instance(Instance::new("gnd", "GND", Point::new(65.0, 90.0)))
        .add_wire(Wire::connect(WireEndpoint::new("r1", "2"), WireEndpoint::new("r2", "1")))
        .add_wire(Wire::connect(WireEndpoint::new("c1", "2"), WireEndpoint::new("gnd", "GND")));

    let catalog = SymbolCatalog::builtin();
    let options = RouteOptions::default();

    for route in route_all(&doc, &catalog, &options) {
        let points: Vec<String> = route.points.iter().map(|p| p.to_string()).collect();
        println!("{}: {}", route.wire_id, points.join(" -> "));
    }
}
