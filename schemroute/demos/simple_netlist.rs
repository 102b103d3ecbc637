//! Simple netlist example: extract nets from a schematic and print them.

use schemroute::prelude::*;
use std::path::Path;

fn main() -> Result<(), SchemrouteError> {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "tests/fixtures/divider.json".to_string());
    let path = Path::new(&path);

    if !path.exists() {
        eprintln!("File not found: {}", path.display());
        eprintln!("Usage: cargo run --example simple_netlist [path/to/schematic.json]");
        std::process::exit(1);
    }

    let doc = schemroute::load_document(path)?;
    let netlist = NetExtractor::extract(&doc);

    println!("Components ({}):", netlist.components.len());
    for comp in &netlist.components {
        match &comp.net_label {
            Some(label) => println!("  {:<6} {} [{}]", comp.reference, comp.symbol_kind, label),
            None => println!("  {:<6} {}", comp.reference, comp.symbol_kind),
        }
    }

    println!("\nNets ({}):", netlist.nets.len());
    for net in &netlist.nets {
        let nodes: Vec<String> = net.nodes.iter().map(|n| format!("{}:{}", n.reference, n.pin)).collect();
        println!("  {:<8} {}", net.name, nodes.join(", "));
    }

    Ok(())
}
