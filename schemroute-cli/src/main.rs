//! Schemroute CLI - schematic netlist extraction and wire routing from the command line.

use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use schemroute::{
    check_document, export_circuit_json, load_catalog, load_document, route_all, route_wire,
    NetExtractor, Netlist, RouteOptions, Severity, SymbolCatalog, SymbolDef, ValidationReport,
    WireRoute, DEFAULT_ROUTE_MARGIN,
};
use std::path::{Path, PathBuf};
use std::process;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "schemroute")]
#[command(about = "Schematic netlist extraction and orthogonal wire routing", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the netlist of a schematic document
    Netlist {
        /// Path to a schematic JSON document
        #[arg(value_name = "DOC")]
        file: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "human")]
        format: OutputFormat,
    },

    /// Route wires around the bodies of other symbols
    Route {
        /// Path to a schematic JSON document
        #[arg(value_name = "DOC")]
        file: PathBuf,

        /// Only route the wire with this id
        #[arg(long, value_name = "ID")]
        wire: Option<String>,

        /// Clearance kept around every symbol body
        #[arg(short, long, default_value_t = DEFAULT_ROUTE_MARGIN)]
        margin: f64,

        /// Extra symbol library (JSON array of symbol definitions)
        #[arg(long, value_name = "FILE")]
        symbols: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "human")]
        format: OutputFormat,
    },

    /// Check a document, its symbols and its netlist for problems
    Check {
        /// Path to a schematic JSON document
        #[arg(value_name = "DOC")]
        file: PathBuf,

        /// Extra symbol library (JSON array of symbol definitions)
        #[arg(long, value_name = "FILE")]
        symbols: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "human")]
        format: OutputFormat,

        /// Exit with error code if findings exist at this severity or higher
        #[arg(long, value_enum)]
        fail_on: Option<FailOnSeverity>,
    },

    /// List the built-in symbol catalog
    Symbols {
        /// Show pins and body size of every symbol
        #[arg(short, long)]
        verbose: bool,
    },
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output for tools
    Json,
}

#[derive(Clone, ValueEnum)]
enum FailOnSeverity {
    Error,
    Warning,
}

impl FailOnSeverity {
    fn threshold(&self) -> Severity {
        match self {
            FailOnSeverity::Error => Severity::Error,
            FailOnSeverity::Warning => Severity::Warning,
        }
    }
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    let exit_code = match cli.command {
        Commands::Netlist { file, format } => handle_netlist(&file, format),
        Commands::Route {
            file,
            wire,
            margin,
            symbols,
            format,
        } => handle_route(&file, wire.as_deref(), margin, symbols.as_deref(), format),
        Commands::Check {
            file,
            symbols,
            format,
            fail_on,
        } => handle_check(&file, symbols.as_deref(), format, fail_on),
        Commands::Symbols { verbose } => {
            handle_symbols(verbose);
            0
        }
    };

    process::exit(exit_code);
}

/// Log to stderr; `RUST_LOG` overrides the default `warn` level.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn report_error(result: Result<i32>) -> i32 {
    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            1
        }
    }
}

fn load(file: &Path) -> Result<schemroute::SchematicDoc> {
    load_document(file).with_context(|| format!("cannot load {}", file.display()))
}

fn load_symbols(symbols: Option<&Path>) -> Result<SymbolCatalog> {
    load_catalog(symbols).context("cannot load symbol library")
}

fn handle_netlist(file: &Path, format: OutputFormat) -> i32 {
    report_error(run_netlist(file, format))
}

fn run_netlist(file: &Path, format: OutputFormat) -> Result<i32> {
    let doc = load(file)?;
    match format {
        OutputFormat::Human => output_netlist_human(&NetExtractor::extract(&doc)),
        OutputFormat::Json => println!("{}", export_circuit_json(&doc)?),
    }
    Ok(0)
}

fn output_netlist_human(netlist: &Netlist) {
    println!("Components ({}):", netlist.components.len());
    for comp in &netlist.components {
        match &comp.net_label {
            Some(label) => println!("  {:<8} {} [{}]", comp.reference, comp.symbol_kind, label),
            None => println!("  {:<8} {}", comp.reference, comp.symbol_kind),
        }
    }

    println!("\nNets ({}):", netlist.nets.len());
    if netlist.nets.is_empty() {
        println!("  No connected nets");
    }
    for net in &netlist.nets {
        let nodes: Vec<String> = net
            .nodes
            .iter()
            .map(|n| format!("{}:{}", n.reference, n.pin))
            .collect();
        println!("  {:<10} {}", net.name, nodes.join(", "));
    }
}

fn handle_route(
    file: &Path,
    wire: Option<&str>,
    margin: f64,
    symbols: Option<&Path>,
    format: OutputFormat,
) -> i32 {
    report_error(run_route(file, wire, margin, symbols, format))
}

fn run_route(
    file: &Path,
    wire: Option<&str>,
    margin: f64,
    symbols: Option<&Path>,
    format: OutputFormat,
) -> Result<i32> {
    if !(margin >= 0.0) {
        bail!("margin must be a non-negative number, got {}", margin);
    }
    let doc = load(file)?;
    let catalog = load_symbols(symbols)?;
    let options = RouteOptions::with_margin(margin);

    let routes = match wire {
        Some(id) => {
            let wire = doc.wire(id).ok_or_else(|| anyhow!("no wire with id '{}'", id))?;
            let points = route_wire(wire, &doc, &catalog, &options)
                .ok_or_else(|| anyhow!("wire '{}' has an endpoint that cannot be resolved", id))?;
            vec![WireRoute {
                wire_id: wire.id.clone(),
                points,
            }]
        }
        None => route_all(&doc, &catalog, &options),
    };

    match format {
        OutputFormat::Human => output_routes_human(&routes),
        OutputFormat::Json => {
            let output = serde_json::json!({
                "margin": margin,
                "routes": routes,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }
    Ok(0)
}

fn output_routes_human(routes: &[WireRoute]) {
    if routes.is_empty() {
        println!("No routable wires");
        return;
    }
    for route in routes {
        let points: Vec<String> = route.points.iter().map(|p| p.to_string()).collect();
        println!("{}: {}", route.wire_id, points.join(" -> "));
    }
}

fn handle_check(
    file: &Path,
    symbols: Option<&Path>,
    format: OutputFormat,
    fail_on: Option<FailOnSeverity>,
) -> i32 {
    report_error(run_check(file, symbols, format, fail_on))
}

fn run_check(
    file: &Path,
    symbols: Option<&Path>,
    format: OutputFormat,
    fail_on: Option<FailOnSeverity>,
) -> Result<i32> {
    let doc = load(file)?;
    let catalog = load_symbols(symbols)?;
    let report = check_document(&doc, &catalog);

    match format {
        OutputFormat::Human => output_check_human(file, &report),
        OutputFormat::Json => output_check_json(file, &report)?,
    }

    if let Some(severity) = fail_on {
        if report.has_at_least(severity.threshold()) {
            return Ok(1);
        }
    }
    Ok(0)
}

fn output_check_human(file: &Path, report: &ValidationReport) {
    println!("\nFile: {}", file.display());
    println!("{}", "─".repeat(60));
    for line in report.to_string().lines() {
        println!("  {}", line);
    }

    println!("\n  Summary:");
    println!("    Errors:   {}", report.errors());
    println!("    Warnings: {}", report.warnings());
    println!("    Info:     {}", report.infos());
}

fn output_check_json(file: &Path, report: &ValidationReport) -> Result<()> {
    let output = serde_json::json!({
        "file": file.display().to_string(),
        "valid": report.is_valid(),
        "issues": report.issues,
        "stats": {
            "error": report.errors(),
            "warning": report.warnings(),
            "info": report.infos(),
        }
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn handle_symbols(verbose: bool) {
    let catalog = SymbolCatalog::builtin();
    println!("Built-in symbols ({}):\n", catalog.len());

    for symbol in catalog.symbols() {
        println!("  {}", symbol.id);
        if verbose {
            describe_symbol(symbol);
            println!();
        }
    }
}

fn describe_symbol(symbol: &SymbolDef) {
    let body = symbol.body();
    println!("    body: {} x {} at ({}, {})", body.w, body.h, body.x, body.y);
    let pins: Vec<&str> = symbol.pins.iter().map(|p| p.name.as_str()).collect();
    println!("    pins: {}", pins.join(", "));
}
