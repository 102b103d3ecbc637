//! Error type, options, and the file-loading entry points shared by the
//! library and the CLI. The engine computations themselves never fail.

use std::path::Path;

use crate::schematic::SchematicDoc;
use crate::symbols::SymbolCatalog;

#[derive(Debug, thiserror::Error)]
pub enum SchemrouteError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Unsupported schema version: {0}")]
    UnsupportedSchema(u32),
    #[error("Symbol error: {0}")]
    Symbol(String),
}

/// Clearance kept between a routed wire and foreign symbol bodies.
pub const DEFAULT_ROUTE_MARGIN: f64 = 15.0;

/// Options for routing runs (CLI or embedding editor).
#[derive(Clone, Debug, PartialEq)]
pub struct RouteOptions {
    /// Every obstacle box grows by this much on each side.
    pub margin: f64,
}

impl Default for RouteOptions {
    fn default() -> Self {
        Self {
            margin: DEFAULT_ROUTE_MARGIN,
        }
    }
}

impl RouteOptions {
    pub fn with_margin(margin: f64) -> Self {
        Self { margin }
    }
}

/// Read and parse a schematic document from disk.
pub fn load_document(path: &Path) -> Result<SchematicDoc, SchemrouteError> {
    let content = std::fs::read_to_string(path)?;
    let doc = SchematicDoc::from_json(&content)?;
    tracing::debug!(
        "Loaded {} with {} instances and {} wires",
        path.display(),
        doc.instances.len(),
        doc.wires.len()
    );
    Ok(doc)
}

/// Built-in catalog extended with the symbols of an optional JSON library.
pub fn load_catalog(library: Option<&Path>) -> Result<SymbolCatalog, SchemrouteError> {
    let mut catalog = SymbolCatalog::builtin();
    if let Some(path) = library {
        let content = std::fs::read_to_string(path)?;
        let added = catalog.load_json(&content)?;
        tracing::debug!("Loaded {} symbols from {}", added, path.display());
    }
    Ok(catalog)
}
