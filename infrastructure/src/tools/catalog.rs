//! Tool catalog loading
//!
//! The catalog is a read-only JSON document:
//!
//! ```json
//! { "tools": [ { "type": "function", "function": { "name": "...", "description": "...", "parameters": { } } } ] }
//! ```

use pcai_domain::ToolDefinition;
use serde::Deserialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

/// Default catalog location, relative to the working directory.
pub const DEFAULT_CATALOG_PATH: &str = "Config/pcai-tools.json";

/// Errors that can occur while loading a catalog.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read tool catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid tool catalog {origin}: {source}")]
    Parse {
        origin: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    tools: Vec<ToolDefinition>,
}

/// Loader for tool catalogs.
pub struct ToolCatalog;

impl ToolCatalog {
    /// Load tool definitions from a catalog file.
    pub fn load(path: &Path) -> Result<Vec<ToolDefinition>, CatalogError> {
        let text = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text, &path.display().to_string())
    }

    /// Parse catalog JSON. Duplicate names keep the first definition.
    pub fn parse(text: &str, origin: &str) -> Result<Vec<ToolDefinition>, CatalogError> {
        let file: CatalogFile = serde_json::from_str(text).map_err(|source| CatalogError::Parse {
            origin: origin.to_string(),
            source,
        })?;

        let mut seen = HashSet::new();
        let mut tools = Vec::with_capacity(file.tools.len());
        for tool in file.tools {
            if seen.insert(tool.name().to_string()) {
                tools.push(tool);
            } else {
                warn!(tool = tool.name(), catalog = origin, "Duplicate tool definition ignored");
            }
        }
        debug!(count = tools.len(), catalog = origin, "Loaded tool catalog");
        Ok(tools)
    }
}
