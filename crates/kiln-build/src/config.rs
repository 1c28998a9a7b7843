//! Build manifest types (compile_command.json format).

use serde::{Deserialize, Serialize};
use std::path::Path;

/// A declarative build description for a single executable.
///
/// Every field is required: a manifest that omits `programs` or `modules`
/// fails deserialization with a missing-field error rather than falling
/// back to an empty list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildSpec {
    /// Path of the primary entry source file.
    pub main: String,

    /// Additional top-level source files, in compilation order.
    pub programs: Vec<String>,

    /// Supporting source files, in compilation order.
    pub modules: Vec<String>,

    /// Path/name of the produced executable.
    pub output: String,
}

impl BuildSpec {
    /// Load a manifest from a file, picking the parser by extension.
    ///
    /// `.toml` parses as TOML; everything else as JSON.
    pub fn from_file(path: &Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Self::from_toml_str(&content),
            _ => Self::from_json_str(&content),
        }
    }

    /// Parse a manifest from a JSON string.
    pub fn from_json_str(json: &str) -> crate::Result<Self> {
        let spec: BuildSpec = serde_json::from_str(json)?;
        Ok(spec)
    }

    /// Parse a manifest from a TOML string.
    pub fn from_toml_str(toml: &str) -> crate::Result<Self> {
        let spec: BuildSpec = toml::from_str(toml)?;
        Ok(spec)
    }

    /// Total number of source paths named by the manifest.
    pub fn source_count(&self) -> usize {
        1 + self.programs.len() + self.modules.len()
    }
}
