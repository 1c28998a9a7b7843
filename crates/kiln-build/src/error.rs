//! Error types for kiln-build.

use thiserror::Error;

/// Result type for kiln-build operations.
pub type Result<T> = std::result::Result<T, BuildError>;

/// Errors that can occur while loading a build manifest.
#[derive(Error, Debug)]
pub enum BuildError {
    /// Failed to read the manifest file.
    #[error("Failed to read manifest file: {0}")]
    ReadManifest(#[from] std::io::Error),

    /// Failed to parse a JSON manifest.
    #[error("Failed to parse JSON manifest: {0}")]
    ParseJson(#[from] serde_json::Error),

    /// Failed to parse a TOML manifest.
    #[error("Failed to parse TOML manifest: {0}")]
    ParseToml(#[from] toml::de::Error),
}
