//! Error types for kiln-driver.

use kiln_build::BuildError;
use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for kiln-driver operations.
pub type Result<T> = std::result::Result<T, DriverError>;

/// Errors from the build pipeline, one variant per stage.
///
/// A compiler that launches and then fails is not an error here; it
/// surfaces as a nonzero exit status from the run stage.
#[derive(Error, Diagnostic, Debug)]
pub enum DriverError {
    /// Manifest could not be loaded or parsed.
    #[error("{0}")]
    Config(#[from] BuildError),

    /// The script file could not be written.
    #[error("Failed to write build script {}: {}", .path.display(), .source)]
    WriteScript {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Execute permission could not be granted on the script.
    #[error("Failed to set execute permission on {}: {}", .path.display(), .source)]
    Permission {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The script could not be spawned at all.
    #[error("Failed to launch build script {}: {}", .path.display(), .source)]
    #[diagnostic(help("the generated script must exist and be executable"))]
    Launch {
        path: PathBuf,
        source: std::io::Error,
    },
}
