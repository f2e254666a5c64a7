//! Error types for supervisor operations

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading or validating a configuration document.
///
/// Every variant names the field or path that failed, so a rejected reload
/// can be logged with enough detail to fix the file. Per-entry removal
/// failures are not errors; they are carried in the sweep report.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration file could not be read
    #[error("failed to read configuration file {}: {}", path.display(), source)]
    Io {
        /// Path of the configuration file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Configuration file is not valid JSON
    #[error("configuration file is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// A required top-level field is absent
    #[error("configuration does not contain the '{0}' field")]
    MissingField(&'static str),

    /// A path entry is missing one of its required fields
    #[error("path entry {index} does not contain the '{field}' field")]
    MissingEntryField {
        /// Zero-based index of the entry in the `paths` array
        index: usize,
        /// Name of the absent field
        field: &'static str,
    },

    /// An interval field holds a negative value
    #[error("the '{0}' field has an invalid value (must be a non-negative integer)")]
    NegativeInterval(String),

    /// A watched path does not exist on the filesystem
    #[error("the 'path' field has an invalid value (no such path: {})", .0.display())]
    PathNotFound(PathBuf),
}

/// Errors that stop the supervisor from running at all.
#[derive(Debug, Error)]
pub enum SupervisorError {
    /// No valid configuration could be obtained at startup
    #[error("no valid configuration at startup: {0}")]
    Startup(#[from] ConfigError),
}
