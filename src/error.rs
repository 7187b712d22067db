//! Error type shared by the loader, renderer and generation entry points.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for schema-viz
#[derive(Error, Debug)]
pub enum VizError {
    /// A bundled or overridden asset payload could not be read
    #[error("Asset missing: {name} ({path}): {source}")]
    AssetMissing {
        name: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The schema graph could not be resolved from its source directory
    #[error("Schema load failed for {path}: {message}")]
    SchemaLoad { path: PathBuf, message: String },

    /// Generation config file is unreadable or invalid
    #[error("Configuration error in {path}: {message}")]
    Config { path: PathBuf, message: String },

    /// The HTML template does not define its slots correctly
    #[error("Template error: {0}")]
    Template(String),

    /// Graph-to-JSON encoding failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The output file could not be written
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The page server could not bind or stopped with an I/O error
    #[error("Failed to serve on {addr}: {source}")]
    Serve {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    /// Failure reported by a wrapped generator
    #[error("{0}")]
    Generator(String),
}

impl VizError {
    pub(crate) fn schema_load(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        VizError::SchemaLoad {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Convenient Result type using VizError
pub type Result<T> = std::result::Result<T, VizError>;
