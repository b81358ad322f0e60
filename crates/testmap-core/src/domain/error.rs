//! Error taxonomy for configuration, arbitration, and corpus mapping.
//!
//! Resolution of a single test against a single component never fails;
//! these errors only come from the layers around it.

use std::path::PathBuf;

/// Errors produced by the mapping layer.
#[derive(Debug, thiserror::Error)]
pub enum MappingError {
    #[error("io error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid TOML in {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("unsupported config format: {0} (expected .json or .toml)")]
    UnsupportedFormat(PathBuf),

    #[error("invalid component {component}: {reason}")]
    InvalidComponent { component: String, reason: String },

    #[error("duplicate component name: {0}")]
    DuplicateComponent(String),

    #[error("test {test} has ambiguous ownership between {components:?}")]
    AmbiguousOwnership {
        test: String,
        components: Vec<String>,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("mapping worker failed: {0}")]
    Worker(String),
}

/// Result type for mapping operations.
pub type Result<T> = std::result::Result<T, MappingError>;
