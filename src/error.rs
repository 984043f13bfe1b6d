//! Error types for combining schema collections

use std::path::PathBuf;

use thiserror::Error;

/// Result type for collection operations
pub type Result<T> = std::result::Result<T, SchemaError>;

/// Schema collection errors
#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("expected list of schemas")]
    EmptyInput,

    #[error("expected same schema titles, got {titles:?}")]
    TitleMismatch { titles: Vec<String> },

    #[error("Name collision: {name} is defined more than once")]
    Collision { name: String },

    #[error("Schema not found: {name} version {version}")]
    NotFound { name: String, version: String },

    #[error("Invalid version: {0}")]
    InvalidVersion(String),

    #[error("Failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Semver error: {0}")]
    Semver(#[from] semver::Error),
}
