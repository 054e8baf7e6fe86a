//! Error types for loading, rewriting and saving notebooks.

use std::path::PathBuf;

use thiserror::Error;

/// Fatal errors: the run stops before anything is written
#[derive(Error, Debug)]
pub enum RewriteError {
    #[error("Input notebook not found: {}", path.display())]
    InputNotFound { path: PathBuf },

    #[error("Malformed notebook: {reason}")]
    MalformedDocument { reason: String },

    #[error("I/O error on '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Refusing to overwrite the input notebook: {}", path.display())]
    OutputWouldOverwrite { path: PathBuf },

    #[error("Failed to serialize notebook: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl RewriteError {
    pub fn malformed(reason: impl Into<String>) -> Self {
        RewriteError::MalformedDocument {
            reason: reason.into(),
        }
    }
}

/// Problems with a single cell; the cell is left untouched
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CellError {
    #[error("cell is not a JSON object")]
    NotAnObject,

    #[error("cell has no string 'cell_type'")]
    MissingCellType,

    #[error("cell 'source' must be a string or a list of strings")]
    InvalidSource,
}
