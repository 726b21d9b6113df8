//! Error types for the merge pipeline

use std::path::PathBuf;

use thiserror::Error;

/// Result type for merge operations
pub type Result<T> = std::result::Result<T, MergeError>;

/// Merge pipeline errors
///
/// Every variant is fatal: the run aborts on the first error and produces no
/// partial output, since a partially merged document would be silently
/// incorrect.
#[derive(Error, Debug)]
pub enum MergeError {
    #[error("IO error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in {path}: {source}")]
    Format {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("no package statement found in {path}")]
    MissingPackage { path: PathBuf },

    #[error("failed to serialize merged document: {0}")]
    Render(#[from] serde_json::Error),
}

impl MergeError {
    /// Wrap an IO failure with the path it occurred at.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
