//! Error types for duplicate analysis.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while grouping or reporting duplicates.
#[derive(Debug, Error)]
pub enum AnalyzeError {
    /// Reading or statting a file failed.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Writing the report failed.
    #[error("Failed to write duplicate report: {0}")]
    Output(#[source] std::io::Error),
}

impl AnalyzeError {
    /// Create an I/O error with path context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
