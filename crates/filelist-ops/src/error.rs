//! Error types for archive and delete operations.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while writing an archive.
#[derive(Debug, Error)]
pub enum ArchiveError {
    /// Something already exists at the destination; nothing was written.
    #[error("Archive destination already exists: {path}")]
    DestinationExists { path: PathBuf },

    /// Reading a source file or writing the archive failed.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The zip container rejected an entry.
    #[error("Zip error: {0}")]
    Zip(#[from] zip::result::ZipError),
}

impl ArchiveError {
    /// Create an I/O error with path context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// A file could not be removed.
#[derive(Debug, Error)]
#[error("Failed to delete {path}: {source}")]
pub struct DeleteError {
    pub path: PathBuf,
    #[source]
    pub source: std::io::Error,
}
