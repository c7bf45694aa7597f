//! Error types shared across the filelist crates.

use std::path::PathBuf;

use thiserror::Error;

use crate::options::OptionName;

/// Errors in the shape of the command line itself.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum OptionError {
    /// An option was given more than once.
    #[error("Option {option} was specified more than once")]
    Repeated { option: OptionName },

    /// An option that takes a value was the last argument.
    #[error("Option {option} expects a value")]
    MissingValue { option: OptionName },

    /// `-duplcont` and `-duplname` together.
    #[error("-duplcont and -duplname cannot be combined")]
    BothDuplicateModes,

    /// `-nofilelist` with a duplicate mode.
    #[error("-nofilelist cannot be combined with a duplicate report")]
    NoListingWithDuplicates,

    /// A duplicate mode with `-delete` or `-zip`.
    #[error("Duplicate reports cannot be combined with -delete or -zip")]
    DuplicatesWithOperation,

    /// `-delete` and `-zip` together.
    #[error("-delete and -zip cannot be combined")]
    DeleteWithArchive,
}

/// Errors turning an option value into a typed selector.
#[derive(Debug, Error)]
pub enum SelectorError {
    /// Not a `YYYYMMDD` or `YYYYMMDDTHHMMSS` timestamp.
    #[error("Invalid timestamp for {option}: {value:?}")]
    InvalidTimestamp {
        option: OptionName,
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    /// Not a non-negative number with an optional k/m/g suffix.
    #[error("Invalid size for {option}: {value:?}")]
    InvalidSize { option: OptionName, value: String },

    /// Not a valid regular expression.
    #[error("Invalid pattern {value:?}: {source}")]
    InvalidPattern {
        value: String,
        #[source]
        source: regex::Error,
    },
}

/// Errors that can occur during traversal.
#[derive(Debug, Error)]
pub enum ScanError {
    /// Permission denied for a path.
    #[error("Permission denied: {path}")]
    PermissionDenied { path: PathBuf },

    /// Path not found.
    #[error("Path not found: {path}")]
    NotFound { path: PathBuf },

    /// Generic I/O error.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// One or more roots are missing or not directories.
    #[error("Not a directory: {}", display_paths(.paths))]
    InvalidRoots { paths: Vec<PathBuf> },

    /// Writing the listing failed.
    #[error("Failed to write listing: {0}")]
    Output(#[source] std::io::Error),
}

impl ScanError {
    /// Create an I/O error with path context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied { path },
            std::io::ErrorKind::NotFound => Self::NotFound { path },
            _ => Self::Io { path, source },
        }
    }
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
