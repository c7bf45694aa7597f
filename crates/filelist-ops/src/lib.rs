//! Operations on a selected file set: zip archiving and deletion.

mod archive;
mod delete;
mod error;
mod naming;

pub use archive::{ArchiveEntry, ArchiveOptions, ArchiveOptionsBuilder, ArchiveSummary, archive_files};
pub use delete::delete_files;
pub use error::{ArchiveError, DeleteError};
pub use naming::EntryNamer;
