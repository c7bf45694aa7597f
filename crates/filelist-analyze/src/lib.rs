//! Duplicate grouping for filelist.
//!
//! Buckets a selected set of files by a grouping key and prints each
//! bucket followed by a separator line:
//!
//! - **By name** - files sharing a base name
//! - **By content** - files sharing a SHA-1 digest of their bytes, hashed
//!   in fixed-size chunks so memory use does not grow with file size
//!
//! ```rust,ignore
//! use filelist_analyze::DuplicateGrouper;
//! use filelist_core::{DuplicateMode, Stats};
//!
//! let grouper = DuplicateGrouper::new(DuplicateMode::Content);
//! let report = grouper.group(outcome.selected.sorted())?;
//!
//! let mut stats = Stats::new();
//! report.write_to(&mut std::io::stdout().lock(), &mut stats)?;
//! ```

mod duplicates;
mod error;

pub use duplicates::{
    BUCKET_SEPARATOR, BucketKey, ContentKey, DuplicateBucket, DuplicateGrouper, DuplicateReport,
    HASH_CHUNK_SIZE, KeyStrategy, NameKey, hash_file,
};
pub use error::AnalyzeError;

// Re-export core types
pub use filelist_core::{ContentHash, DuplicateMode, Stats};
