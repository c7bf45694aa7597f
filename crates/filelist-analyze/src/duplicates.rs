//! Duplicate grouping by base name or content digest.
//!
//! The grouping key is computed by a [`KeyStrategy`] chosen once per run.
//! Buckets appear in the order their first member is fed in; members of a
//! bucket are always sorted by path.

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{ErrorKind, Read, Write};
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use sha1::{Digest, Sha1};
use tracing::debug;

use filelist_core::{ContentHash, DuplicateMode, Stats};

use crate::error::AnalyzeError;

/// Line printed after the members of every bucket.
pub const BUCKET_SEPARATOR: &str = "------";

/// Bytes read per chunk while hashing.
pub const HASH_CHUNK_SIZE: usize = 64 * 1024;

/// The value files are grouped by.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BucketKey {
    /// File base name.
    Name(OsString),
    /// SHA-1 of the file content.
    Digest(ContentHash),
}

/// Computes the grouping key for a file.
pub trait KeyStrategy {
    /// Which duplicate mode this strategy implements.
    fn mode(&self) -> DuplicateMode;

    /// Compute the key for one file.
    fn key(&self, path: &Path) -> Result<BucketKey, AnalyzeError>;
}

/// Groups by base name. Never touches the filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct NameKey;

impl KeyStrategy for NameKey {
    fn mode(&self) -> DuplicateMode {
        DuplicateMode::Name
    }

    fn key(&self, path: &Path) -> Result<BucketKey, AnalyzeError> {
        let name = path
            .file_name()
            .map(OsString::from)
            .unwrap_or_else(|| path.as_os_str().to_os_string());
        Ok(BucketKey::Name(name))
    }
}

/// Groups by SHA-1 of the full content.
#[derive(Debug, Clone, Copy)]
pub struct ContentKey {
    chunk_size: usize,
}

impl ContentKey {
    pub fn new() -> Self {
        Self {
            chunk_size: HASH_CHUNK_SIZE,
        }
    }
}

impl Default for ContentKey {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyStrategy for ContentKey {
    fn mode(&self) -> DuplicateMode {
        DuplicateMode::Content
    }

    fn key(&self, path: &Path) -> Result<BucketKey, AnalyzeError> {
        hash_file(path, self.chunk_size).map(BucketKey::Digest)
    }
}

/// Compute the SHA-1 of a file, reading `chunk_size` bytes at a time.
///
/// The file handle is closed before returning, on success or error.
pub fn hash_file(path: &Path, chunk_size: usize) -> Result<ContentHash, AnalyzeError> {
    let mut file = File::open(path).map_err(|e| AnalyzeError::io(path, e))?;
    let mut hasher = Sha1::new();
    let mut buffer = vec![0u8; chunk_size.max(1)];

    loop {
        let bytes_read = match file.read(&mut buffer) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(AnalyzeError::io(path, e)),
        };
        hasher.update(&buffer[..bytes_read]);
    }

    Ok(ContentHash::new(hasher.finalize().into()))
}

/// Files sharing one grouping key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateBucket {
    pub key: BucketKey,
    /// Member paths in lexicographic order.
    pub paths: Vec<PathBuf>,
}

impl DuplicateBucket {
    /// Get the number of files in this bucket.
    pub fn count(&self) -> usize {
        self.paths.len()
    }

    /// Whether more than one file shares the key.
    pub fn has_duplicates(&self) -> bool {
        self.paths.len() > 1
    }
}

/// Every bucket, singletons included.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DuplicateReport {
    pub buckets: Vec<DuplicateBucket>,
}

impl DuplicateReport {
    /// Check if any bucket holds more than one file.
    pub fn has_duplicates(&self) -> bool {
        self.buckets.iter().any(DuplicateBucket::has_duplicates)
    }

    /// Get total number of files across all buckets.
    pub fn total_files(&self) -> usize {
        self.buckets.iter().map(DuplicateBucket::count).sum()
    }

    /// Print every bucket's members followed by [`BUCKET_SEPARATOR`].
    ///
    /// Each printed path is counted in the "listed" counters of `stats`.
    pub fn write_to<W: Write + ?Sized>(
        &self,
        out: &mut W,
        stats: &mut Stats,
    ) -> Result<(), AnalyzeError> {
        for bucket in &self.buckets {
            for path in &bucket.paths {
                let size = fs::metadata(path)
                    .map_err(|e| AnalyzeError::io(path, e))?
                    .len();
                stats.record_listed(size);
                writeln!(out, "{}", path.display()).map_err(AnalyzeError::Output)?;
            }
            writeln!(out, "{BUCKET_SEPARATOR}").map_err(AnalyzeError::Output)?;
        }
        out.flush().map_err(AnalyzeError::Output)
    }
}

/// Buckets files with a fixed key strategy.
pub struct DuplicateGrouper {
    strategy: Box<dyn KeyStrategy>,
}

impl DuplicateGrouper {
    /// Create a grouper for the given mode.
    pub fn new(mode: DuplicateMode) -> Self {
        match mode {
            DuplicateMode::Name => Self::with_strategy(Box::new(NameKey)),
            DuplicateMode::Content => Self::with_strategy(Box::new(ContentKey::new())),
        }
    }

    /// Create a grouper with a custom strategy.
    pub fn with_strategy(strategy: Box<dyn KeyStrategy>) -> Self {
        Self { strategy }
    }

    /// The mode of the underlying strategy.
    pub fn mode(&self) -> DuplicateMode {
        self.strategy.mode()
    }

    /// Group `paths`. Buckets keep the order of their first member.
    pub fn group<'p, I>(&self, paths: I) -> Result<DuplicateReport, AnalyzeError>
    where
        I: IntoIterator<Item = &'p Path>,
    {
        let mut buckets: IndexMap<BucketKey, Vec<PathBuf>> = IndexMap::new();

        for path in paths {
            let key = self.strategy.key(path)?;
            buckets.entry(key).or_default().push(path.to_path_buf());
        }

        debug!(mode = %self.mode(), buckets = buckets.len(), "grouped files");

        let buckets = buckets
            .into_iter()
            .map(|(key, mut paths)| {
                paths.sort();
                DuplicateBucket { key, paths }
            })
            .collect();

        Ok(DuplicateReport { buckets })
    }
}
