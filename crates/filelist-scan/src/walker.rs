//! Breadth-first selection walker.

use std::collections::VecDeque;
use std::fs::{self, DirEntry, Metadata};
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use filelist_core::{FileFacts, ScanError, SelectedSet, SelectorSet, Stats};

use crate::ledger::{LedgerTag, VisitLedger};

/// Everything a walk produced.
#[derive(Debug)]
pub struct WalkOutcome {
    /// Files that passed every selector.
    pub selected: SelectedSet,
    /// Visited and listed counters.
    pub stats: Stats,
    /// Every path entered or examined.
    pub ledger: VisitLedger,
}

/// Walks directory trees breadth-first, selecting files as it goes.
///
/// One walker is shared across all roots of a run, so a file reachable from
/// two roots is examined and counted once. Filesystem errors are fatal: a
/// directory that cannot be listed or a file that cannot be statted aborts
/// the walk rather than silently shrinking the selection.
pub struct Walker<'a> {
    selectors: &'a SelectorSet,
    listing: bool,
    ledger: VisitLedger,
    selected: SelectedSet,
    stats: Stats,
}

impl<'a> Walker<'a> {
    /// Create a walker. With `listing` set, each selected path is written
    /// out the moment it is found.
    pub fn new(selectors: &'a SelectorSet, listing: bool) -> Self {
        Self {
            selectors,
            listing,
            ledger: VisitLedger::new(),
            selected: SelectedSet::new(),
            stats: Stats::new(),
        }
    }

    /// Walk one root, writing listed paths to `out`, one per line.
    ///
    /// A root already in the ledger (a repeated root, or one nested inside
    /// an earlier root) is skipped.
    pub fn walk<W: Write + ?Sized>(&mut self, root: &Path, out: &mut W) -> Result<(), ScanError> {
        if !self.ledger.mark(root.to_path_buf(), LedgerTag::Directory) {
            debug!(root = %root.display(), "root already visited");
            return Ok(());
        }

        let mut queue = VecDeque::from([root.to_path_buf()]);

        while let Some(dir) = queue.pop_front() {
            debug!(dir = %dir.display(), "listing directory");

            for entry in read_sorted(&dir)? {
                let path = entry.path();
                if self.ledger.contains(&path) {
                    continue;
                }

                let metadata = match fs::metadata(&path) {
                    Ok(metadata) => metadata,
                    Err(err) if is_symlink(&entry) => {
                        warn!(path = %path.display(), error = %err, "skipping unresolvable symlink");
                        continue;
                    }
                    Err(err) => return Err(ScanError::io(&path, err)),
                };

                if metadata.is_dir() {
                    self.enter_directory(&entry, path, &mut queue)?;
                } else if metadata.is_file() {
                    self.examine_file(&entry, path, &metadata, out)?;
                }
            }
        }

        Ok(())
    }

    fn enter_directory(
        &mut self,
        entry: &DirEntry,
        path: PathBuf,
        queue: &mut VecDeque<PathBuf>,
    ) -> Result<(), ScanError> {
        let path = if is_symlink(entry) {
            fs::canonicalize(&path).map_err(|e| ScanError::io(&path, e))?
        } else {
            path
        };

        if self.ledger.mark(path.clone(), LedgerTag::Directory) {
            queue.push_back(path);
        } else {
            debug!(dir = %path.display(), "directory already visited");
        }

        Ok(())
    }

    fn examine_file<W: Write + ?Sized>(
        &mut self,
        entry: &DirEntry,
        path: PathBuf,
        metadata: &Metadata,
        out: &mut W,
    ) -> Result<(), ScanError> {
        self.ledger.mark(path.clone(), LedgerTag::File);

        let size = metadata.len();
        self.stats.record_visit(size);

        let facts = FileFacts::from_metadata(metadata).map_err(|e| ScanError::io(&path, e))?;
        let name = entry.file_name();

        if !self.selectors.select(&name.to_string_lossy(), &facts) {
            return Ok(());
        }

        if self.listing {
            self.stats.record_listed(size);
            writeln!(out, "{}", path.display()).map_err(ScanError::Output)?;
        }

        self.selected.insert(path);
        Ok(())
    }

    /// Current counters.
    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    /// Consume the walker and return what it collected.
    pub fn finish(self) -> WalkOutcome {
        WalkOutcome {
            selected: self.selected,
            stats: self.stats,
            ledger: self.ledger,
        }
    }
}

/// Walk every root with one shared ledger.
pub fn walk_roots<W: Write + ?Sized>(
    roots: &[PathBuf],
    selectors: &SelectorSet,
    listing: bool,
    out: &mut W,
) -> Result<WalkOutcome, ScanError> {
    let mut walker = Walker::new(selectors, listing);
    for root in roots {
        walker.walk(root, out)?;
    }
    out.flush().map_err(ScanError::Output)?;
    Ok(walker.finish())
}

/// Directory entries in byte-wise name order.
fn read_sorted(dir: &Path) -> Result<Vec<DirEntry>, ScanError> {
    let mut entries = fs::read_dir(dir)
        .and_then(|entries| entries.collect::<Result<Vec<_>, _>>())
        .map_err(|e| ScanError::io(dir, e))?;
    entries.sort_by_key(DirEntry::file_name);
    Ok(entries)
}

fn is_symlink(entry: &DirEntry) -> bool {
    entry.file_type().is_ok_and(|t| t.is_symlink())
}
