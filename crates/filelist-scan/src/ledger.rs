//! Visitation ledger for loop-free traversal.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// What a ledger entry was when it was first seen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedgerTag {
    Directory,
    File,
}

/// Records every path a walk has entered or examined.
///
/// Each path is marked once, before it is queued or filtered. Symlinked
/// directories are marked under their canonical path, so a tree reachable
/// through several links is walked only once.
#[derive(Debug, Default)]
pub struct VisitLedger {
    entries: HashMap<PathBuf, LedgerTag>,
}

impl VisitLedger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a path. Returns `true` if this is the first time seeing it.
    ///
    /// Marking an already-known path is a no-op and keeps its original tag.
    pub fn mark(&mut self, path: PathBuf, tag: LedgerTag) -> bool {
        match self.entries.entry(path) {
            std::collections::hash_map::Entry::Occupied(_) => false,
            std::collections::hash_map::Entry::Vacant(slot) => {
                slot.insert(tag);
                true
            }
        }
    }

    /// Check if a path has been seen (without marking).
    pub fn contains(&self, path: &Path) -> bool {
        self.entries.contains_key(path)
    }

    /// The tag a path was first marked with.
    pub fn tag(&self, path: &Path) -> Option<LedgerTag> {
        self.entries.get(path).copied()
    }

    /// Number of directories marked.
    pub fn directory_count(&self) -> usize {
        self.entries
            .values()
            .filter(|tag| **tag == LedgerTag::Directory)
            .count()
    }

    /// Get the number of paths marked.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if nothing has been marked.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
