//! The set of files that passed selection.

use std::path::{Path, PathBuf};

use indexmap::IndexSet;

/// Unique selected paths, kept in discovery order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectedSet {
    paths: IndexSet<PathBuf>,
}

impl SelectedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a path. Returns `false` if it was already selected.
    pub fn insert(&mut self, path: PathBuf) -> bool {
        self.paths.insert(path)
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.paths.contains(path)
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Paths in the order they were discovered.
    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        self.paths.iter().map(PathBuf::as_path)
    }

    /// Paths in lexicographic order.
    pub fn sorted(&self) -> Vec<&Path> {
        let mut paths: Vec<&Path> = self.iter().collect();
        paths.sort();
        paths
    }
}
