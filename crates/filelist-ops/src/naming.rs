//! Collision-free entry names for a flat archive.

use std::collections::HashSet;

/// Hands out unique entry names within one archive.
///
/// The first file called `name` keeps it; later ones become `(1) name`,
/// `(2) name`, ... skipping any candidate already handed out.
#[derive(Debug, Default)]
pub struct EntryNamer {
    written: HashSet<String>,
}

impl EntryNamer {
    /// Create a namer with no names taken.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve and return a unique name derived from `name`.
    pub fn claim(&mut self, name: &str) -> String {
        let mut candidate = name.to_string();
        let mut counter = 0u64;

        while self.written.contains(&candidate) {
            counter += 1;
            candidate = format!("({counter}) {name}");
        }

        self.written.insert(candidate.clone());
        candidate
    }

    /// Number of names handed out.
    pub fn len(&self) -> usize {
        self.written.len()
    }

    /// Check if no name has been handed out.
    pub fn is_empty(&self) -> bool {
        self.written.is_empty()
    }
}
