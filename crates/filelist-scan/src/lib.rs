//! Filesystem traversal for filelist.
//!
//! `filelist-scan` walks one or more directory trees breadth-first and
//! applies a [`SelectorSet`] to every regular file it finds. Key features:
//!
//! - **Visitation ledger** so symlinked directories and repeated roots are
//!   walked once
//! - **Immediate listing** of each selected path as it is discovered
//! - **Fail-fast** on any listing or stat error
//!
//! # Example
//!
//! ```rust,no_run
//! use filelist_core::SelectorSet;
//! use filelist_scan::{resolve_roots, walk_roots};
//!
//! let roots = resolve_roots(&["/path/to/scan"]).unwrap();
//! let selectors = SelectorSet::default();
//! let mut stdout = std::io::stdout().lock();
//!
//! let outcome = walk_roots(&roots, &selectors, true, &mut stdout).unwrap();
//! println!("Visited {} files", outcome.stats.files_visited);
//! ```

mod ledger;
mod roots;
mod walker;

pub use ledger::{LedgerTag, VisitLedger};
pub use roots::resolve_roots;
pub use walker::{WalkOutcome, Walker, walk_roots};

// Re-export core types for convenience
pub use filelist_core::{FileFacts, ScanError, SelectedSet, SelectorSet, Stats};
