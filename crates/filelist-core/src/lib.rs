//! Core types for filelist.
//!
//! This crate holds everything that does not touch the filesystem: the
//! command line grammar and its mutual exclusions, the selector resolver,
//! the selection predicate, and the counters and sets a run accumulates.

mod error;
mod hash;
mod options;
mod resolve;
mod selected;
mod selector;
mod stats;

pub use error::{OptionError, ScanError, SelectorError};
pub use hash::ContentHash;
pub use options::{
    CommandLine, CommandPlan, DuplicateMode, Operation, OptionName, OutputModes, RawSelectors,
};
pub use resolve::{
    DATE_FORMAT, DATETIME_FORMAT, DATETIME_LEN, compile_pattern, parse_size, parse_timestamp,
};
pub use selected::SelectedSet;
pub use selector::{
    FileFacts, NamePattern, SelectorSet, SelectorSetBuilder, SizeBound, TimeBound, TimePrecision,
};
pub use stats::Stats;
