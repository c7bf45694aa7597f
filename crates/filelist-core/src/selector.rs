//! Typed selectors and the selection predicate.

use std::fs::Metadata;

use chrono::{DateTime, Local, NaiveDateTime, NaiveTime};
use derive_builder::Builder;
use regex::Regex;

/// Whether a time bound carried a time of day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimePrecision {
    /// `YYYYMMDD`: modification times are truncated to midnight.
    Date,
    /// `YYYYMMDDTHHMMSS`: modification times are compared as-is.
    DateTime,
}

/// A point in local time used as a `-before` or `-after` bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeBound {
    pub instant: NaiveDateTime,
    pub precision: TimePrecision,
}

impl TimeBound {
    pub fn new(instant: NaiveDateTime, precision: TimePrecision) -> Self {
        Self { instant, precision }
    }

    /// Bring a modification time to this bound's precision.
    pub fn truncate(&self, modified: NaiveDateTime) -> NaiveDateTime {
        match self.precision {
            TimePrecision::DateTime => modified,
            TimePrecision::Date => modified.date().and_time(NaiveTime::MIN),
        }
    }

    /// `-before`: the bound is not earlier than the modification time.
    pub fn admits_before(&self, modified: NaiveDateTime) -> bool {
        self.instant >= self.truncate(modified)
    }

    /// `-after`: the bound is not later than the modification time.
    pub fn admits_after(&self, modified: NaiveDateTime) -> bool {
        self.instant <= self.truncate(modified)
    }
}

/// A size bound in bytes. May be fractional (`1.5k`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizeBound(f64);

impl SizeBound {
    /// Callers guarantee a non-negative, non-NaN byte count.
    pub(crate) fn from_bytes(bytes: f64) -> Self {
        Self(bytes)
    }

    pub fn bytes(&self) -> f64 {
        self.0
    }

    /// `-smaller`: the file is no larger than the bound.
    pub fn admits_at_most(&self, size: u64) -> bool {
        self.0 >= size as f64
    }

    /// `-bigger`: the file is no smaller than the bound.
    pub fn admits_at_least(&self, size: u64) -> bool {
        self.0 <= size as f64
    }
}

/// A regular expression that must match a whole file name.
#[derive(Debug, Clone)]
pub struct NamePattern {
    source: String,
    regex: Regex,
}

impl NamePattern {
    /// Compile `pattern`, anchored at both ends.
    ///
    /// The pattern is checked on its own first so that fragments which only
    /// become valid inside the anchoring group (e.g. `a)|(b`) are rejected.
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        Regex::new(pattern)?;
        let regex = Regex::new(&format!(r"^(?:{pattern})\z"))?;
        Ok(Self {
            source: pattern.to_string(),
            regex,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn is_match(&self, name: &str) -> bool {
        self.regex.is_match(name)
    }
}

impl PartialEq for NamePattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

/// The facts about a file that selection looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileFacts {
    /// Size in bytes.
    pub size: u64,
    /// Modification time in local time.
    pub modified: NaiveDateTime,
}

impl FileFacts {
    pub fn new(size: u64, modified: NaiveDateTime) -> Self {
        Self { size, modified }
    }

    /// Read size and local modification time from followed metadata.
    pub fn from_metadata(metadata: &Metadata) -> std::io::Result<Self> {
        let modified = DateTime::<Local>::from(metadata.modified()?).naive_local();
        Ok(Self::new(metadata.len(), modified))
    }
}

/// The resolved selectors for one run. Absent selectors never reject.
///
/// `before` and `after` are not checked against each other; a window with
/// `before < after` simply selects nothing.
#[derive(Debug, Clone, Default, PartialEq, Builder)]
#[builder(setter(into, strip_option), default)]
pub struct SelectorSet {
    pub before: Option<TimeBound>,
    pub after: Option<TimeBound>,
    pub pattern: Option<NamePattern>,
    pub smaller: Option<SizeBound>,
    pub bigger: Option<SizeBound>,
}

impl SelectorSet {
    pub fn builder() -> SelectorSetBuilder {
        SelectorSetBuilder::default()
    }

    /// Whether no selector is active.
    pub fn is_empty(&self) -> bool {
        self.before.is_none()
            && self.after.is_none()
            && self.pattern.is_none()
            && self.smaller.is_none()
            && self.bigger.is_none()
    }

    /// Evaluate every present selector against a file; all must pass.
    pub fn select(&self, name: &str, facts: &FileFacts) -> bool {
        self.pattern.as_ref().is_none_or(|p| p.is_match(name))
            && self
                .before
                .is_none_or(|bound| bound.admits_before(facts.modified))
            && self
                .after
                .is_none_or(|bound| bound.admits_after(facts.modified))
            && self
                .smaller
                .is_none_or(|bound| bound.admits_at_most(facts.size))
            && self
                .bigger
                .is_none_or(|bound| bound.admits_at_least(facts.size))
    }
}
