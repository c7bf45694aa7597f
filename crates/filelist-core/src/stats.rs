//! Run statistics.

/// Counters for one run. Every counter only grows.
///
/// "Visited" counts every regular file examined; "listed" counts only the
/// files whose path was actually printed, by the plain listing or by a
/// duplicate report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stats {
    /// Regular files examined.
    pub files_visited: u64,
    /// Total size of examined files in bytes.
    pub bytes_visited: u64,
    /// Files printed.
    pub files_listed: u64,
    /// Total size of printed files in bytes.
    pub bytes_listed: u64,
}

impl Stats {
    /// Create new empty stats.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a file examined by the walker.
    pub fn record_visit(&mut self, size: u64) {
        self.files_visited += 1;
        self.bytes_visited += size;
    }

    /// Record a file whose path was printed.
    pub fn record_listed(&mut self, size: u64) {
        self.files_listed += 1;
        self.bytes_listed += size;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_default() {
        let stats = Stats::default();
        assert_eq!(stats.files_visited, 0);
        assert_eq!(stats.bytes_listed, 0);
    }

    #[test]
    fn test_visit_and_listed_are_independent() {
        let mut stats = Stats::new();
        stats.record_visit(1000);
        stats.record_visit(50);
        stats.record_listed(50);

        assert_eq!(stats.files_visited, 2);
        assert_eq!(stats.bytes_visited, 1050);
        assert_eq!(stats.files_listed, 1);
        assert_eq!(stats.bytes_listed, 50);
    }
}
