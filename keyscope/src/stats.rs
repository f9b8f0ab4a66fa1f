//! Streaming per-pattern size statistics.
//!
//! The aggregator folds a `(pattern, size)` stream into one statistics
//! entry per distinct pattern, one observation at a time. Memory is
//! bounded by the number of distinct patterns — expected to be orders
//! of magnitude smaller than the key count — never by the number of
//! keys, which are consumed and dropped as they stream through.
//!
//! The average is not maintained incrementally: it is derived once at
//! [`Aggregator::finalize`] from the exact running totals, so it cannot
//! drift.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use serde::Serialize;

/// Running statistics for one pattern, mutated on every observation.
#[derive(Debug, Clone)]
struct PatternStats {
    /// Number of keys observed under this pattern.
    count: u64,
    /// Sum of observed sizes in bytes.
    total_size: u64,
    /// Smallest observed size in bytes.
    min_size: u64,
    /// Largest observed size in bytes.
    max_size: u64,
    /// Observation ordinal at which this pattern was first seen.
    first_seen: u64,
}

/// Finalized statistics for one pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PatternSummary {
    /// The structural pattern these keys share.
    pub pattern: String,
    /// Number of keys observed under this pattern.
    pub count: u64,
    /// Sum of observed sizes in bytes.
    pub total_size: u64,
    /// Average observed size in bytes (integer division of total by count).
    pub avg_size: u64,
    /// Smallest observed size in bytes.
    pub min_size: u64,
    /// Largest observed size in bytes.
    pub max_size: u64,
}

/// Streaming aggregator over `(pattern, size)` observations.
///
/// Owns the statistics table exclusively for the lifetime of one
/// analysis run. Each run builds a fresh aggregator;
/// [`Aggregator::finalize`] consumes it, so a finished aggregator can
/// never absorb further observations.
#[derive(Debug, Default)]
pub struct Aggregator {
    /// Statistics keyed by pattern.
    table: HashMap<String, PatternStats>,
    /// Total observations folded so far, used to stamp first-seen order.
    observed: u64,
}

impl Aggregator {
    /// Creates an empty aggregator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds one observation into the table.
    ///
    /// The first observation of a pattern creates its entry with
    /// `count = 1` and all three size fields equal to `size`; every
    /// subsequent observation increments the count, adds to the total,
    /// and updates min/max by comparison.
    pub fn observe(&mut self, pattern: String, size: u64) {
        self.observed += 1;
        match self.table.entry(pattern) {
            Entry::Occupied(mut occupied) => {
                let stats = occupied.get_mut();
                stats.count += 1;
                stats.total_size += size;
                stats.min_size = stats.min_size.min(size);
                stats.max_size = stats.max_size.max(size);
            }
            Entry::Vacant(vacant) => {
                vacant.insert(PatternStats {
                    count: 1,
                    total_size: size,
                    min_size: size,
                    max_size: size,
                    first_seen: self.observed,
                });
            }
        }
    }

    /// Number of distinct patterns observed so far.
    pub fn distinct_patterns(&self) -> usize {
        self.table.len()
    }

    /// Whether no observations have been folded yet.
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Completes the run and returns the finalized table.
    ///
    /// Computes each entry's average from its exact totals. Entries are
    /// returned in first-observation order; callers wanting a report
    /// ordering sort downstream (see [`render`](crate::report::render)).
    pub fn finalize(self) -> Vec<PatternSummary> {
        let mut entries: Vec<(String, PatternStats)> = self.table.into_iter().collect();
        entries.sort_unstable_by_key(|(_, stats)| stats.first_seen);

        entries
            .into_iter()
            .map(|(pattern, stats)| {
                // count is at least 1 for any existing entry; the guard
                // keeps the division total regardless.
                let avg_size = if stats.count == 0 {
                    0
                } else {
                    stats.total_size / stats.count
                };
                PatternSummary {
                    pattern,
                    count: stats.count,
                    total_size: stats.total_size,
                    avg_size,
                    min_size: stats.min_size,
                    max_size: stats.max_size,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_observation_creates_entry() {
        let mut agg = Aggregator::new();
        agg.observe("user:#".to_string(), 100);

        let summaries = agg.finalize();
        assert_eq!(summaries.len(), 1);
        let s = &summaries[0];
        assert_eq!(s.pattern, "user:#");
        assert_eq!(s.count, 1);
        assert_eq!(s.total_size, 100);
        assert_eq!(s.avg_size, 100);
        assert_eq!(s.min_size, 100);
        assert_eq!(s.max_size, 100);
    }

    #[test]
    fn test_repeat_observations_accumulate() {
        let mut agg = Aggregator::new();
        agg.observe("user:#".to_string(), 100);
        agg.observe("user:#".to_string(), 150);
        agg.observe("user:#".to_string(), 50);

        let summaries = agg.finalize();
        let s = &summaries[0];
        assert_eq!(s.count, 3);
        assert_eq!(s.total_size, 300);
        assert_eq!(s.avg_size, 100);
        assert_eq!(s.min_size, 50);
        assert_eq!(s.max_size, 150);
    }

    #[test]
    fn test_summary_invariants_hold() {
        let mut agg = Aggregator::new();
        let observations = [
            ("a:#", 7u64),
            ("a:#", 13),
            ("b:#", 0),
            ("a:#", 5),
            ("b:#", 1024),
            ("c", 3),
        ];
        for (pattern, size) in observations {
            agg.observe(pattern.to_string(), size);
        }

        for s in agg.finalize() {
            assert!(s.min_size <= s.avg_size, "{}: min > avg", s.pattern);
            assert!(s.avg_size <= s.max_size, "{}: avg > max", s.pattern);
            // total == count * avg within integer-division tolerance.
            assert!(s.count * s.avg_size <= s.total_size);
            assert!(s.total_size < s.count * (s.avg_size + 1));
        }
    }

    #[test]
    fn test_count_matches_observations_per_pattern() {
        let mut agg = Aggregator::new();
        for _ in 0..5 {
            agg.observe("x:#".to_string(), 10);
        }
        for _ in 0..2 {
            agg.observe("y:#".to_string(), 10);
        }

        let summaries = agg.finalize();
        let count_of = |pattern: &str| {
            summaries
                .iter()
                .find(|s| s.pattern == pattern)
                .map(|s| s.count)
        };
        assert_eq!(count_of("x:#"), Some(5));
        assert_eq!(count_of("y:#"), Some(2));
    }

    #[test]
    fn test_zero_sizes_pull_min_to_zero() {
        // An unsupported size lookup is folded as a 0-byte observation.
        let mut agg = Aggregator::new();
        agg.observe("user:#".to_string(), 100);
        agg.observe("user:#".to_string(), 0);

        let s = &agg.finalize()[0];
        assert_eq!(s.count, 2);
        assert_eq!(s.total_size, 100);
        assert_eq!(s.min_size, 0);
        assert_eq!(s.max_size, 100);
    }

    #[test]
    fn test_finalize_preserves_first_seen_order() {
        let mut agg = Aggregator::new();
        agg.observe("c".to_string(), 1);
        agg.observe("a".to_string(), 1);
        agg.observe("b".to_string(), 1);
        agg.observe("a".to_string(), 1);

        let summaries = agg.finalize();
        let order: Vec<&str> = summaries.iter().map(|s| s.pattern.as_str()).collect();
        assert_eq!(order, vec!["c", "a", "b"]);
    }

    #[test]
    fn test_empty_aggregator_finalizes_empty() {
        let agg = Aggregator::new();
        assert!(agg.is_empty());
        assert!(agg.finalize().is_empty());
    }
}
