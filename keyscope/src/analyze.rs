//! The scan-observe loop tying the engine together.
//!
//! Drives a [`Scan`] over the store, normalizes each key, looks up its
//! size, and folds the observation into an [`Aggregator`] — strictly
//! sequentially, since each page's cursor depends on the previous
//! response. A page is fully processed before the next one is
//! requested, and no key list is ever materialized beyond the current
//! page.
//!
//! Failure policy: per-key unsupported size lookups are folded as zero
//! bytes and the run continues; any transport or protocol failure ends
//! the run immediately and the aggregation folded so far is discarded.
//! There is no retry logic here — re-running the analysis is the retry
//! story.

use crate::error::{Result, ScanError};
use crate::redis::{ConnectConfig, RedisSource};
use crate::scan::Scan;
use crate::source::{KeySize, KeySource};
use crate::stats::{Aggregator, PatternSummary};

/// Default page-size hint passed to each scan request.
pub const DEFAULT_COUNT_HINT: usize = 1000;

/// Scans the entire key space of `source` and aggregates per-pattern
/// size statistics.
///
/// `match_pattern` is a glob filter applied by the store itself (pass
/// `"*"` to match everything); `count_hint` is the advisory page size.
/// Returns one [`PatternSummary`] per distinct pattern, in
/// first-observation order.
///
/// The result reflects an approximate, eventually-consistent view of a
/// live store: keys mutated during the scan may be counted under their
/// old size, once, or not at all.
///
/// # Errors
///
/// Returns the first [`ScanError`] encountered; no partial statistics
/// survive a failed run.
pub fn analyze<S: KeySource>(
    source: &mut S,
    match_pattern: &str,
    count_hint: usize,
) -> std::result::Result<Vec<PatternSummary>, ScanError> {
    let mut aggregator = Aggregator::new();
    let mut scan = Scan::new(source, match_pattern, count_hint);
    let mut pages = 0u64;
    let mut keys_seen = 0u64;

    while let Some(batch) = scan.next() {
        let keys = batch?;
        pages += 1;

        for key in &keys {
            let pattern = crate::pattern::normalize(key);
            let size = scan.source_mut().key_size(key)?;
            if size == KeySize::Unsupported {
                tracing::debug!("size unavailable for '{key}', counted as 0 bytes");
            }
            aggregator.observe(pattern, size.bytes_or_zero());
            keys_seen += 1;
        }
    }

    tracing::debug!(
        "scan complete: {pages} page(s), {keys_seen} key(s), {} distinct pattern(s)",
        aggregator.distinct_patterns()
    );

    Ok(aggregator.finalize())
}

/// Connects to a Redis target and runs [`analyze`] against it.
///
/// Convenience entry point for callers that hold connection settings
/// rather than an open source.
///
/// # Errors
///
/// Returns [`ConnectError`] if the connection cannot be established and
/// [`ScanError`] if the run fails mid-scan, both under the crate error
/// type.
pub fn analyze_redis(
    config: &ConnectConfig,
    match_pattern: &str,
    count_hint: usize,
) -> Result<Vec<PatternSummary>> {
    let mut source = RedisSource::connect(config)?;
    let summaries = analyze(&mut source, match_pattern, count_hint)?;
    Ok(summaries)
}
