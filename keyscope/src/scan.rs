//! Cursor-driven enumeration of the key space.
//!
//! Wraps the store's paged scan protocol in a pull-based iterator over
//! key batches, so downstream consumers never see pagination — only a
//! finite sequence of keys ending in exhaustion or a fatal error.
//!
//! # Protocol
//!
//! Each request carries the cursor from the previous response (the
//! first request carries `0`) together with a server-side match filter
//! and a page-size hint. Each response yields the next cursor and zero
//! or more keys. The cycle is complete precisely when a response
//! returns cursor `0` *and* at least one request has been issued — the
//! zero value doubles as the start sentinel, so "haven't started" and
//! "finished" can only be told apart by tracking whether a page has
//! been requested. [`Scan`] tracks that explicitly rather than relying
//! on loop structure.
//!
//! A scan is finite but not restartable: once exhausted (or failed), it
//! stays exhausted. A fresh run requires a fresh [`Scan`].

use crate::error::ScanError;
use crate::source::KeySource;

/// Pull-based iterator over key batches from a cursor scan.
///
/// Yields `Result<Vec<String>, ScanError>` items: one `Ok` batch per
/// page (possibly empty — the page hint is advisory and the store may
/// return any number of keys per page), or a single `Err` after which
/// the iterator is fused. Holds the source exclusively for the duration
/// of the scan; [`Scan::source_mut`] lends it back between pages so the
/// caller can interleave per-key queries on the same connection.
#[derive(Debug)]
pub struct Scan<'a, S: KeySource> {
    /// The store connection being enumerated.
    source: &'a mut S,
    /// Glob filter forwarded to the store with every request.
    match_pattern: String,
    /// Page-size hint forwarded to the store with every request.
    count_hint: usize,
    /// Cursor to send with the next request.
    cursor: u64,
    /// Whether at least one page has been requested.
    started: bool,
    /// Whether a request failed; the iterator is fused afterwards.
    failed: bool,
}

impl<'a, S: KeySource> Scan<'a, S> {
    /// Creates a scan positioned at the start sentinel.
    pub fn new(source: &'a mut S, match_pattern: impl Into<String>, count_hint: usize) -> Self {
        Self {
            source,
            match_pattern: match_pattern.into(),
            count_hint,
            cursor: 0,
            started: false,
            failed: false,
        }
    }

    /// Lends out the underlying source between pages.
    ///
    /// The scan loop uses this to issue per-key size queries on the same
    /// connection that is driving the enumeration.
    pub fn source_mut(&mut self) -> &mut S {
        self.source
    }

    /// Whether the scan cycle ran to completion.
    ///
    /// `false` while pages remain, and also after a failed run — a scan
    /// that errored has unknown coverage and never counts as complete.
    pub fn is_complete(&self) -> bool {
        self.started && self.cursor == 0 && !self.failed
    }
}

impl<S: KeySource> Iterator for Scan<'_, S> {
    type Item = Result<Vec<String>, ScanError>;

    fn next(&mut self) -> Option<Self::Item> {
        // Cursor 0 is both the start and the completion sentinel; it only
        // means "complete" once at least one page has been requested.
        if self.failed || (self.started && self.cursor == 0) {
            return None;
        }

        match self
            .source
            .scan_page(self.cursor, &self.match_pattern, self.count_hint)
        {
            Ok(page) => {
                self.started = true;
                self.cursor = page.cursor;
                Some(Ok(page.keys))
            }
            Err(e) => {
                self.failed = true;
                Some(Err(e))
            }
        }
    }
}
