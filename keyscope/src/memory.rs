//! In-memory key source for tests and offline experimentation.
//!
//! Serves a fixed `(key, size)` list through the same cursor protocol a
//! live store speaks: paged enumeration with a server-side glob filter,
//! cursor `0` as the shared start/end sentinel, and per-key size
//! queries. Failure injection mirrors what a live store can do — a key
//! whose size query is unsupported, or a transport failure on the Nth
//! request.

use std::collections::HashSet;

use crate::error::ScanError;
use crate::source::{KeySize, KeySource, ScanPage};

/// A deterministic, in-process [`KeySource`].
///
/// Keys are enumerated in insertion order, `page_size` raw entries per
/// page. The glob filter is applied per page after slicing, so a page
/// may carry fewer keys than the page size — or none — while the scan
/// is still mid-cycle, exactly like a live store filtering a sparse
/// match.
#[derive(Debug)]
pub struct InMemorySource {
    /// The key space: `(key, size_in_bytes)` in enumeration order.
    entries: Vec<(String, u64)>,
    /// Raw entries served per page, before filtering.
    page_size: usize,
    /// Keys whose size query reports [`KeySize::Unsupported`].
    unsupported: HashSet<String>,
    /// Scan request ordinal (1-based) that fails with a transport error.
    fail_on_request: Option<u64>,
    /// Scan requests served so far.
    requests: u64,
}

impl InMemorySource {
    /// Creates a source over the given key space.
    ///
    /// A `page_size` of zero is clamped to one so the scan always makes
    /// progress.
    pub fn new(entries: Vec<(String, u64)>, page_size: usize) -> Self {
        Self {
            entries,
            page_size: page_size.max(1),
            unsupported: HashSet::new(),
            fail_on_request: None,
            requests: 0,
        }
    }

    /// Marks a key as unable to report its size.
    pub fn mark_unsupported(&mut self, key: impl Into<String>) {
        self.unsupported.insert(key.into());
    }

    /// Injects a transport failure on the Nth scan request (1-based).
    pub fn fail_on_request(&mut self, request: u64) {
        self.fail_on_request = Some(request);
    }

    /// Number of scan requests served so far.
    pub fn requests(&self) -> u64 {
        self.requests
    }
}

impl KeySource for InMemorySource {
    fn scan_page(
        &mut self,
        cursor: u64,
        match_pattern: &str,
        _count_hint: usize,
    ) -> Result<ScanPage, ScanError> {
        self.requests += 1;
        if self.fail_on_request == Some(self.requests) {
            return Err(ScanError::Transport {
                source: redis::RedisError::from((
                    redis::ErrorKind::IoError,
                    "injected transport failure",
                )),
            });
        }

        let start = usize::try_from(cursor)
            .unwrap_or(self.entries.len())
            .min(self.entries.len());
        let end = (start + self.page_size).min(self.entries.len());

        let keys = self.entries[start..end]
            .iter()
            .filter(|(key, _)| glob_match(match_pattern.as_bytes(), key.as_bytes()))
            .map(|(key, _)| key.clone())
            .collect();
        let cursor = if end >= self.entries.len() {
            0
        } else {
            end as u64
        };

        Ok(ScanPage { cursor, keys })
    }

    fn key_size(&mut self, key: &str) -> Result<KeySize, ScanError> {
        if self.unsupported.contains(key) {
            return Ok(KeySize::Unsupported);
        }
        match self.entries.iter().find(|(k, _)| k == key) {
            Some((_, size)) => Ok(KeySize::Bytes(*size)),
            // Key vanished between enumeration and lookup.
            None => Ok(KeySize::Unsupported),
        }
    }
}

/// Minimal glob matcher covering the store filter syntax the engine
/// relies on: `*` (any run, including empty) and `?` (any one byte).
/// Literal bytes match themselves.
fn glob_match(pattern: &[u8], text: &[u8]) -> bool {
    match pattern.split_first() {
        None => text.is_empty(),
        Some((b'*', rest)) => (0..=text.len()).any(|i| glob_match(rest, &text[i..])),
        Some((b'?', rest)) => !text.is_empty() && glob_match(rest, &text[1..]),
        Some((&literal, rest)) => {
            text.first() == Some(&literal) && glob_match(rest, &text[1..])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries(pairs: &[(&str, u64)]) -> Vec<(String, u64)> {
        pairs.iter().map(|(k, s)| ((*k).to_string(), *s)).collect()
    }

    #[test]
    fn test_glob_match_star_and_question() {
        assert!(glob_match(b"*", b"anything"));
        assert!(glob_match(b"*", b""));
        assert!(glob_match(b"user:*", b"user:123"));
        assert!(!glob_match(b"user:*", b"session:1"));
        assert!(glob_match(b"k?y", b"key"));
        assert!(!glob_match(b"k?y", b"ky"));
        assert!(glob_match(b"*:end", b"a:b:end"));
    }

    #[test]
    fn test_pagination_threads_cursor_to_zero() {
        let mut source = InMemorySource::new(entries(&[("a", 1), ("b", 2), ("c", 3)]), 2);

        let page = source.scan_page(0, "*", 2).unwrap();
        assert_eq!(page.keys, vec!["a", "b"]);
        assert_ne!(page.cursor, 0);

        let page = source.scan_page(page.cursor, "*", 2).unwrap();
        assert_eq!(page.keys, vec!["c"]);
        assert_eq!(page.cursor, 0, "final page returns the sentinel");
    }

    #[test]
    fn test_filtered_page_may_be_empty_mid_scan() {
        let mut source = InMemorySource::new(entries(&[("x:1", 1), ("x:2", 1), ("y:1", 1)]), 2);

        // First page holds only x-keys, none match: empty but not done.
        let page = source.scan_page(0, "y:*", 2).unwrap();
        assert!(page.keys.is_empty());
        assert_ne!(page.cursor, 0);

        let page = source.scan_page(page.cursor, "y:*", 2).unwrap();
        assert_eq!(page.keys, vec!["y:1"]);
        assert_eq!(page.cursor, 0);
    }

    #[test]
    fn test_key_size_lookup_and_fault_injection() {
        let mut source = InMemorySource::new(entries(&[("a", 100), ("b", 200)]), 10);
        source.mark_unsupported("b");

        assert_eq!(source.key_size("a").unwrap(), KeySize::Bytes(100));
        assert_eq!(source.key_size("b").unwrap(), KeySize::Unsupported);
        assert_eq!(source.key_size("gone").unwrap(), KeySize::Unsupported);
    }

    #[test]
    fn test_injected_transport_failure_fires_once_on_ordinal() {
        let mut source = InMemorySource::new(entries(&[("a", 1), ("b", 1), ("c", 1)]), 1);
        source.fail_on_request(2);

        assert!(source.scan_page(0, "*", 1).is_ok());
        assert!(matches!(
            source.scan_page(1, "*", 1),
            Err(ScanError::Transport { .. })
        ));
    }
}
