//! The collaborator seam to the key-value store.
//!
//! The engine consumes two store capabilities and nothing else: cursor
//! paged key enumeration and a per-key memory usage query. [`KeySource`]
//! captures exactly that surface so the scan loop is independent of any
//! particular client. [`RedisSource`](crate::redis::RedisSource) is the
//! production implementation;
//! [`InMemorySource`](crate::memory::InMemorySource) backs tests.

use crate::error::ScanError;

/// One page of keys returned by a cursor scan request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanPage {
    /// Cursor to thread into the next request. `0` marks the end of the
    /// scan cycle (and also the start — see [`Scan`](crate::scan::Scan)).
    pub cursor: u64,
    /// Keys enumerated by this page. May be empty even mid-scan, and its
    /// length may differ from the requested count hint in either
    /// direction.
    pub keys: Vec<String>,
}

/// Outcome of a per-key memory usage query.
///
/// An explicit two-variant result rather than an error: a missing size
/// is an expected, recoverable condition with a fixed policy (treat as
/// zero), and must never be conflated with transport failures, which
/// abort the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeySize {
    /// The store reported the key's memory footprint in bytes.
    Bytes(u64),
    /// The store could not report a size for this key — the key expired
    /// between enumeration and lookup, or the store cannot introspect
    /// that value type.
    Unsupported,
}

impl KeySize {
    /// Returns the reported byte count, degrading [`KeySize::Unsupported`]
    /// to zero.
    pub fn bytes_or_zero(self) -> u64 {
        match self {
            KeySize::Bytes(bytes) => bytes,
            KeySize::Unsupported => 0,
        }
    }
}

/// A store that can enumerate its key space and report per-key sizes.
///
/// Both methods take `&mut self`: implementations are connection-like
/// and the scan loop is strictly sequential, so there is no concurrent
/// access to design for.
pub trait KeySource {
    /// Requests one page of the scan cycle.
    ///
    /// The match filter is a glob-style pattern applied by the store
    /// itself; callers never re-filter returned keys. The count is a
    /// hint only.
    ///
    /// # Errors
    ///
    /// Any [`ScanError`] is fatal to the run.
    fn scan_page(
        &mut self,
        cursor: u64,
        match_pattern: &str,
        count_hint: usize,
    ) -> std::result::Result<ScanPage, ScanError>;

    /// Queries the memory footprint of a single key.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::Transport`] only for connection-level
    /// failures. A store that merely cannot answer for this key reports
    /// [`KeySize::Unsupported`] instead.
    fn key_size(&mut self, key: &str) -> std::result::Result<KeySize, ScanError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_size_bytes_or_zero() {
        assert_eq!(KeySize::Bytes(512).bytes_or_zero(), 512);
        assert_eq!(KeySize::Unsupported.bytes_or_zero(), 0);
    }
}
