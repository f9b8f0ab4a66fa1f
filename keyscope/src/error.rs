//! Error types for the keyscope analysis engine.

use thiserror::Error;

/// The main error type for all keyscope operations.
///
/// Covers the two failure areas of an analysis run: establishing the
/// store connection and driving the scan itself. Per-key size lookup
/// failures are not errors — they are represented as
/// [`KeySize::Unsupported`](crate::source::KeySize::Unsupported) and
/// recovered locally.
#[derive(Error, Debug)]
pub enum KeyscopeError {
    /// Error establishing the store connection.
    #[error("connect error: {0}")]
    Connect(#[from] ConnectError),

    /// Fatal error during the scan-and-aggregate run.
    #[error("scan error: {0}")]
    Scan(#[from] ScanError),
}

/// Errors that can occur while establishing a store connection.
#[derive(Error, Debug)]
pub enum ConnectError {
    /// The connection settings could not be turned into a client.
    #[error("invalid connection target '{target}': {source}")]
    InvalidTarget {
        /// The endpoint that was rejected.
        target: String,
        /// The underlying client error.
        #[source]
        source: redis::RedisError,
    },

    /// The store did not accept the connection.
    #[error("failed to connect to '{target}': {source}")]
    Unreachable {
        /// The endpoint that could not be reached.
        target: String,
        /// The underlying client error.
        #[source]
        source: redis::RedisError,
    },
}

/// Errors that are fatal to a scan run.
///
/// Either variant ends the run immediately: a partial aggregation has
/// unknown coverage of the key space, so no report is produced from it.
#[derive(Error, Debug)]
pub enum ScanError {
    /// The transport to the store failed mid-run.
    #[error("transport failure: {source}")]
    Transport {
        /// The underlying client error.
        #[source]
        source: redis::RedisError,
    },

    /// The store returned a reply the scanner could not interpret
    /// (e.g. a scan response missing its cursor).
    #[error("protocol violation: {reason}")]
    Protocol {
        /// Description of the malformed reply.
        reason: String,
    },
}

/// Type alias for `Result<T, KeyscopeError>`.
pub type Result<T> = std::result::Result<T, KeyscopeError>;
