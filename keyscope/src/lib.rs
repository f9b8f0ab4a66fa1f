//! # keyscope
//!
//! Streaming key-pattern memory analyzer for Redis.
//!
//! keyscope walks the entire key space of a running Redis instance with
//! the cursor scan protocol, normalizes each key into its structural
//! pattern (`user:123:profile` → `user:#:profile`), and accumulates
//! per-pattern memory statistics as keys stream by — so an operator can
//! see which naming families consume the most memory without ever
//! enumerating keys by hand.
//!
//! **Status**: This crate is in early development. The API is not yet stable.
//!
//! ## Key Properties
//!
//! - Read-only: only `SCAN` and `MEMORY USAGE` are ever issued
//! - Bounded memory: state grows with distinct patterns, not key count
//! - Streaming: keys are processed one page at a time, never materialized
//! - Live-store tolerant: concurrent mutation yields an approximate,
//!   eventually-consistent view rather than blocking the store
//! - Degrades per key: a size the store cannot report counts as 0 bytes;
//!   only transport or protocol failures end a run
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use keyscope::{analyze_redis, render, ConnectConfig, DEFAULT_COUNT_HINT};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ConnectConfig::default();
//!
//! // Scan everything and aggregate by pattern
//! let summaries = analyze_redis(&config, "*", DEFAULT_COUNT_HINT)?;
//!
//! // Render the fixed-width report, largest pattern family first
//! for line in render(&summaries) {
//!     println!("{line}");
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! - [`analyze()`] — the sequential scan-observe loop driving everything
//! - [`Scan`] — pull-based iterator over cursor-paged key batches
//! - [`Aggregator`] — streaming per-pattern statistics table
//! - [`KeySource`] — the seam to the store; [`RedisSource`] in
//!   production, [`InMemorySource`] in tests
//!
//! ## Modules
//!
//! For lower-level access, the individual modules are also public:
//!
//! - [`analyze`](mod@analyze) — analysis driver
//! - [`pattern`] — key-to-pattern normalization
//! - [`scan`] — cursor scanner
//! - [`stats`] — streaming aggregation
//! - [`report`] — table rendering and size formatting
//! - [`source`] — the store seam (trait and supporting types)
//! - [`redis`](mod@redis) — Redis-backed source
//! - [`memory`] — deterministic in-memory source
//! - [`error`] — error types

pub mod analyze;
pub mod error;
pub mod memory;
pub mod pattern;
pub mod redis;
pub mod report;
pub mod scan;
pub mod source;
pub mod stats;

// Re-export primary API types at crate root for convenience.
pub use analyze::{DEFAULT_COUNT_HINT, analyze, analyze_redis};
pub use error::{ConnectError, KeyscopeError, Result, ScanError};
pub use memory::InMemorySource;
pub use pattern::normalize;
pub use self::redis::{ConnectConfig, RedisSource};
pub use report::{format_size, render};
pub use scan::Scan;
pub use source::{KeySize, KeySource, ScanPage};
pub use stats::{Aggregator, PatternSummary};
