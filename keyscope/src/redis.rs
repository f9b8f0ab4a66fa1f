//! Redis-backed key source.
//!
//! Implements [`KeySource`] over a synchronous [`redis::Connection`]
//! using the two commands the engine needs: `SCAN` with `MATCH`/`COUNT`
//! for paged enumeration and `MEMORY USAGE` for per-key sizes. The
//! connection is used strictly sequentially, so a single plain
//! connection suffices — no pooling.
//!
//! # Error mapping
//!
//! Replies the client cannot interpret (wrong shape, missing cursor)
//! become [`ScanError::Protocol`]; connection-level failures become
//! [`ScanError::Transport`]. A `MEMORY USAGE` refusal or nil reply is
//! not an error at all — it degrades to [`KeySize::Unsupported`].

use redis::{Client, Connection, ConnectionAddr, ConnectionInfo, ErrorKind, RedisConnectionInfo};

use crate::error::{ConnectError, ScanError};
use crate::source::{KeySize, KeySource, ScanPage};

/// Connection settings for a Redis target.
#[derive(Debug, Clone)]
pub struct ConnectConfig {
    /// Server hostname or IP address.
    pub host: String,
    /// Server TCP port.
    pub port: u16,
    /// Logical database index selected after connecting.
    pub db: i64,
    /// Optional AUTH credential.
    pub password: Option<String>,
}

impl ConnectConfig {
    /// Human-readable endpoint, e.g. `localhost:6379/db0`.
    ///
    /// Used for the report banner and error diagnostics; never includes
    /// the credential.
    pub fn endpoint(&self) -> String {
        format!("{}:{}/db{}", self.host, self.port, self.db)
    }
}

impl Default for ConnectConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 6379,
            db: 0,
            password: None,
        }
    }
}

/// A [`KeySource`] over a live Redis connection.
///
/// Read-only by construction: only `SCAN` and `MEMORY USAGE` are ever
/// issued, and neither mutates the store. The store remains
/// concurrently mutable by other clients throughout a scan — no lock,
/// transaction, or snapshot is taken.
pub struct RedisSource {
    /// The underlying synchronous connection.
    conn: Connection,
}

impl RedisSource {
    /// Connects to the Redis server described by `config`.
    ///
    /// # Errors
    ///
    /// [`ConnectError::InvalidTarget`] if the settings cannot form a
    /// client, [`ConnectError::Unreachable`] if the server does not
    /// accept the connection.
    pub fn connect(config: &ConnectConfig) -> Result<Self, ConnectError> {
        let info = ConnectionInfo {
            addr: ConnectionAddr::Tcp(config.host.clone(), config.port),
            redis: RedisConnectionInfo {
                db: config.db,
                password: config.password.clone(),
                ..RedisConnectionInfo::default()
            },
        };

        let client = Client::open(info).map_err(|source| ConnectError::InvalidTarget {
            target: config.endpoint(),
            source,
        })?;
        let conn = client
            .get_connection()
            .map_err(|source| ConnectError::Unreachable {
                target: config.endpoint(),
                source,
            })?;

        tracing::debug!("connected to {}", config.endpoint());
        Ok(Self { conn })
    }
}

impl KeySource for RedisSource {
    fn scan_page(
        &mut self,
        cursor: u64,
        match_pattern: &str,
        count_hint: usize,
    ) -> Result<ScanPage, ScanError> {
        let (cursor, keys): (u64, Vec<String>) = redis::cmd("SCAN")
            .arg(cursor)
            .arg("MATCH")
            .arg(match_pattern)
            .arg("COUNT")
            .arg(count_hint)
            .query(&mut self.conn)
            .map_err(fatal)?;

        Ok(ScanPage { cursor, keys })
    }

    fn key_size(&mut self, key: &str) -> Result<KeySize, ScanError> {
        let reply: Result<Option<u64>, redis::RedisError> = redis::cmd("MEMORY")
            .arg("USAGE")
            .arg(key)
            .query(&mut self.conn);

        match reply {
            Ok(Some(bytes)) => Ok(KeySize::Bytes(bytes)),
            // Nil reply: the key vanished between enumeration and lookup.
            Ok(None) => Ok(KeySize::Unsupported),
            // The server answered but refused the query — MEMORY USAGE is
            // not available for this key or deployment.
            Err(e) if e.kind() == ErrorKind::ResponseError => Ok(KeySize::Unsupported),
            Err(e) => Err(fatal(e)),
        }
    }
}

/// Maps a client error onto the fatal-failure taxonomy.
///
/// A reply that parsed into the wrong shape is a protocol violation;
/// everything else is a transport failure. Both end the run.
fn fatal(source: redis::RedisError) -> ScanError {
    if source.kind() == ErrorKind::TypeError {
        ScanError::Protocol {
            reason: source.to_string(),
        }
    } else {
        ScanError::Transport { source }
    }
}
