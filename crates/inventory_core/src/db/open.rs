//! Connection bootstrap utilities for SQLite.
//!
//! # Responsibility
//! - Open file or in-memory SQLite connections.
//! - Configure connection pragmas required by core behavior.
//! - Ensure the `items` schema before returning a usable connection.
//!
//! # Invariants
//! - Open failures map to `StoreError::OpenFailed`.
//! - Schema failures map to `StoreError::SchemaFailed`.
//! - The returned connection is the only handle; dropping it closes the file.

use super::schema::ensure_items_schema;
use super::{StoreError, StoreResult};
use log::{error, info};
use rusqlite::Connection;
use std::path::Path;
use std::time::{Duration, Instant};

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Opens (or creates) the inventory database file and ensures its schema.
///
/// Safe to call against an already-initialized file.
///
/// # Side effects
/// - Creates the file when missing.
/// - Emits `db_open` logging events with duration and status.
pub fn open_db(path: impl AsRef<Path>) -> StoreResult<Connection> {
    open_with("file", || Connection::open(path.as_ref()))
}

/// Opens an in-memory database with the same bootstrap as [`open_db`].
pub fn open_db_in_memory() -> StoreResult<Connection> {
    open_with("memory", Connection::open_in_memory)
}

fn open_with(
    mode: &'static str,
    open: impl FnOnce() -> rusqlite::Result<Connection>,
) -> StoreResult<Connection> {
    let started_at = Instant::now();
    info!("event=db_open module=db status=start mode={mode}");

    let result = open()
        .and_then(|conn| {
            conn.busy_timeout(BUSY_TIMEOUT)?;
            Ok(conn)
        })
        .map_err(StoreError::OpenFailed)
        .and_then(|conn| {
            ensure_items_schema(&conn).map_err(StoreError::SchemaFailed)?;
            Ok(conn)
        });

    match &result {
        Ok(_) => info!(
            "event=db_open module=db status=ok mode={mode} duration_ms={}",
            started_at.elapsed().as_millis()
        ),
        Err(err) => error!(
            "event=db_open module=db status=error mode={mode} duration_ms={} error_code={} error={}",
            started_at.elapsed().as_millis(),
            error_code(err),
            err
        ),
    }

    result
}

fn error_code(err: &StoreError) -> &'static str {
    match err {
        StoreError::SchemaFailed(_) => "db_schema_failed",
        _ => "db_open_failed",
    }
}
