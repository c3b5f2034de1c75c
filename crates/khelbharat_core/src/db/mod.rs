//! SQLite bootstrap for the local key-value store.
//!
//! # Responsibility
//! - Open and configure SQLite connections backing the slot store.
//! - Bring the `kv_slots` schema up to date before any slot is touched.
//!
//! # Invariants
//! - Schema version is tracked via `PRAGMA user_version`.
//! - A store written by a newer build is rejected, never downgraded.
//! - A connection handed out by `open_db*` always has `kv_slots`.

use rusqlite::Connection;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;

pub use migrations::schema_version;
pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

/// Failure while opening or preparing the slot store.
#[derive(Debug)]
pub enum DbError {
    /// Store file (or in-memory database) could not be opened.
    Connect(rusqlite::Error),
    /// Connection settings were refused.
    Configure(rusqlite::Error),
    /// Schema state could not be inspected.
    SchemaRead(rusqlite::Error),
    /// One slot-schema step failed and was rolled back.
    Migration { version: u32, source: rusqlite::Error },
    /// Store was written by a newer build.
    SchemaTooNew { found: u32, supported: u32 },
    /// Migrations finished but the slot table is still absent.
    SlotTableMissing,
}

impl DbError {
    /// Stable code for `error_code=` log fields.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Connect(_) => "store_connect_failed",
            Self::Configure(_) => "store_configure_failed",
            Self::SchemaRead(_) => "store_schema_read_failed",
            Self::Migration { .. } => "store_migration_failed",
            Self::SchemaTooNew { .. } => "store_schema_too_new",
            Self::SlotTableMissing => "store_slot_table_missing",
        }
    }
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Connect(err) => write!(f, "cannot open slot store: {err}"),
            Self::Configure(err) => write!(f, "cannot configure slot store: {err}"),
            Self::SchemaRead(err) => write!(f, "cannot read slot store schema: {err}"),
            Self::Migration { version, source } => {
                write!(f, "slot store migration {version} failed: {source}")
            }
            Self::SchemaTooNew { found, supported } => write!(
                f,
                "slot store schema {found} was written by a newer build (supported: {supported})"
            ),
            Self::SlotTableMissing => write!(f, "slot store has no kv_slots table"),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Connect(err) | Self::Configure(err) | Self::SchemaRead(err) => Some(err),
            Self::Migration { source, .. } => Some(source),
            Self::SchemaTooNew { .. } | Self::SlotTableMissing => None,
        }
    }
}

/// Whether the `kv_slots` table exists on this connection.
pub fn slot_table_exists(conn: &Connection) -> DbResult<bool> {
    conn.query_row(
        "SELECT EXISTS(
            SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'kv_slots'
        );",
        [],
        |row| row.get::<_, bool>(0),
    )
    .map_err(DbError::SchemaRead)
}
