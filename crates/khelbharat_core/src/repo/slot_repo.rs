//! Key-value slot repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide string get/set/remove over named slots.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - A slot holds at most one value; `set_slot` overwrites (last writer wins).
//! - Values are stored verbatim; no parsing happens at this layer.

use crate::db::{slot_table_exists, DbError};
use rusqlite::{params, Connection, OptionalExtension};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StoreResult<T> = Result<T, StoreError>;

/// Slot repository failure.
#[derive(Debug)]
pub enum StoreError {
    /// Slot query or upsert failed.
    Query(rusqlite::Error),
    /// Slot schema could not be inspected.
    Schema(DbError),
    /// Connection exists but the slot schema was never migrated.
    SchemaNotReady,
    /// Backend refused the operation (disabled or quota-limited storage).
    Unavailable(String),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Query(err) => write!(f, "slot query failed: {err}"),
            Self::Schema(err) => write!(f, "{err}"),
            Self::SchemaNotReady => write!(f, "slot store schema is not migrated"),
            Self::Unavailable(reason) => write!(f, "slot store unavailable: {reason}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Query(err) => Some(err),
            Self::Schema(err) => Some(err),
            Self::SchemaNotReady | Self::Unavailable(_) => None,
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Schema(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Query(value)
    }
}

/// Repository interface for named string slots.
pub trait SlotRepository {
    /// Returns the slot value, or `None` when the slot was never written.
    fn get_slot(&self, key: &str) -> StoreResult<Option<String>>;
    /// Creates or overwrites one slot.
    fn set_slot(&self, key: &str, value: &str) -> StoreResult<()>;
    /// Removes one slot; returns whether it existed.
    fn remove_slot(&self, key: &str) -> StoreResult<bool>;
}

impl<R: SlotRepository + ?Sized> SlotRepository for &R {
    fn get_slot(&self, key: &str) -> StoreResult<Option<String>> {
        (**self).get_slot(key)
    }

    fn set_slot(&self, key: &str, value: &str) -> StoreResult<()> {
        (**self).set_slot(key, value)
    }

    fn remove_slot(&self, key: &str) -> StoreResult<bool> {
        (**self).remove_slot(key)
    }
}

/// SQLite-backed slot repository over the `kv_slots` table.
pub struct SqliteSlotRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteSlotRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    ///
    /// Fails with `SchemaNotReady` when `kv_slots` is missing, so callers must
    /// open connections through `db::open_db*`.
    pub fn try_new(conn: &'conn Connection) -> StoreResult<Self> {
        if !slot_table_exists(conn)? {
            return Err(StoreError::SchemaNotReady);
        }
        Ok(Self { conn })
    }
}

impl SlotRepository for SqliteSlotRepository<'_> {
    fn get_slot(&self, key: &str) -> StoreResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_slots WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set_slot(&self, key: &str, value: &str) -> StoreResult<()> {
        self.conn.execute(
            "INSERT INTO kv_slots (key, value, updated_at)
             VALUES (?1, ?2, (strftime('%s', 'now') * 1000))
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![key, value],
        )?;
        Ok(())
    }

    fn remove_slot(&self, key: &str) -> StoreResult<bool> {
        let changed = self
            .conn
            .execute("DELETE FROM kv_slots WHERE key = ?1;", [key])?;
        Ok(changed > 0)
    }
}
