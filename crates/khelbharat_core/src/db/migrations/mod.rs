//! Slot-store schema steps and the runner that applies them.
//!
//! # Invariants
//! - `version` values are strictly increasing.
//! - Each step commits in its own transaction together with its
//!   `PRAGMA user_version`, so a failed step leaves earlier steps applied.

use crate::db::{slot_table_exists, DbError, DbResult};
use log::{error, info};
use rusqlite::Connection;

#[derive(Debug, Clone, Copy)]
struct Migration {
    version: u32,
    name: &'static str,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    name: "kv_slots",
    sql: include_str!("0001_kv_slots.sql"),
}];

/// Latest slot-store schema version known by this build.
pub fn latest_version() -> u32 {
    MIGRATIONS.last().map_or(0, |migration| migration.version)
}

/// Schema version recorded in the store.
pub fn schema_version(conn: &Connection) -> DbResult<u32> {
    conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))
        .map_err(DbError::SchemaRead)
}

/// Applies every pending step, then checks the slot table is usable.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    let found = schema_version(conn)?;
    let supported = latest_version();
    if found > supported {
        return Err(DbError::SchemaTooNew { found, supported });
    }

    for migration in MIGRATIONS
        .iter()
        .filter(|migration| migration.version > found)
    {
        apply_step(conn, migration).map_err(|source| {
            error!(
                "event=db_migrate module=db status=error version={} step={} error_code=store_migration_failed",
                migration.version, migration.name
            );
            DbError::Migration {
                version: migration.version,
                source,
            }
        })?;
        info!(
            "event=db_migrate module=db status=ok version={} step={}",
            migration.version, migration.name
        );
    }

    if !slot_table_exists(conn)? {
        return Err(DbError::SlotTableMissing);
    }
    Ok(())
}

fn apply_step(conn: &mut Connection, migration: &Migration) -> rusqlite::Result<()> {
    let tx = conn.transaction()?;
    tx.execute_batch(migration.sql)?;
    tx.pragma_update(None, "user_version", migration.version)?;
    tx.commit()
}
