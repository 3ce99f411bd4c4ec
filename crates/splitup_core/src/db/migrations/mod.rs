//! Slot schema steps for the project store file.
//!
//! Each step is one SQL script; the file's `user_version` records the last
//! step applied. Pending steps run in a single transaction.

use crate::db::{DbError, DbResult};
use log::info;
use rusqlite::Connection;

/// `(version, script)` pairs in ascending version order.
const SLOT_SCHEMA_STEPS: &[(u32, &str)] = &[(1, include_str!("0001_kv_slots.sql"))];

/// Slot schema version written by this build.
pub fn slot_schema_version() -> u32 {
    SLOT_SCHEMA_STEPS.last().map_or(0, |(version, _)| *version)
}

/// Creates or upgrades `kv_slots` on `conn`.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    let found = conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?;
    let supported = slot_schema_version();
    if found > supported {
        return Err(DbError::NewerSlotSchema { found, supported });
    }
    if found == supported {
        return Ok(());
    }

    let tx = conn.transaction()?;
    for (version, script) in SLOT_SCHEMA_STEPS.iter().filter(|(version, _)| *version > found) {
        tx.execute_batch(script)?;
        tx.pragma_update(None, "user_version", version)?;
    }
    tx.commit()?;

    info!("event=db_migrate module=db status=ok from_version={found} to_version={supported}");
    Ok(())
}
