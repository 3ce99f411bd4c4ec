//! Key-value slot storage contracts and implementations.
//!
//! # Responsibility
//! - Provide whole-value read/overwrite of named slots.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - `write_slot` replaces the full value in one statement; readers never
//!   observe a partially written value.
//! - A missing slot reads as `None`, not as an error.

use crate::db::DbError;
use rusqlite::{params, Connection, OptionalExtension};
use std::cell::RefCell;
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for slot storage and project encoding.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    Codec(serde_json::Error),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Codec(err) => write!(f, "project codec failed: {err}"),
            Self::InvalidData(message) => write!(f, "invalid slot data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Codec(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<serde_json::Error> for RepoError {
    fn from(value: serde_json::Error) -> Self {
        Self::Codec(value)
    }
}

/// Named-slot persistence backend.
pub trait KeyValueStore {
    /// Reads the full value of `key`, or `None` when the slot is empty.
    fn read_slot(&self, key: &str) -> RepoResult<Option<Vec<u8>>>;
    /// Overwrites the full value of `key`.
    fn write_slot(&self, key: &str, value: &[u8]) -> RepoResult<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &S {
    fn read_slot(&self, key: &str) -> RepoResult<Option<Vec<u8>>> {
        (**self).read_slot(key)
    }

    fn write_slot(&self, key: &str, value: &[u8]) -> RepoResult<()> {
        (**self).write_slot(key, value)
    }
}

/// Borrowing SQLite slot store over a migrated connection.
pub struct SqliteKeyValueStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteKeyValueStore<'conn> {
    /// Wraps a connection returned by `open_db`/`open_db_in_memory`.
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl KeyValueStore for SqliteKeyValueStore<'_> {
    fn read_slot(&self, key: &str) -> RepoResult<Option<Vec<u8>>> {
        KeyValueStore::read_slot(self.conn, key)
    }

    fn write_slot(&self, key: &str, value: &[u8]) -> RepoResult<()> {
        KeyValueStore::write_slot(self.conn, key, value)
    }
}

/// Owning SQLite slot store, for sessions that keep one connection open.
///
/// The connection must come from `open_db`/`open_db_in_memory` so that
/// `kv_slots` exists.
impl KeyValueStore for Connection {
    fn read_slot(&self, key: &str) -> RepoResult<Option<Vec<u8>>> {
        let value = self
            .query_row(
                "SELECT slot_value FROM kv_slots WHERE slot_key = ?1;",
                [key],
                |row| row.get::<_, Vec<u8>>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn write_slot(&self, key: &str, value: &[u8]) -> RepoResult<()> {
        if key.trim().is_empty() {
            return Err(RepoError::InvalidData("slot key cannot be empty".to_string()));
        }
        self.execute(
            "INSERT INTO kv_slots (slot_key, slot_value, updated_at)
             VALUES (?1, ?2, strftime('%s', 'now') * 1000)
             ON CONFLICT(slot_key) DO UPDATE SET
                slot_value = excluded.slot_value,
                updated_at = excluded.updated_at;",
            params![key, value],
        )?;
        Ok(())
    }
}

/// In-memory slot store for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryKeyValueStore {
    slots: RefCell<HashMap<String, Vec<u8>>>,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn read_slot(&self, key: &str) -> RepoResult<Option<Vec<u8>>> {
        Ok(self.slots.borrow().get(key).cloned())
    }

    fn write_slot(&self, key: &str, value: &[u8]) -> RepoResult<()> {
        if key.trim().is_empty() {
            return Err(RepoError::InvalidData("slot key cannot be empty".to_string()));
        }
        self.slots
            .borrow_mut()
            .insert(key.to_string(), value.to_vec());
        Ok(())
    }
}
