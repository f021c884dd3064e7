//! SQLite storage bootstrap for client-local state.
//!
//! # Responsibility
//! - Open and configure the SQLite connection backing the key/value store.
//! - Apply schema migrations in deterministic order.
//!
//! # Invariants
//! - Migration version is tracked via `PRAGMA user_version`.
//! - Snapshot reads/writes happen only after migrations succeed.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

/// Failure opening or migrating the key/value store.
#[derive(Debug)]
pub enum DbError {
    /// SQLite rejected a statement or pragma against `kv_entries`.
    Sqlite(rusqlite::Error),
    /// The file was written by a newer build; its `user_version` is past the
    /// last bundled migration, so it is left untouched.
    SchemaTooNew { stored: u32, supported: u32 },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "key/value store sqlite error: {err}"),
            Self::SchemaTooNew { stored, supported } => write!(
                f,
                "key/value store schema v{stored} is newer than this build supports (v{supported})"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::SchemaTooNew { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
