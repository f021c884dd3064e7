//! Team snapshot repository over the SQLite key/value table.
//!
//! Two independent entries are kept: the JSON team array under
//! [`TEAMS_KEY`] and the selected team id, as decimal text, under
//! [`SELECTED_TEAM_KEY`].

use crate::db::DbError;
use crate::model::project::TeamId;
use crate::model::team::Team;
use log::warn;
use rusqlite::{params, Connection, OptionalExtension};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Key of the serialized team collection.
pub const TEAMS_KEY: &str = "teams";
/// Key of the selected team id.
pub const SELECTED_TEAM_KEY: &str = "selectedTeam";

pub type RepoResult<T> = Result<T, RepoError>;

/// Snapshot persistence error.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    Encode(serde_json::Error),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Encode(err) => write!(f, "failed to encode snapshot: {err}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Encode(err) => Some(err),
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
        Self::Encode(value)
    }
}

/// Load/save contract used by the team store.
pub trait SnapshotRepository {
    /// Returns the persisted team collection, or `None` when absent or unparseable.
    fn load_teams(&self) -> Option<Vec<Team>>;
    /// Replaces the persisted team collection.
    fn save_teams(&self, teams: &[Team]) -> RepoResult<()>;
    /// Returns the persisted selected id, or `None` when absent, malformed or zero.
    fn load_selected_team_id(&self) -> Option<TeamId>;
    /// Replaces the persisted selected id.
    fn save_selected_team_id(&self, id: TeamId) -> RepoResult<()>;
}

/// SQLite-backed snapshot repository.
pub struct SqliteSnapshotRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteSnapshotRepository<'conn> {
    /// Wraps a connection returned by [`crate::db::open_db`].
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    /// Reads one raw entry.
    pub fn get_entry(&self, key: &str) -> RepoResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_entries WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    /// Writes one raw entry, replacing any previous value.
    pub fn put_entry(&self, key: &str, value: &str) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO kv_entries (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![key, value],
        )?;
        Ok(())
    }

    fn read_soft(&self, key: &str) -> Option<String> {
        match self.get_entry(key) {
            Ok(value) => value,
            Err(err) => {
                warn!("event=snapshot_load module=repo status=error key={key} error={err}");
                None
            }
        }
    }
}

impl SnapshotRepository for SqliteSnapshotRepository<'_> {
    fn load_teams(&self) -> Option<Vec<Team>> {
        let raw = self.read_soft(TEAMS_KEY)?;
        match serde_json::from_str::<Vec<Team>>(&raw) {
            Ok(teams) => Some(teams),
            Err(err) => {
                warn!(
                    "event=snapshot_load module=repo status=error key={TEAMS_KEY} error_code=malformed_json line={} column={}",
                    err.line(),
                    err.column()
                );
                None
            }
        }
    }

    fn save_teams(&self, teams: &[Team]) -> RepoResult<()> {
        let encoded = serde_json::to_string(teams)?;
        self.put_entry(TEAMS_KEY, &encoded)
    }

    fn load_selected_team_id(&self) -> Option<TeamId> {
        let raw = self.read_soft(SELECTED_TEAM_KEY)?;
        parse_selected_team_id(&raw)
    }

    fn save_selected_team_id(&self, id: TeamId) -> RepoResult<()> {
        self.put_entry(SELECTED_TEAM_KEY, &id.to_string())
    }
}

fn parse_selected_team_id(raw: &str) -> Option<TeamId> {
    match raw.trim().parse::<TeamId>() {
        Ok(0) | Err(_) => None,
        Ok(id) => Some(id),
    }
}
