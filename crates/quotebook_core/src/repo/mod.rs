//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the generic entity-store contract shared by all record types.
//! - Isolate SQLite query details from service/business orchestration.
//!
//! # Invariants
//! - Repository writes must enforce record `validate()` before persistence.
//! - Repository APIs return semantic errors (`NotFound`, `UniqueViolation`)
//!   in addition to DB transport errors.

pub mod member_repo;
pub mod person_repo;
pub mod wise_saying_repo;

use crate::db::migrations::{current_user_version, latest_version};
use crate::db::DbError;
use crate::model::audit::{Audit, EntityId};
use crate::model::ValidationError;
use rusqlite::{Connection, Row};
use thiserror::Error;

pub type RepoResult<T> = Result<T, RepoError>;

/// Generic repository error for persistence and query operations.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Db(#[from] DbError),
    #[error("record not found: {0}")]
    NotFound(EntityId),
    #[error("unique constraint violated: {0}")]
    UniqueViolation(String),
    #[error("invalid persisted data: {0}")]
    InvalidData(String),
    #[error("connection schema version {actual_version} is older than required {expected_version}")]
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    #[error("required table `{0}` is missing")]
    MissingRequiredTable(&'static str),
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::SqliteFailure(err, message)
                if err.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE =>
            {
                Self::UniqueViolation(message.unwrap_or_else(|| err.to_string()))
            }
            other => Self::Db(DbError::Sqlite(other)),
        }
    }
}

/// Durable record storage keyed by auto-incrementing integer id.
pub trait EntityRepository<T> {
    /// Number of persisted records.
    fn count(&self) -> RepoResult<u64>;

    /// Inserts a new record or overwrites an existing one.
    ///
    /// # Contract
    /// - `audit.id == 0`: inserts and assigns the next id.
    /// - Otherwise overwrites stored fields and refreshes `modified_at`;
    ///   `NotFound` when no row has that id. Never inserts under a caller id.
    /// - On success `record.audit` mirrors storage.
    fn save(&self, record: &mut T) -> RepoResult<()>;

    fn find_by_id(&self, id: EntityId) -> RepoResult<Option<T>>;

    /// All records in ascending id order.
    fn find_all(&self) -> RepoResult<Vec<T>>;

    /// Removes one record; `NotFound` when it is already gone.
    fn delete(&self, record: &T) -> RepoResult<()>;

    /// Removes every record and returns how many were removed.
    fn delete_all(&self) -> RepoResult<u64>;
}

/// Current time in epoch milliseconds, as an SQL expression.
pub(crate) const NOW_MS_SQL: &str = "CAST(unixepoch('subsec') * 1000 AS INTEGER)";

/// Rejects connections that were not opened through `db::open_*`.
pub(crate) fn ensure_schema(conn: &Connection, table: &'static str) -> RepoResult<()> {
    let actual_version = current_user_version(conn)?;
    let expected_version = latest_version();
    if actual_version < expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    let exists: bool = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    if !exists {
        return Err(RepoError::MissingRequiredTable(table));
    }

    Ok(())
}

pub(crate) fn parse_audit(row: &Row<'_>) -> RepoResult<Audit> {
    let id: EntityId = row.get("id")?;
    if id <= 0 {
        return Err(RepoError::InvalidData(format!("invalid id value `{id}`")));
    }

    Ok(Audit {
        id,
        created_at: row.get("created_at")?,
        modified_at: row.get("modified_at")?,
    })
}

pub(crate) fn count_to_u64(value: i64) -> RepoResult<u64> {
    u64::try_from(value).map_err(|_| RepoError::InvalidData(format!("negative row count `{value}`")))
}
