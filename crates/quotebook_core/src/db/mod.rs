//! SQLite storage bootstrap, schema migrations and transaction scope.
//!
//! # Responsibility
//! - Open and configure SQLite connections for quotebook core.
//! - Apply schema migrations in deterministic order.
//! - Provide the explicit unit-of-work helper used by every write path.
//!
//! # Invariants
//! - Migration version is tracked via `PRAGMA user_version`.
//! - Core code must not read/write application data before migrations succeed.
//! - A unit of work either commits fully or leaves no trace.

use rusqlite::{Connection, Transaction};
use thiserror::Error;

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("{0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("database schema version {db_version} is newer than supported {latest_supported}")]
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
}

/// Runs `work` inside one SQLite transaction.
///
/// Commits when `work` returns `Ok`. Any `Err` (or a panic unwinding through
/// this frame) drops the transaction, which rolls it back.
pub fn with_transaction<T, E, F>(conn: &mut Connection, work: F) -> Result<T, E>
where
    F: FnOnce(&Transaction<'_>) -> Result<T, E>,
    E: From<rusqlite::Error>,
{
    let tx = conn.transaction()?;
    let value = work(&tx)?;
    tx.commit()?;
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::{open_db_in_memory, with_transaction};

    fn row_count(conn: &rusqlite::Connection) -> i64 {
        conn.query_row("SELECT COUNT(*) FROM wise_sayings;", [], |row| row.get(0))
            .unwrap()
    }

    #[test]
    fn with_transaction_commits_on_ok() {
        let mut conn = open_db_in_memory().unwrap();

        with_transaction(&mut conn, |tx| {
            tx.execute(
                "INSERT INTO wise_sayings (content, author) VALUES ('a', 'b');",
                [],
            )
            .map(|_| ())
        })
        .unwrap();

        assert_eq!(row_count(&conn), 1);
    }

    #[test]
    fn with_transaction_rolls_back_on_err() {
        let mut conn = open_db_in_memory().unwrap();

        let result: Result<(), rusqlite::Error> = with_transaction(&mut conn, |tx| {
            tx.execute(
                "INSERT INTO wise_sayings (content, author) VALUES ('a', 'b');",
                [],
            )?;
            Err(rusqlite::Error::QueryReturnedNoRows)
        });

        assert!(result.is_err());
        assert_eq!(row_count(&conn), 0);
    }
}
