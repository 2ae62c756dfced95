//! WiseSaying repository backed by the `wise_sayings` table.
//!
//! # Invariants
//! - Write paths call `WiseSaying::validate()` before SQL mutations.
//! - Read paths reject invalid persisted state instead of masking it.

use super::{
    count_to_u64, ensure_schema, parse_audit, EntityRepository, RepoError, RepoResult, NOW_MS_SQL,
};
use crate::model::audit::EntityId;
use crate::model::wise_saying::WiseSaying;
use rusqlite::{params, Connection, Row};

const WISE_SAYING_SELECT_SQL: &str = "SELECT
    id,
    content,
    author,
    created_at,
    modified_at
FROM wise_sayings";

/// SQLite-backed quote repository.
///
/// Borrows a connection, so it also runs on a `Transaction` through deref.
pub struct SqliteWiseSayingRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteWiseSayingRepository<'conn> {
    /// Wraps a migrated connection without checking it.
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    /// Wraps a connection after checking schema version and table presence.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_schema(conn, "wise_sayings")?;
        Ok(Self::new(conn))
    }
}

impl EntityRepository<WiseSaying> for SqliteWiseSayingRepository<'_> {
    fn count(&self) -> RepoResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM wise_sayings;", [], |row| row.get(0))?;
        count_to_u64(count)
    }

    fn save(&self, record: &mut WiseSaying) -> RepoResult<()> {
        record.validate()?;

        let id = if record.audit.is_new() {
            self.conn.execute(
                "INSERT INTO wise_sayings (content, author) VALUES (?1, ?2);",
                params![record.content.as_str(), record.author.as_str()],
            )?;
            self.conn.last_insert_rowid()
        } else {
            let changed = self.conn.execute(
                &format!(
                    "UPDATE wise_sayings
                     SET content = ?1, author = ?2, modified_at = {NOW_MS_SQL}
                     WHERE id = ?3;"
                ),
                params![
                    record.content.as_str(),
                    record.author.as_str(),
                    record.audit.id
                ],
            )?;
            if changed == 0 {
                return Err(RepoError::NotFound(record.audit.id));
            }
            record.audit.id
        };

        let stored = self.find_by_id(id)?.ok_or(RepoError::NotFound(id))?;
        record.audit = stored.audit;
        Ok(())
    }

    fn find_by_id(&self, id: EntityId) -> RepoResult<Option<WiseSaying>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{WISE_SAYING_SELECT_SQL} WHERE id = ?1;"))?;

        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_wise_saying_row(row)?));
        }

        Ok(None)
    }

    fn find_all(&self) -> RepoResult<Vec<WiseSaying>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{WISE_SAYING_SELECT_SQL} ORDER BY id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut sayings = Vec::new();

        while let Some(row) = rows.next()? {
            sayings.push(parse_wise_saying_row(row)?);
        }

        Ok(sayings)
    }

    fn delete(&self, record: &WiseSaying) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM wise_sayings WHERE id = ?1;", [record.id()])?;

        if changed == 0 {
            return Err(RepoError::NotFound(record.id()));
        }

        Ok(())
    }

    fn delete_all(&self) -> RepoResult<u64> {
        let removed = self.conn.execute("DELETE FROM wise_sayings;", [])?;
        Ok(removed as u64)
    }
}

fn parse_wise_saying_row(row: &Row<'_>) -> RepoResult<WiseSaying> {
    let saying = WiseSaying {
        audit: parse_audit(row)?,
        content: row.get("content")?,
        author: row.get("author")?,
    };
    saying.validate()?;
    Ok(saying)
}
