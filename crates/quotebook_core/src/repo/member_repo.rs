//! Member repository backed by the `members` table.
//!
//! # Invariants
//! - `username` uniqueness is enforced by storage and surfaced as
//!   `RepoError::UniqueViolation`.

use super::{
    count_to_u64, ensure_schema, parse_audit, EntityRepository, RepoError, RepoResult, NOW_MS_SQL,
};
use crate::model::audit::EntityId;
use crate::model::member::Member;
use rusqlite::{params, Connection, Row};

const MEMBER_SELECT_SQL: &str = "SELECT
    id,
    username,
    password,
    nickname,
    created_at,
    modified_at
FROM members";

/// Member lookups beyond the generic entity-store contract.
pub trait MemberRepository: EntityRepository<Member> {
    fn find_by_username(&self, username: &str) -> RepoResult<Option<Member>>;
}

pub struct SqliteMemberRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteMemberRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_schema(conn, "members")?;
        Ok(Self::new(conn))
    }

    fn query_one(&self, filter: &str, value: &dyn rusqlite::ToSql) -> RepoResult<Option<Member>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{MEMBER_SELECT_SQL} WHERE {filter} = ?1;"))?;

        let mut rows = stmt.query([value])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_member_row(row)?));
        }

        Ok(None)
    }
}

impl EntityRepository<Member> for SqliteMemberRepository<'_> {
    fn count(&self) -> RepoResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM members;", [], |row| row.get(0))?;
        count_to_u64(count)
    }

    fn save(&self, record: &mut Member) -> RepoResult<()> {
        record.validate()?;

        let id = if record.audit.is_new() {
            self.conn.execute(
                "INSERT INTO members (username, password, nickname) VALUES (?1, ?2, ?3);",
                params![
                    record.username.as_str(),
                    record.password.as_str(),
                    record.nickname.as_str()
                ],
            )?;
            self.conn.last_insert_rowid()
        } else {
            let changed = self.conn.execute(
                &format!(
                    "UPDATE members
                     SET username = ?1, password = ?2, nickname = ?3, modified_at = {NOW_MS_SQL}
                     WHERE id = ?4;"
                ),
                params![
                    record.username.as_str(),
                    record.password.as_str(),
                    record.nickname.as_str(),
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

    fn find_by_id(&self, id: EntityId) -> RepoResult<Option<Member>> {
        self.query_one("id", &id)
    }

    fn find_all(&self) -> RepoResult<Vec<Member>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{MEMBER_SELECT_SQL} ORDER BY id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut members = Vec::new();

        while let Some(row) = rows.next()? {
            members.push(parse_member_row(row)?);
        }

        Ok(members)
    }

    fn delete(&self, record: &Member) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM members WHERE id = ?1;", [record.id()])?;

        if changed == 0 {
            return Err(RepoError::NotFound(record.id()));
        }

        Ok(())
    }

    fn delete_all(&self) -> RepoResult<u64> {
        let removed = self.conn.execute("DELETE FROM members;", [])?;
        Ok(removed as u64)
    }
}

impl MemberRepository for SqliteMemberRepository<'_> {
    fn find_by_username(&self, username: &str) -> RepoResult<Option<Member>> {
        self.query_one("username", &username)
    }
}

fn parse_member_row(row: &Row<'_>) -> RepoResult<Member> {
    let member = Member {
        audit: parse_audit(row)?,
        username: row.get("username")?,
        password: row.get("password")?,
        nickname: row.get("nickname")?,
    };
    member.validate()?;
    Ok(member)
}
