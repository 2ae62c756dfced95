//! Quotebook schema migrations.
//!
//! | version | file                | adds                                   |
//! |---------|---------------------|----------------------------------------|
//! | 1       | `0001_init.sql`     | `wise_sayings` (quotes)                |
//! | 2       | `0002_members.sql`  | `members`, unique on `username`        |
//!
//! Both tables use `AUTOINCREMENT` ids, so a deleted id is never handed out
//! again, and default `created_at`/`modified_at` to epoch milliseconds.
//!
//! # Invariants
//! - Versions are strictly increasing with no gaps.
//! - The highest applied version is stored in `PRAGMA user_version`.
//! - All pending steps run in one transaction; a failing step leaves the
//!   database at its previous version.

use crate::db::{DbError, DbResult};
use log::info;
use rusqlite::Connection;

#[derive(Debug, Clone, Copy)]
struct SchemaStep {
    version: u32,
    name: &'static str,
    sql: &'static str,
}

const SCHEMA_STEPS: &[SchemaStep] = &[
    SchemaStep {
        version: 1,
        name: "wise_sayings",
        sql: include_str!("0001_init.sql"),
    },
    SchemaStep {
        version: 2,
        name: "members",
        sql: include_str!("0002_members.sql"),
    },
];

/// Schema version this binary migrates to.
pub fn latest_version() -> u32 {
    SCHEMA_STEPS.last().map_or(0, |step| step.version)
}

/// Brings `conn` up to `latest_version()` and returns how many steps ran.
///
/// # Errors
/// - `UnsupportedSchemaVersion` when the file was written by a newer binary.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<u32> {
    let from = current_user_version(conn)?;
    let latest = latest_version();

    if from > latest {
        return Err(DbError::UnsupportedSchemaVersion {
            db_version: from,
            latest_supported: latest,
        });
    }

    let pending: Vec<&SchemaStep> = SCHEMA_STEPS
        .iter()
        .filter(|step| step.version > from)
        .collect();
    if pending.is_empty() {
        return Ok(0);
    }

    let tx = conn.transaction()?;
    for step in &pending {
        tx.execute_batch(step.sql)?;
        tx.pragma_update(None, "user_version", step.version)?;
    }
    tx.commit()?;

    for step in &pending {
        info!(
            "event=db_migrate module=db status=ok version={} name={}",
            step.version, step.name
        );
    }
    Ok(pending.len() as u32)
}

/// Reads `PRAGMA user_version`; `0` for a fresh database.
pub fn current_user_version(conn: &Connection) -> DbResult<u32> {
    let version = conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?;
    Ok(version)
}
