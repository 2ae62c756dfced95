//! Startup data seeding.
//!
//! # Responsibility
//! - Seed the fixed member set on an empty store.
//! - Apply the one-off nickname change to `user2` on every startup.
//!
//! # Invariants
//! - Each step runs in its own transaction (all-or-nothing per step).
//! - Seeding is skipped whenever at least one member exists.
//! - A missing `user2` is fatal; callers must abort startup.

use crate::db::with_transaction;
use crate::repo::member_repo::SqliteMemberRepository;
use crate::repo::RepoError;
use crate::service::member_service::{MemberService, MemberServiceError};
use log::{error, info};
use rusqlite::Connection;
use thiserror::Error;

/// `(username, password, nickname)` seeded on an empty store.
pub const SEED_MEMBERS: [(&str, &str, &str); 5] = [
    ("system", "1234", "시스템"),
    ("admin", "1234", "관리자"),
    ("user1", "1234", "유저1"),
    ("user2", "1234", "유저2"),
    ("user3", "1234", "유저3"),
];

pub const RENAMED_USERNAME: &str = "user2";
pub const RENAMED_NICKNAME: &str = "유저2 New";

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error("seed member `{0}` is missing")]
    MissingSeedMember(String),
    #[error(transparent)]
    Repo(#[from] RepoError),
}

impl From<rusqlite::Error> for BootstrapError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Repo(value.into())
    }
}

impl From<MemberServiceError> for BootstrapError {
    fn from(value: MemberServiceError) -> Self {
        match value {
            MemberServiceError::UnknownUsername(username) => Self::MissingSeedMember(username),
            MemberServiceError::Repo(err) => Self::Repo(err),
        }
    }
}

/// Progress through the two bootstrap steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootstrapStage {
    NotRun,
    MembersSeeded,
    User2Updated,
}

/// Outcome of a completed bootstrap run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootstrapReport {
    /// `0` when the store already had members.
    pub members_created: usize,
    pub stage: BootstrapStage,
}

/// Runs both seeding steps against `conn`.
///
/// # Errors
/// - `MissingSeedMember` when `user2` cannot be found in step two.
/// - `Repo` for any storage failure; the failing step is rolled back.
pub fn run_bootstrap(conn: &mut Connection) -> Result<BootstrapReport, BootstrapError> {
    let mut stage = BootstrapStage::NotRun;

    let members_created = with_transaction(conn, |tx| seed_members(tx)).inspect_err(|err| {
        error!("event=bootstrap module=bootstrap status=error step=seed_members stage={stage:?} error={err}");
    })?;
    stage = BootstrapStage::MembersSeeded;
    info!(
        "event=bootstrap module=bootstrap status=ok step=seed_members created={members_created}"
    );

    with_transaction(conn, |tx| rename_user2(tx)).inspect_err(|err| {
        error!("event=bootstrap module=bootstrap status=error step=rename_user2 stage={stage:?} error={err}");
    })?;
    stage = BootstrapStage::User2Updated;
    info!("event=bootstrap module=bootstrap status=ok step=rename_user2 username={RENAMED_USERNAME}");

    Ok(BootstrapReport {
        members_created,
        stage,
    })
}

fn seed_members(conn: &Connection) -> Result<usize, BootstrapError> {
    let service = MemberService::new(SqliteMemberRepository::new(conn));
    if service.count()? > 0 {
        return Ok(0);
    }

    for (username, password, nickname) in SEED_MEMBERS {
        service.join(username, password, nickname)?;
    }
    Ok(SEED_MEMBERS.len())
}

fn rename_user2(conn: &Connection) -> Result<(), BootstrapError> {
    let service = MemberService::new(SqliteMemberRepository::new(conn));
    service.change_nickname(RENAMED_USERNAME, RENAMED_NICKNAME)?;
    Ok(())
}
