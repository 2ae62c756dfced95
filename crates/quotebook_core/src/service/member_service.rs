//! Member use-case service used by bootstrap seeding.

use crate::model::member::Member;
use crate::repo::member_repo::MemberRepository;
use crate::repo::{RepoError, RepoResult};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MemberServiceError {
    #[error("member `{0}` does not exist")]
    UnknownUsername(String),
    #[error(transparent)]
    Repo(#[from] RepoError),
}

pub struct MemberService<R: MemberRepository> {
    repo: R,
}

impl<R: MemberRepository> MemberService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn count(&self) -> RepoResult<u64> {
        self.repo.count()
    }

    /// Registers a new member. Duplicate usernames fail with `UniqueViolation`.
    pub fn join(
        &self,
        username: impl Into<String>,
        password: impl Into<String>,
        nickname: impl Into<String>,
    ) -> RepoResult<Member> {
        let mut member = Member::new(username, password, nickname);
        self.repo.save(&mut member)?;
        Ok(member)
    }

    pub fn find_by_username(&self, username: &str) -> RepoResult<Option<Member>> {
        self.repo.find_by_username(username)
    }

    /// Looks up `username` and overwrites its nickname.
    pub fn change_nickname(
        &self,
        username: &str,
        nickname: impl Into<String>,
    ) -> Result<Member, MemberServiceError> {
        let mut member = self
            .repo
            .find_by_username(username)?
            .ok_or_else(|| MemberServiceError::UnknownUsername(username.to_string()))?;
        member.nickname = nickname.into();
        self.repo.save(&mut member)?;
        Ok(member)
    }
}
