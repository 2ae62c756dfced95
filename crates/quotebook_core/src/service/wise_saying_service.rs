//! WiseSaying use-case service.
//!
//! # Responsibility
//! - Provide write/list/find/modify/delete entry points for quotes.
//! - Delegate persistence to an `EntityRepository<WiseSaying>`.
//!
//! # Invariants
//! - Blank content or author never reaches storage.
//! - Records are never cached across calls.

use crate::model::audit::EntityId;
use crate::model::wise_saying::{validate_fields, WiseSaying};
use crate::model::ValidationError;
use crate::repo::{EntityRepository, RepoError, RepoResult};
use log::info;
use thiserror::Error;

/// Service error for quote use-cases.
#[derive(Debug, Error)]
pub enum WiseSayingServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("quote {0} does not exist")]
    NotFound(EntityId),
    #[error(transparent)]
    Repo(RepoError),
}

impl From<RepoError> for WiseSayingServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::Validation(err) => Self::Validation(err),
            RepoError::NotFound(id) => Self::NotFound(id),
            other => Self::Repo(other),
        }
    }
}

impl From<rusqlite::Error> for WiseSayingServiceError {
    fn from(value: rusqlite::Error) -> Self {
        RepoError::from(value).into()
    }
}

pub type WiseSayingResult<T> = Result<T, WiseSayingServiceError>;

pub struct WiseSayingService<R: EntityRepository<WiseSaying>> {
    repo: R,
}

impl<R: EntityRepository<WiseSaying>> WiseSayingService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates and persists a quote.
    ///
    /// # Contract
    /// - Fails with `Validation` before touching storage when either field is blank.
    /// - Returns the stored record with its assigned id.
    pub fn write(
        &self,
        content: impl Into<String>,
        author: impl Into<String>,
    ) -> WiseSayingResult<WiseSaying> {
        let mut saying = WiseSaying::new(content, author);
        saying.validate()?;
        self.repo.save(&mut saying)?;

        info!(
            "event=wise_saying_write module=service status=ok id={}",
            saying.id()
        );
        Ok(saying)
    }

    /// Lists every quote in id order.
    pub fn find_all(&self) -> RepoResult<Vec<WiseSaying>> {
        self.repo.find_all()
    }

    pub fn find_by_id(&self, id: EntityId) -> RepoResult<Option<WiseSaying>> {
        self.repo.find_by_id(id)
    }

    /// Replaces content and author of an already-fetched quote.
    ///
    /// Fails with `NotFound` when the record was deleted after it was fetched.
    pub fn modify(
        &self,
        saying: &mut WiseSaying,
        content: impl Into<String>,
        author: impl Into<String>,
    ) -> WiseSayingResult<()> {
        let content = content.into();
        let author = author.into();
        validate_fields(&content, &author)?;

        saying.content = content;
        saying.author = author;
        self.repo.save(saying)?;

        info!(
            "event=wise_saying_modify module=service status=ok id={}",
            saying.id()
        );
        Ok(())
    }

    pub fn delete(&self, saying: &WiseSaying) -> WiseSayingResult<()> {
        self.repo.delete(saying)?;

        info!(
            "event=wise_saying_delete module=service status=ok id={}",
            saying.id()
        );
        Ok(())
    }

    pub fn count(&self) -> RepoResult<u64> {
        self.repo.count()
    }
}
