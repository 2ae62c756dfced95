//! Person use-case service over the stub repository.

use crate::repo::person_repo::PersonRepository;
use crate::repo::RepoResult;

pub struct PersonService<R: PersonRepository> {
    repo: R,
}

impl<R: PersonRepository> PersonService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn count(&self) -> RepoResult<u64> {
        self.repo.count()
    }
}
