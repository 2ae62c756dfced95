//! Person repository stub.
//!
//! There is no `people` table: the count is a fixed value, tagged in logs
//! with the application version the repository was built with.

use super::RepoResult;
use log::info;

const STUB_PERSON_COUNT: u64 = 3;

pub trait PersonRepository {
    fn count(&self) -> RepoResult<u64>;
}

/// Storage-free person repository.
#[derive(Debug, Clone, Copy)]
pub struct StubPersonRepository {
    version: u32,
}

impl StubPersonRepository {
    pub fn new(version: u32) -> Self {
        Self { version }
    }

    pub fn version(&self) -> u32 {
        self.version
    }
}

impl PersonRepository for StubPersonRepository {
    fn count(&self) -> RepoResult<u64> {
        info!(
            "event=person_count module=repo status=ok call=PersonRepository(v{}).count() count={}",
            self.version, STUB_PERSON_COUNT
        );
        Ok(STUB_PERSON_COUNT)
    }
}
