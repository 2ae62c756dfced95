//! Core domain logic for Quotebook.
//! This crate is the single source of truth for record invariants and storage.

pub mod bootstrap;
pub mod db;
pub mod logging;
pub mod markdown;
pub mod model;
pub mod repo;
pub mod service;

pub use bootstrap::{run_bootstrap, BootstrapError, BootstrapReport, BootstrapStage};
pub use db::{open_db, open_db_in_memory, with_transaction, DbError};
pub use logging::{default_log_level, init_logging, logging_status, LogTarget};
pub use markdown::MarkdownRenderer;
pub use model::audit::{Audit, EntityId};
pub use model::member::Member;
pub use model::wise_saying::WiseSaying;
pub use model::ValidationError;
pub use repo::member_repo::{MemberRepository, SqliteMemberRepository};
pub use repo::person_repo::{PersonRepository, StubPersonRepository};
pub use repo::wise_saying_repo::SqliteWiseSayingRepository;
pub use repo::{EntityRepository, RepoError, RepoResult};
pub use service::member_service::{MemberService, MemberServiceError};
pub use service::person_service::PersonService;
pub use service::wise_saying_service::{WiseSayingService, WiseSayingServiceError};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
