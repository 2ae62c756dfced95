//! Domain records persisted by the entity store.
//!
//! # Responsibility
//! - Define canonical data structures used by core business logic.
//! - Share audit metadata through composition (`Audit`), not inheritance.
//!
//! # Invariants
//! - Every persisted record is identified by a stable, storage-assigned `EntityId`.
//! - A record with `Audit::UNSAVED` has never been written.

pub mod audit;
pub mod member;
pub mod wise_saying;

use thiserror::Error;

/// Field-level validation failures shared by all records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Content cannot be null or blank")]
    BlankContent,
    #[error("Author cannot be null or blank")]
    BlankAuthor,
    #[error("Username cannot be null or blank")]
    BlankUsername,
}

/// Whitespace-only values count as blank.
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}
