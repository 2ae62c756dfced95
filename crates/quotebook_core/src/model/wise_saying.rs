//! WiseSaying (quote) domain model.
//!
//! # Invariants
//! - `audit.id` is immutable once assigned by storage.
//! - `content` and `author` are non-blank at creation and every modification.

use super::audit::{Audit, EntityId};
use super::{is_blank, ValidationError};
use serde::{Deserialize, Serialize};

/// An attributed quote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WiseSaying {
    #[serde(flatten)]
    pub audit: Audit,
    /// Markdown source, rendered to HTML only on the detail view.
    pub content: String,
    pub author: String,
}

impl WiseSaying {
    /// Creates an unsaved quote. Does not validate; repositories do on write.
    pub fn new(content: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            audit: Audit::UNSAVED,
            content: content.into(),
            author: author.into(),
        }
    }

    pub fn id(&self) -> EntityId {
        self.audit.id
    }

    /// Checks field invariants. Content is reported before author.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_fields(&self.content, &self.author)
    }
}

/// Validates raw quote input before any record exists.
pub fn validate_fields(content: &str, author: &str) -> Result<(), ValidationError> {
    if is_blank(content) {
        return Err(ValidationError::BlankContent);
    }
    if is_blank(author) {
        return Err(ValidationError::BlankAuthor);
    }
    Ok(())
}
