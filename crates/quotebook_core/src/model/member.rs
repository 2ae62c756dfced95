//! Member domain model, populated by bootstrap seeding.

use super::audit::{Audit, EntityId};
use super::{is_blank, ValidationError};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    #[serde(flatten)]
    pub audit: Audit,
    /// Unique across all members.
    pub username: String,
    pub password: String,
    pub nickname: String,
}

impl Member {
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        nickname: impl Into<String>,
    ) -> Self {
        Self {
            audit: Audit::UNSAVED,
            username: username.into(),
            password: password.into(),
            nickname: nickname.into(),
        }
    }

    pub fn id(&self) -> EntityId {
        self.audit.id
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if is_blank(&self.username) {
            return Err(ValidationError::BlankUsername);
        }
        Ok(())
    }
}
