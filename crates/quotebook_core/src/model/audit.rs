//! Identity and timestamps embedded in every persisted record.

use serde::{Deserialize, Serialize};

/// Storage-assigned record identifier (SQLite rowid).
pub type EntityId = i64;

/// Identity plus creation/modification timestamps.
///
/// Timestamps are Unix epoch milliseconds written by storage, never by callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Audit {
    pub id: EntityId,
    pub created_at: i64,
    pub modified_at: i64,
}

impl Audit {
    /// Marker for records that have not been saved yet.
    ///
    /// AUTOINCREMENT keys start at 1, so id `0` never collides with a row.
    pub const UNSAVED: Self = Self {
        id: 0,
        created_at: 0,
        modified_at: 0,
    };

    pub fn is_new(&self) -> bool {
        self.id == 0
    }
}

impl Default for Audit {
    fn default() -> Self {
        Self::UNSAVED
    }
}
