//! Archive (soft-delete) state shared by every ledger entity.
//!
//! Rows are never flagged by a bare nullable column in the domain model:
//! the persisted `archived_at` timestamp is lifted into [`ArchiveState`] so
//! the timestamp only exists when the record is actually archived.

use serde::{Deserialize, Serialize};

use crate::types::Timestamp;

/// Lifecycle state of a record that has not been hard-deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ArchiveState {
    Active,
    Archived { archived_at: Timestamp },
}

impl ArchiveState {
    pub fn is_archived(&self) -> bool {
        matches!(self, Self::Archived { .. })
    }

    pub fn archived_at(&self) -> Option<Timestamp> {
        match self {
            Self::Active => None,
            Self::Archived { archived_at } => Some(*archived_at),
        }
    }

    /// Transition to `Archived`. Already-archived records keep their
    /// original timestamp.
    pub fn archive(self, now: Timestamp) -> Self {
        match self {
            Self::Active => Self::Archived { archived_at: now },
            archived @ Self::Archived { .. } => archived,
        }
    }

    /// Transition back to `Active`.
    pub fn restore(self) -> Self {
        Self::Active
    }
}

impl Default for ArchiveState {
    fn default() -> Self {
        Self::Active
    }
}

impl From<Option<Timestamp>> for ArchiveState {
    fn from(archived_at: Option<Timestamp>) -> Self {
        match archived_at {
            Some(archived_at) => Self::Archived { archived_at },
            None => Self::Active,
        }
    }
}
