//! Work session and work session entry models and DTOs.
//!
//! A work session is one day of work on a task; its entries are the
//! individual clock-in/clock-out intervals of the laborers on site. Entries
//! are owned by the session and are always written together with it.

use chrono::{NaiveDate, NaiveTime};
use reno_core::archival::ArchiveState;
use reno_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `work_sessions` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct WorkSession {
    pub id: DbId,
    pub project_id: DbId,
    pub task_id: DbId,
    pub work_date: NaiveDate,
    #[sqlx(rename = "archived_at", try_from = "Option<Timestamp>")]
    #[serde(flatten)]
    pub archive: ArchiveState,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `work_session_entries` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct WorkSessionEntry {
    pub id: DbId,
    pub work_session_id: DbId,
    pub laborer_id: DbId,
    pub clock_in_time: NaiveTime,
    pub clock_out_time: NaiveTime,
}

/// A session together with all of its entries.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkSessionWithEntries {
    #[serde(flatten)]
    pub session: WorkSession,
    pub entries: Vec<WorkSessionEntry>,
}

/// One entry in a create/update payload.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateWorkSessionEntry {
    pub laborer_id: DbId,
    pub clock_in_time: NaiveTime,
    pub clock_out_time: NaiveTime,
}

/// DTO for creating a session and its entries in one write.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateWorkSession {
    pub project_id: DbId,
    pub task_id: DbId,
    pub work_date: NaiveDate,
    #[serde(default)]
    pub entries: Vec<CreateWorkSessionEntry>,
}

/// DTO for updating a session.
///
/// When `entries` is present it replaces the session's entries wholesale;
/// when absent the existing entries are kept.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateWorkSession {
    pub project_id: Option<DbId>,
    pub task_id: Option<DbId>,
    pub work_date: Option<NaiveDate>,
    pub entries: Option<Vec<CreateWorkSessionEntry>>,
}
