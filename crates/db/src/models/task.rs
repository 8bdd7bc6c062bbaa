//! Task entity model and DTOs.

use chrono::NaiveDateTime;
use reno_core::archival::ArchiveState;
use reno_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A task row from the `tasks` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Task {
    pub id: DbId,
    pub project_id: DbId,
    pub name: String,
    pub start_datetime: NaiveDateTime,
    pub end_datetime: NaiveDateTime,
    #[sqlx(rename = "archived_at", try_from = "Option<Timestamp>")]
    #[serde(flatten)]
    pub archive: ArchiveState,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new task.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTask {
    pub project_id: DbId,
    pub name: String,
    pub start_datetime: NaiveDateTime,
    pub end_datetime: NaiveDateTime,
}

/// DTO for updating an existing task. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTask {
    pub project_id: Option<DbId>,
    pub name: Option<String>,
    pub start_datetime: Option<NaiveDateTime>,
    pub end_datetime: Option<NaiveDateTime>,
}
