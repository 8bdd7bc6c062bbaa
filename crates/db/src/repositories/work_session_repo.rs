//! Repository for `work_sessions` and their `work_session_entries`.
//!
//! Entries have no life of their own: they are inserted, replaced and
//! deleted only through their session, always in the session's transaction.

use std::collections::HashMap;

use chrono::Utc;
use reno_core::pagination::{Page, PageRequest};
use reno_core::types::DbId;
use reno_core::validation::validate_clock_span;
use sqlx::{SqliteConnection, SqlitePool};

use super::support::{self, Conditions};
use crate::error::DbError;
use crate::models::filter::WorkSessionFilter;
use crate::models::work_session::{
    CreateWorkSession, CreateWorkSessionEntry, UpdateWorkSession, WorkSession, WorkSessionEntry,
    WorkSessionWithEntries,
};

const COLUMNS: &str = "id, project_id, task_id, work_date, archived_at, created_at, updated_at";

const ENTRY_COLUMNS: &str = "id, work_session_id, laborer_id, clock_in_time, clock_out_time";

const ENTITY: &str = "WorkSession";

/// Provides CRUD and archival operations for work sessions.
pub struct WorkSessionRepo;

impl WorkSessionRepo {
    /// Insert a session together with its entries.
    ///
    /// Either the session and every entry are stored, or nothing is.
    pub async fn create(
        pool: &SqlitePool,
        input: &CreateWorkSession,
    ) -> Result<WorkSessionWithEntries, DbError> {
        validate_entries(&input.entries)?;

        let mut tx = pool.begin().await?;
        support::ensure_exists(&mut tx, "projects", "project_id", input.project_id).await?;
        support::ensure_task_in_project(&mut tx, input.task_id, input.project_id).await?;
        check_laborers(&mut tx, &input.entries).await?;

        let now = Utc::now();
        let query = format!(
            "INSERT INTO work_sessions (project_id, task_id, work_date, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?)
             RETURNING {COLUMNS}"
        );
        let session = sqlx::query_as::<_, WorkSession>(&query)
            .bind(input.project_id)
            .bind(input.task_id)
            .bind(input.work_date)
            .bind(now)
            .bind(now)
            .fetch_one(&mut *tx)
            .await?;

        let entries = insert_entries(&mut tx, session.id, &input.entries).await?;

        tx.commit().await?;
        tracing::info!(
            session_id = session.id,
            project_id = session.project_id,
            entry_count = entries.len(),
            "Work session created",
        );
        Ok(WorkSessionWithEntries { session, entries })
    }

    /// Find a session and its entries. Archived sessions are returned too.
    pub async fn find_by_id(
        pool: &SqlitePool,
        id: DbId,
    ) -> Result<Option<WorkSessionWithEntries>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM work_sessions WHERE id = ?");
        let Some(session) = sqlx::query_as::<_, WorkSession>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?
        else {
            return Ok(None);
        };

        let query = format!(
            "SELECT {ENTRY_COLUMNS} FROM work_session_entries
             WHERE work_session_id = ? ORDER BY clock_in_time, id"
        );
        let entries = sqlx::query_as::<_, WorkSessionEntry>(&query)
            .bind(id)
            .fetch_all(pool)
            .await?;

        Ok(Some(WorkSessionWithEntries { session, entries }))
    }

    /// List sessions, most recent work date first, each with its entries.
    ///
    /// `laborer_id` matches sessions where that laborer has at least one
    /// entry; the returned sessions still carry all of their entries.
    pub async fn list(
        pool: &SqlitePool,
        filter: &WorkSessionFilter,
        page: PageRequest,
    ) -> Result<Page<WorkSessionWithEntries>, DbError> {
        filter.validate()?;

        let mut conditions = Conditions::default();
        conditions.push_id("project_id = ?", filter.project_id);
        conditions.push_id("task_id = ?", filter.task_id);
        conditions.push_id(
            "EXISTS (SELECT 1 FROM work_session_entries e
                     WHERE e.work_session_id = work_sessions.id AND e.laborer_id = ?)",
            filter.laborer_id,
        );
        conditions.push_date_range("work_date", filter.from, filter.to);
        if !filter.include_archived {
            conditions.push("archived_at IS NULL");
        }
        let where_clause = conditions.where_clause();

        let count_query = format!("SELECT COUNT(*) FROM work_sessions {where_clause}");
        let total: i64 = conditions
            .bind_scalar(sqlx::query_scalar(&count_query))
            .fetch_one(pool)
            .await?;

        let query = format!(
            "SELECT {COLUMNS} FROM work_sessions {where_clause}
             ORDER BY work_date DESC, id DESC LIMIT ? OFFSET ?"
        );
        let sessions = conditions
            .bind_as(sqlx::query_as::<_, WorkSession>(&query))
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(pool)
            .await?;

        let items = attach_entries(pool, sessions).await?;
        Ok(Page::new(items, page, total))
    }

    /// Apply a partial update.
    ///
    /// When `entries` is supplied the session's entries are replaced in the
    /// same transaction; otherwise they are left untouched.
    pub async fn update(
        pool: &SqlitePool,
        id: DbId,
        input: &UpdateWorkSession,
    ) -> Result<WorkSessionWithEntries, DbError> {
        if let Some(entries) = &input.entries {
            validate_entries(entries)?;
        }

        let mut tx = pool.begin().await?;

        let query = format!("SELECT {COLUMNS} FROM work_sessions WHERE id = ?");
        let existing = sqlx::query_as::<_, WorkSession>(&query)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| DbError::not_found(ENTITY, id))?;

        let project_id = input.project_id.unwrap_or(existing.project_id);
        let task_id = input.task_id.unwrap_or(existing.task_id);
        let work_date = input.work_date.unwrap_or(existing.work_date);

        support::ensure_exists(&mut tx, "projects", "project_id", project_id).await?;
        support::ensure_task_in_project(&mut tx, task_id, project_id).await?;

        let query = format!(
            "UPDATE work_sessions SET
                project_id = ?,
                task_id = ?,
                work_date = ?,
                updated_at = ?
             WHERE id = ?
             RETURNING {COLUMNS}"
        );
        let session = sqlx::query_as::<_, WorkSession>(&query)
            .bind(project_id)
            .bind(task_id)
            .bind(work_date)
            .bind(Utc::now())
            .bind(id)
            .fetch_one(&mut *tx)
            .await?;

        let entries = match &input.entries {
            Some(replacement) => {
                check_laborers(&mut tx, replacement).await?;
                let removed = sqlx::query("DELETE FROM work_session_entries WHERE work_session_id = ?")
                    .bind(id)
                    .execute(&mut *tx)
                    .await?
                    .rows_affected();
                tracing::debug!(session_id = id, removed, "Replacing work session entries");
                insert_entries(&mut tx, id, replacement).await?
            }
            None => {
                let query = format!(
                    "SELECT {ENTRY_COLUMNS} FROM work_session_entries
                     WHERE work_session_id = ? ORDER BY clock_in_time, id"
                );
                sqlx::query_as::<_, WorkSessionEntry>(&query)
                    .bind(id)
                    .fetch_all(&mut *tx)
                    .await?
            }
        };

        tx.commit().await?;
        tracing::info!(session_id = id, entry_count = entries.len(), "Work session updated");
        Ok(WorkSessionWithEntries { session, entries })
    }

    pub async fn archive(pool: &SqlitePool, id: DbId) -> Result<WorkSessionWithEntries, DbError> {
        support::archive_row(pool, "work_sessions", ENTITY, id).await?;
        Self::fetch(pool, id).await
    }

    pub async fn restore(pool: &SqlitePool, id: DbId) -> Result<WorkSessionWithEntries, DbError> {
        support::restore_row(pool, "work_sessions", ENTITY, id).await?;
        Self::fetch(pool, id).await
    }

    /// Permanently delete a session. Its entries go with it.
    pub async fn hard_delete(pool: &SqlitePool, id: DbId) -> Result<(), DbError> {
        let mut tx = pool.begin().await?;

        let removed = sqlx::query("DELETE FROM work_session_entries WHERE work_session_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        let result = sqlx::query("DELETE FROM work_sessions WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        if result.rows_affected() == 0 {
            return Err(DbError::not_found(ENTITY, id));
        }

        tx.commit().await?;
        tracing::info!(session_id = id, entries_removed = removed, "Work session hard deleted");
        Ok(())
    }

    async fn fetch(pool: &SqlitePool, id: DbId) -> Result<WorkSessionWithEntries, DbError> {
        Self::find_by_id(pool, id)
            .await?
            .ok_or_else(|| DbError::not_found(ENTITY, id))
    }
}

// ---------------------------------------------------------------------------
// Entries
// ---------------------------------------------------------------------------

fn validate_entries(entries: &[CreateWorkSessionEntry]) -> Result<(), DbError> {
    for entry in entries {
        validate_clock_span(entry.clock_in_time, entry.clock_out_time)?;
    }
    Ok(())
}

async fn check_laborers(
    conn: &mut SqliteConnection,
    entries: &[CreateWorkSessionEntry],
) -> Result<(), DbError> {
    for entry in entries {
        support::ensure_exists(conn, "laborers", "laborer_id", entry.laborer_id).await?;
    }
    Ok(())
}

async fn insert_entries(
    conn: &mut SqliteConnection,
    session_id: DbId,
    entries: &[CreateWorkSessionEntry],
) -> Result<Vec<WorkSessionEntry>, sqlx::Error> {
    let query = format!(
        "INSERT INTO work_session_entries (work_session_id, laborer_id, clock_in_time, clock_out_time)
         VALUES (?, ?, ?, ?)
         RETURNING {ENTRY_COLUMNS}"
    );
    let mut inserted = Vec::with_capacity(entries.len());
    for entry in entries {
        let row = sqlx::query_as::<_, WorkSessionEntry>(&query)
            .bind(session_id)
            .bind(entry.laborer_id)
            .bind(entry.clock_in_time)
            .bind(entry.clock_out_time)
            .fetch_one(&mut *conn)
            .await?;
        inserted.push(row);
    }
    Ok(inserted)
}

/// Load the entries for a page of sessions in one query and pair them up.
async fn attach_entries(
    pool: &SqlitePool,
    sessions: Vec<WorkSession>,
) -> Result<Vec<WorkSessionWithEntries>, sqlx::Error> {
    if sessions.is_empty() {
        return Ok(Vec::new());
    }

    let placeholders = vec!["?"; sessions.len()].join(", ");
    let query = format!(
        "SELECT {ENTRY_COLUMNS} FROM work_session_entries
         WHERE work_session_id IN ({placeholders})
         ORDER BY clock_in_time, id"
    );
    let mut q = sqlx::query_as::<_, WorkSessionEntry>(&query);
    for session in &sessions {
        q = q.bind(session.id);
    }
    let rows = q.fetch_all(pool).await?;

    let mut by_session: HashMap<DbId, Vec<WorkSessionEntry>> = HashMap::new();
    for row in rows {
        by_session.entry(row.work_session_id).or_default().push(row);
    }

    Ok(sessions
        .into_iter()
        .map(|session| {
            let entries = by_session.remove(&session.id).unwrap_or_default();
            WorkSessionWithEntries { session, entries }
        })
        .collect())
}
