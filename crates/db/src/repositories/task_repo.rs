//! Repository for the `tasks` table.

use chrono::Utc;
use reno_core::error::CoreError;
use reno_core::pagination::{Page, PageRequest};
use reno_core::types::DbId;
use reno_core::validation::{require_text, validate_task_span};
use sqlx::SqlitePool;

use super::support::{self, Conditions, Dependent};
use crate::error::DbError;
use crate::models::filter::TaskFilter;
use crate::models::task::{CreateTask, Task, UpdateTask};

const COLUMNS: &str =
    "id, project_id, name, start_datetime, end_datetime, archived_at, created_at, updated_at";

const ENTITY: &str = "Task";

/// Rows that pin a task to its project and block hard deletion.
const DEPENDENTS: &[Dependent] = &[
    Dependent { table: "material_purchases", column: "task_id", label: "material purchase(s)" },
    Dependent { table: "work_sessions", column: "task_id", label: "work session(s)" },
];

/// Provides CRUD and archival operations for tasks.
pub struct TaskRepo;

impl TaskRepo {
    /// Insert a new task under an existing project.
    pub async fn create(pool: &SqlitePool, input: &CreateTask) -> Result<Task, DbError> {
        let name = require_text(&input.name, "name")?;
        validate_task_span(input.start_datetime, input.end_datetime)?;

        let mut tx = pool.begin().await?;
        support::ensure_exists(&mut tx, "projects", "project_id", input.project_id).await?;

        let now = Utc::now();
        let query = format!(
            "INSERT INTO tasks (project_id, name, start_datetime, end_datetime, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?)
             RETURNING {COLUMNS}"
        );
        let task = sqlx::query_as::<_, Task>(&query)
            .bind(input.project_id)
            .bind(&name)
            .bind(input.start_datetime)
            .bind(input.end_datetime)
            .bind(now)
            .bind(now)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        tracing::info!(task_id = task.id, project_id = task.project_id, "Task created");
        Ok(task)
    }

    /// Find a task by ID, archived or not.
    pub async fn find_by_id(pool: &SqlitePool, id: DbId) -> Result<Option<Task>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tasks WHERE id = ?");
        sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List tasks ordered by start time. `from`/`to` bound the start date.
    pub async fn list(
        pool: &SqlitePool,
        filter: &TaskFilter,
        page: PageRequest,
    ) -> Result<Page<Task>, DbError> {
        filter.validate()?;

        let mut conditions = Conditions::default();
        conditions.push_id("project_id = ?", filter.project_id);
        conditions.push_date_range("date(start_datetime)", filter.from, filter.to);
        if !filter.include_archived {
            conditions.push("archived_at IS NULL");
        }
        let where_clause = conditions.where_clause();

        let count_query = format!("SELECT COUNT(*) FROM tasks {where_clause}");
        let total: i64 = conditions
            .bind_scalar(sqlx::query_scalar(&count_query))
            .fetch_one(pool)
            .await?;

        let query = format!(
            "SELECT {COLUMNS} FROM tasks {where_clause}
             ORDER BY start_datetime, id LIMIT ? OFFSET ?"
        );
        let items = conditions
            .bind_as(sqlx::query_as::<_, Task>(&query))
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(pool)
            .await?;

        Ok(Page::new(items, page, total))
    }

    /// Apply a partial update.
    ///
    /// Moving a task to another project is refused while purchases or work
    /// sessions reference it, since those rows would then point at a task
    /// outside their own project.
    pub async fn update(pool: &SqlitePool, id: DbId, input: &UpdateTask) -> Result<Task, DbError> {
        let mut tx = pool.begin().await?;

        let query = format!("SELECT {COLUMNS} FROM tasks WHERE id = ?");
        let existing = sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| DbError::not_found(ENTITY, id))?;

        let name = match &input.name {
            Some(name) => require_text(name, "name")?,
            None => existing.name,
        };
        let start_datetime = input.start_datetime.unwrap_or(existing.start_datetime);
        let end_datetime = input.end_datetime.unwrap_or(existing.end_datetime);
        validate_task_span(start_datetime, end_datetime)?;

        let project_id = input.project_id.unwrap_or(existing.project_id);
        if project_id != existing.project_id {
            support::ensure_exists(&mut tx, "projects", "project_id", project_id).await?;
            for dependent in DEPENDENTS {
                if support::count_dependents(&mut tx, dependent, id).await? > 0 {
                    tracing::warn!(task_id = id, project_id, "Task move blocked by dependents");
                    return Err(CoreError::Conflict(format!(
                        "Task {id} cannot move to project {project_id} while {} reference it.",
                        dependent.label
                    ))
                    .into());
                }
            }
        }

        let query = format!(
            "UPDATE tasks SET
                project_id = ?,
                name = ?,
                start_datetime = ?,
                end_datetime = ?,
                updated_at = ?
             WHERE id = ?
             RETURNING {COLUMNS}"
        );
        let task = sqlx::query_as::<_, Task>(&query)
            .bind(project_id)
            .bind(&name)
            .bind(start_datetime)
            .bind(end_datetime)
            .bind(Utc::now())
            .bind(id)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        tracing::info!(task_id = id, "Task updated");
        Ok(task)
    }

    pub async fn archive(pool: &SqlitePool, id: DbId) -> Result<Task, DbError> {
        support::archive_row(pool, "tasks", ENTITY, id).await?;
        Self::fetch(pool, id).await
    }

    pub async fn restore(pool: &SqlitePool, id: DbId) -> Result<Task, DbError> {
        support::restore_row(pool, "tasks", ENTITY, id).await?;
        Self::fetch(pool, id).await
    }

    /// Permanently delete a task that no purchase or work session uses.
    pub async fn hard_delete(pool: &SqlitePool, id: DbId) -> Result<(), DbError> {
        support::hard_delete_row(pool, "tasks", ENTITY, id, DEPENDENTS).await
    }

    async fn fetch(pool: &SqlitePool, id: DbId) -> Result<Task, DbError> {
        Self::find_by_id(pool, id)
            .await?
            .ok_or_else(|| DbError::not_found(ENTITY, id))
    }
}
