//! Repository for the `projects` table.

use chrono::Utc;
use reno_core::pagination::{Page, PageRequest};
use reno_core::types::DbId;
use reno_core::validation::{require_text, validate_project_dates};
use sqlx::SqlitePool;

use super::support::{self, Conditions, Dependent};
use crate::error::DbError;
use crate::models::filter::ArchiveFilter;
use crate::models::project::{CreateProject, Project, UpdateProject};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, name, description, start_date, end_date, archived_at, created_at, updated_at";

const ENTITY: &str = "Project";

/// Rows that must be gone before a project can be hard-deleted.
const DEPENDENTS: &[Dependent] = &[
    Dependent { table: "tasks", column: "project_id", label: "task(s)" },
    Dependent { table: "material_purchases", column: "project_id", label: "material purchase(s)" },
    Dependent { table: "work_sessions", column: "project_id", label: "work session(s)" },
];

/// Provides CRUD and archival operations for projects.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a new project, returning the created row.
    pub async fn create(pool: &SqlitePool, input: &CreateProject) -> Result<Project, DbError> {
        let name = require_text(&input.name, "name")?;
        validate_project_dates(input.start_date, input.end_date)?;
        let description = support::optional_text(input.description.as_deref());
        let now = Utc::now();

        let query = format!(
            "INSERT INTO projects (name, description, start_date, end_date, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?)
             RETURNING {COLUMNS}"
        );
        let project = sqlx::query_as::<_, Project>(&query)
            .bind(&name)
            .bind(&description)
            .bind(input.start_date)
            .bind(input.end_date)
            .bind(now)
            .bind(now)
            .fetch_one(pool)
            .await?;

        tracing::info!(project_id = project.id, name = %project.name, "Project created");
        Ok(project)
    }

    /// Find a project by ID. Archived projects are returned too.
    pub async fn find_by_id(pool: &SqlitePool, id: DbId) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = ?");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List projects in creation order. Archived rows are excluded unless
    /// the filter asks for them.
    pub async fn list(
        pool: &SqlitePool,
        filter: &ArchiveFilter,
        page: PageRequest,
    ) -> Result<Page<Project>, sqlx::Error> {
        let mut conditions = Conditions::default();
        if !filter.include_archived {
            conditions.push("archived_at IS NULL");
        }
        let where_clause = conditions.where_clause();

        let count_query = format!("SELECT COUNT(*) FROM projects {where_clause}");
        let total: i64 = conditions
            .bind_scalar(sqlx::query_scalar(&count_query))
            .fetch_one(pool)
            .await?;

        let query =
            format!("SELECT {COLUMNS} FROM projects {where_clause} ORDER BY id LIMIT ? OFFSET ?");
        let items = conditions
            .bind_as(sqlx::query_as::<_, Project>(&query))
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(pool)
            .await?;

        Ok(Page::new(items, page, total))
    }

    /// Apply a partial update. The merged row is validated as a whole before
    /// anything is written.
    pub async fn update(
        pool: &SqlitePool,
        id: DbId,
        input: &UpdateProject,
    ) -> Result<Project, DbError> {
        let mut tx = pool.begin().await?;

        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = ?");
        let existing = sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| DbError::not_found(ENTITY, id))?;

        let name = match &input.name {
            Some(name) => require_text(name, "name")?,
            None => existing.name,
        };
        let description = match &input.description {
            Some(description) => support::optional_text(description.as_deref()),
            None => existing.description,
        };
        let start_date = input.start_date.unwrap_or(existing.start_date);
        let end_date = input.end_date.unwrap_or(existing.end_date);
        validate_project_dates(start_date, end_date)?;

        let query = format!(
            "UPDATE projects SET
                name = ?,
                description = ?,
                start_date = ?,
                end_date = ?,
                updated_at = ?
             WHERE id = ?
             RETURNING {COLUMNS}"
        );
        let project = sqlx::query_as::<_, Project>(&query)
            .bind(&name)
            .bind(&description)
            .bind(start_date)
            .bind(end_date)
            .bind(Utc::now())
            .bind(id)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        tracing::info!(project_id = id, "Project updated");
        Ok(project)
    }

    /// Archive a project. Archiving twice keeps the first timestamp.
    pub async fn archive(pool: &SqlitePool, id: DbId) -> Result<Project, DbError> {
        support::archive_row(pool, "projects", ENTITY, id).await?;
        Self::fetch(pool, id).await
    }

    /// Return an archived project to the active set.
    pub async fn restore(pool: &SqlitePool, id: DbId) -> Result<Project, DbError> {
        support::restore_row(pool, "projects", ENTITY, id).await?;
        Self::fetch(pool, id).await
    }

    /// Permanently delete a project. Fails with a conflict while any task,
    /// purchase or work session still belongs to it.
    pub async fn hard_delete(pool: &SqlitePool, id: DbId) -> Result<(), DbError> {
        support::hard_delete_row(pool, "projects", ENTITY, id, DEPENDENTS).await
    }

    async fn fetch(pool: &SqlitePool, id: DbId) -> Result<Project, DbError> {
        Self::find_by_id(pool, id)
            .await?
            .ok_or_else(|| DbError::not_found(ENTITY, id))
    }
}
