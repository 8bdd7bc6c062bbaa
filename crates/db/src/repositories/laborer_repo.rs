//! Repository for the `laborers` table.

use chrono::Utc;
use reno_core::pagination::{Page, PageRequest};
use reno_core::types::DbId;
use reno_core::validation::{ensure_optional_non_negative, require_text};
use sqlx::SqlitePool;

use super::support::{self, Conditions, Dependent};
use crate::error::DbError;
use crate::models::filter::ArchiveFilter;
use crate::models::laborer::{CreateLaborer, Laborer, UpdateLaborer};

const COLUMNS: &str = "id, name, hourly_rate, daily_rate, archived_at, created_at, updated_at";

const ENTITY: &str = "Laborer";

const DEPENDENTS: &[Dependent] = &[Dependent {
    table: "work_session_entries",
    column: "laborer_id",
    label: "work session entries",
}];

pub struct LaborerRepo;

impl LaborerRepo {
    /// Insert a new laborer. Either rate may be absent.
    pub async fn create(pool: &SqlitePool, input: &CreateLaborer) -> Result<Laborer, DbError> {
        let name = require_text(&input.name, "name")?;
        let hourly_rate = ensure_optional_non_negative(input.hourly_rate, "hourly_rate")?;
        let daily_rate = ensure_optional_non_negative(input.daily_rate, "daily_rate")?;
        let now = Utc::now();

        let query = format!(
            "INSERT INTO laborers (name, hourly_rate, daily_rate, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?)
             RETURNING {COLUMNS}"
        );
        let laborer = sqlx::query_as::<_, Laborer>(&query)
            .bind(&name)
            .bind(hourly_rate)
            .bind(daily_rate)
            .bind(now)
            .bind(now)
            .fetch_one(pool)
            .await?;

        tracing::info!(laborer_id = laborer.id, name = %laborer.name, "Laborer created");
        Ok(laborer)
    }

    pub async fn find_by_id(pool: &SqlitePool, id: DbId) -> Result<Option<Laborer>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM laborers WHERE id = ?");
        sqlx::query_as::<_, Laborer>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List laborers alphabetically.
    pub async fn list(
        pool: &SqlitePool,
        filter: &ArchiveFilter,
        page: PageRequest,
    ) -> Result<Page<Laborer>, sqlx::Error> {
        let mut conditions = Conditions::default();
        if !filter.include_archived {
            conditions.push("archived_at IS NULL");
        }
        let where_clause = conditions.where_clause();

        let count_query = format!("SELECT COUNT(*) FROM laborers {where_clause}");
        let total: i64 = conditions
            .bind_scalar(sqlx::query_scalar(&count_query))
            .fetch_one(pool)
            .await?;

        let query = format!(
            "SELECT {COLUMNS} FROM laborers {where_clause}
             ORDER BY name COLLATE NOCASE, id LIMIT ? OFFSET ?"
        );
        let items = conditions
            .bind_as(sqlx::query_as::<_, Laborer>(&query))
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(pool)
            .await?;

        Ok(Page::new(items, page, total))
    }

    /// Apply a partial update. An explicit `null` rate clears it.
    pub async fn update(
        pool: &SqlitePool,
        id: DbId,
        input: &UpdateLaborer,
    ) -> Result<Laborer, DbError> {
        let mut tx = pool.begin().await?;

        let query = format!("SELECT {COLUMNS} FROM laborers WHERE id = ?");
        let existing = sqlx::query_as::<_, Laborer>(&query)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| DbError::not_found(ENTITY, id))?;

        let name = match &input.name {
            Some(name) => require_text(name, "name")?,
            None => existing.name,
        };
        let hourly_rate = ensure_optional_non_negative(
            input.hourly_rate.unwrap_or(existing.hourly_rate),
            "hourly_rate",
        )?;
        let daily_rate = ensure_optional_non_negative(
            input.daily_rate.unwrap_or(existing.daily_rate),
            "daily_rate",
        )?;

        let query = format!(
            "UPDATE laborers SET
                name = ?,
                hourly_rate = ?,
                daily_rate = ?,
                updated_at = ?
             WHERE id = ?
             RETURNING {COLUMNS}"
        );
        let laborer = sqlx::query_as::<_, Laborer>(&query)
            .bind(&name)
            .bind(hourly_rate)
            .bind(daily_rate)
            .bind(Utc::now())
            .bind(id)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        tracing::info!(laborer_id = id, "Laborer updated");
        Ok(laborer)
    }

    pub async fn archive(pool: &SqlitePool, id: DbId) -> Result<Laborer, DbError> {
        support::archive_row(pool, "laborers", ENTITY, id).await?;
        Self::fetch(pool, id).await
    }

    pub async fn restore(pool: &SqlitePool, id: DbId) -> Result<Laborer, DbError> {
        support::restore_row(pool, "laborers", ENTITY, id).await?;
        Self::fetch(pool, id).await
    }

    /// Permanently delete a laborer with no recorded time.
    pub async fn hard_delete(pool: &SqlitePool, id: DbId) -> Result<(), DbError> {
        support::hard_delete_row(pool, "laborers", ENTITY, id, DEPENDENTS).await
    }

    async fn fetch(pool: &SqlitePool, id: DbId) -> Result<Laborer, DbError> {
        Self::find_by_id(pool, id)
            .await?
            .ok_or_else(|| DbError::not_found(ENTITY, id))
    }
}
