//! Helpers shared by the entity repositories: dynamic WHERE clauses,
//! reference checks, dependent-row checks and archive state updates.

use chrono::{NaiveDate, Utc};
use reno_core::archival::ArchiveState;
use reno_core::error::CoreError;
use reno_core::types::{DbId, Timestamp};
use sqlx::query::{QueryAs, QueryScalar};
use sqlx::sqlite::SqliteArguments;
use sqlx::{Sqlite, SqliteConnection, SqlitePool};

use crate::error::DbError;

// ---------------------------------------------------------------------------
// Dynamic filters
// ---------------------------------------------------------------------------

/// Typed bind value for dynamically-built filter queries.
#[derive(Debug, Clone, Copy)]
pub(crate) enum BindValue {
    Id(DbId),
    Date(NaiveDate),
}

/// Accumulates `AND`-joined conditions and their bind values in order.
#[derive(Debug, Default)]
pub(crate) struct Conditions {
    clauses: Vec<String>,
    binds: Vec<BindValue>,
}

impl Conditions {
    /// Add a condition with no parameters.
    pub fn push(&mut self, clause: &str) {
        self.clauses.push(clause.to_string());
    }

    /// Add a condition containing exactly one `?` placeholder.
    pub fn push_bind(&mut self, clause: &str, value: BindValue) {
        self.clauses.push(clause.to_string());
        self.binds.push(value);
    }

    pub fn push_id(&mut self, clause: &str, id: Option<DbId>) {
        if let Some(id) = id {
            self.push_bind(clause, BindValue::Id(id));
        }
    }

    /// Inclusive date bounds on `column`.
    pub fn push_date_range(&mut self, column: &str, from: Option<NaiveDate>, to: Option<NaiveDate>) {
        if let Some(from) = from {
            self.push_bind(&format!("{column} >= ?"), BindValue::Date(from));
        }
        if let Some(to) = to {
            self.push_bind(&format!("{column} <= ?"), BindValue::Date(to));
        }
    }

    /// Empty when no conditions were added, otherwise starts with `WHERE `.
    pub fn where_clause(&self) -> String {
        if self.clauses.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", self.clauses.join(" AND "))
        }
    }

    /// Bind every accumulated value to a `QueryAs`.
    pub fn bind_as<'q, O>(
        &self,
        mut q: QueryAs<'q, Sqlite, O, SqliteArguments<'q>>,
    ) -> QueryAs<'q, Sqlite, O, SqliteArguments<'q>> {
        for val in &self.binds {
            match *val {
                BindValue::Id(v) => q = q.bind(v),
                BindValue::Date(v) => q = q.bind(v),
            }
        }
        q
    }

    /// Bind every accumulated value to a `QueryScalar`.
    pub fn bind_scalar<'q, O>(
        &self,
        mut q: QueryScalar<'q, Sqlite, O, SqliteArguments<'q>>,
    ) -> QueryScalar<'q, Sqlite, O, SqliteArguments<'q>> {
        for val in &self.binds {
            match *val {
                BindValue::Id(v) => q = q.bind(v),
                BindValue::Date(v) => q = q.bind(v),
            }
        }
        q
    }
}

// ---------------------------------------------------------------------------
// Text normalisation
// ---------------------------------------------------------------------------

/// Trim optional free text; blank becomes `None`.
pub(crate) fn optional_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

// ---------------------------------------------------------------------------
// References
// ---------------------------------------------------------------------------

/// Fail with `CoreError::Reference` unless `table` has a row with `id`.
///
/// Archived rows count as existing.
pub(crate) async fn ensure_exists(
    conn: &mut SqliteConnection,
    table: &str,
    field: &str,
    id: DbId,
) -> Result<(), DbError> {
    let sql = format!("SELECT EXISTS(SELECT 1 FROM {table} WHERE id = ?)");
    let exists: bool = sqlx::query_scalar(&sql).bind(id).fetch_one(&mut *conn).await?;
    if !exists {
        return Err(CoreError::Reference(format!(
            "{field} {id} does not reference an existing row in {table}."
        ))
        .into());
    }
    Ok(())
}

/// Fail unless `task_id` exists and belongs to `project_id`.
pub(crate) async fn ensure_task_in_project(
    conn: &mut SqliteConnection,
    task_id: DbId,
    project_id: DbId,
) -> Result<(), DbError> {
    let owner: Option<DbId> = sqlx::query_scalar("SELECT project_id FROM tasks WHERE id = ?")
        .bind(task_id)
        .fetch_optional(&mut *conn)
        .await?;
    match owner {
        None => Err(CoreError::Reference(format!(
            "task_id {task_id} does not reference an existing row in tasks."
        ))
        .into()),
        Some(owner) if owner != project_id => Err(CoreError::Reference(format!(
            "task {task_id} belongs to project {owner}, not project {project_id}."
        ))
        .into()),
        Some(_) => Ok(()),
    }
}

// ---------------------------------------------------------------------------
// Dependents
// ---------------------------------------------------------------------------

/// A table holding a foreign key that blocks hard deletion of its parent.
pub(crate) struct Dependent {
    pub table: &'static str,
    pub column: &'static str,
    pub label: &'static str,
}

/// Count rows in `dependent.table` pointing at `id`.
pub(crate) async fn count_dependents(
    conn: &mut SqliteConnection,
    dependent: &Dependent,
    id: DbId,
) -> Result<i64, sqlx::Error> {
    let sql = format!(
        "SELECT COUNT(*) FROM {} WHERE {} = ?",
        dependent.table, dependent.column
    );
    sqlx::query_scalar(&sql).bind(id).fetch_one(&mut *conn).await
}

/// Fail with `CoreError::Conflict` if any dependent rows reference `id`.
pub(crate) async fn ensure_no_dependents(
    conn: &mut SqliteConnection,
    entity: &'static str,
    id: DbId,
    dependents: &[Dependent],
) -> Result<(), DbError> {
    let mut blocking = Vec::new();
    for dependent in dependents {
        let count = count_dependents(conn, dependent, id).await?;
        if count > 0 {
            blocking.push(format!("{count} {}", dependent.label));
        }
    }
    if blocking.is_empty() {
        return Ok(());
    }
    let summary = blocking.join(", ");
    tracing::warn!(entity, id, dependents = %summary, "Hard delete blocked by dependents");
    Err(CoreError::Conflict(format!(
        "{entity} {id} is still referenced by {summary}; archive it instead or remove those first."
    ))
    .into())
}

// ---------------------------------------------------------------------------
// Archive state / deletion
// ---------------------------------------------------------------------------

/// Move a row to `Archived`. An already-archived row keeps its timestamp.
pub(crate) async fn archive_row(
    pool: &SqlitePool,
    table: &str,
    entity: &'static str,
    id: DbId,
) -> Result<(), DbError> {
    let now = Utc::now();
    transition_archive_state(pool, table, entity, id, |state| state.archive(now)).await?;
    tracing::info!(entity, id, "Archived");
    Ok(())
}

/// Move a row back to `Active`. Restoring an active row is a no-op.
pub(crate) async fn restore_row(
    pool: &SqlitePool,
    table: &str,
    entity: &'static str,
    id: DbId,
) -> Result<(), DbError> {
    transition_archive_state(pool, table, entity, id, ArchiveState::restore).await?;
    tracing::info!(entity, id, "Restored");
    Ok(())
}

/// Load the row's [`ArchiveState`], apply `transition` and write back the
/// resulting `archived_at` when it changed. Leaves `updated_at` alone.
async fn transition_archive_state(
    pool: &SqlitePool,
    table: &str,
    entity: &'static str,
    id: DbId,
    transition: impl FnOnce(ArchiveState) -> ArchiveState,
) -> Result<(), DbError> {
    let mut tx = pool.begin().await?;

    let sql = format!("SELECT archived_at FROM {table} WHERE id = ?");
    let current: ArchiveState = sqlx::query_scalar::<_, Option<Timestamp>>(&sql)
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| DbError::not_found(entity, id))?
        .into();

    let next = transition(current);
    if next != current {
        let sql = format!("UPDATE {table} SET archived_at = ? WHERE id = ?");
        sqlx::query(&sql)
            .bind(next.archived_at())
            .bind(id)
            .execute(&mut *tx)
            .await?;
    }

    tx.commit().await?;
    Ok(())
}

/// Permanently delete a row after checking it has no dependents.
///
/// Runs in one transaction so a dependent inserted concurrently cannot slip
/// in between the check and the delete.
pub(crate) async fn hard_delete_row(
    pool: &SqlitePool,
    table: &str,
    entity: &'static str,
    id: DbId,
    dependents: &[Dependent],
) -> Result<(), DbError> {
    let mut tx = pool.begin().await?;

    let sql = format!("SELECT EXISTS(SELECT 1 FROM {table} WHERE id = ?)");
    let exists: bool = sqlx::query_scalar(&sql).bind(id).fetch_one(&mut *tx).await?;
    if !exists {
        return Err(DbError::not_found(entity, id));
    }

    ensure_no_dependents(&mut tx, entity, id, dependents).await?;

    let sql = format!("DELETE FROM {table} WHERE id = ?");
    sqlx::query(&sql).bind(id).execute(&mut *tx).await?;

    tx.commit().await?;
    tracing::info!(entity, id, "Hard deleted");
    Ok(())
}
