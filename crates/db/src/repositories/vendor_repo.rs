//! Repository for the `vendors` table.

use chrono::Utc;
use reno_core::pagination::{Page, PageRequest};
use reno_core::types::DbId;
use reno_core::validation::require_text;
use sqlx::SqlitePool;

use super::support::{self, Conditions, Dependent};
use crate::error::DbError;
use crate::models::filter::ArchiveFilter;
use crate::models::vendor::{CreateVendor, UpdateVendor, Vendor};

const COLUMNS: &str = "id, name, archived_at, created_at, updated_at";

const ENTITY: &str = "Vendor";

const DEPENDENTS: &[Dependent] = &[Dependent {
    table: "material_purchases",
    column: "vendor_id",
    label: "material purchase(s)",
}];

pub struct VendorRepo;

impl VendorRepo {
    pub async fn create(pool: &SqlitePool, input: &CreateVendor) -> Result<Vendor, DbError> {
        let name = require_text(&input.name, "name")?;
        let now = Utc::now();

        let query = format!(
            "INSERT INTO vendors (name, created_at, updated_at)
             VALUES (?, ?, ?)
             RETURNING {COLUMNS}"
        );
        let vendor = sqlx::query_as::<_, Vendor>(&query)
            .bind(&name)
            .bind(now)
            .bind(now)
            .fetch_one(pool)
            .await?;

        tracing::info!(vendor_id = vendor.id, name = %vendor.name, "Vendor created");
        Ok(vendor)
    }

    pub async fn find_by_id(pool: &SqlitePool, id: DbId) -> Result<Option<Vendor>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM vendors WHERE id = ?");
        sqlx::query_as::<_, Vendor>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List vendors alphabetically.
    pub async fn list(
        pool: &SqlitePool,
        filter: &ArchiveFilter,
        page: PageRequest,
    ) -> Result<Page<Vendor>, sqlx::Error> {
        let mut conditions = Conditions::default();
        if !filter.include_archived {
            conditions.push("archived_at IS NULL");
        }
        let where_clause = conditions.where_clause();

        let count_query = format!("SELECT COUNT(*) FROM vendors {where_clause}");
        let total: i64 = conditions
            .bind_scalar(sqlx::query_scalar(&count_query))
            .fetch_one(pool)
            .await?;

        let query = format!(
            "SELECT {COLUMNS} FROM vendors {where_clause}
             ORDER BY name COLLATE NOCASE, id LIMIT ? OFFSET ?"
        );
        let items = conditions
            .bind_as(sqlx::query_as::<_, Vendor>(&query))
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(pool)
            .await?;

        Ok(Page::new(items, page, total))
    }

    pub async fn update(
        pool: &SqlitePool,
        id: DbId,
        input: &UpdateVendor,
    ) -> Result<Vendor, DbError> {
        let name = input
            .name
            .as_deref()
            .map(|name| require_text(name, "name"))
            .transpose()?;

        let query = format!(
            "UPDATE vendors SET
                name = COALESCE(?, name),
                updated_at = ?
             WHERE id = ?
             RETURNING {COLUMNS}"
        );
        let vendor = sqlx::query_as::<_, Vendor>(&query)
            .bind(&name)
            .bind(Utc::now())
            .bind(id)
            .fetch_optional(pool)
            .await?
            .ok_or_else(|| DbError::not_found(ENTITY, id))?;

        tracing::info!(vendor_id = id, "Vendor updated");
        Ok(vendor)
    }

    pub async fn archive(pool: &SqlitePool, id: DbId) -> Result<Vendor, DbError> {
        support::archive_row(pool, "vendors", ENTITY, id).await?;
        Self::fetch(pool, id).await
    }

    pub async fn restore(pool: &SqlitePool, id: DbId) -> Result<Vendor, DbError> {
        support::restore_row(pool, "vendors", ENTITY, id).await?;
        Self::fetch(pool, id).await
    }

    pub async fn hard_delete(pool: &SqlitePool, id: DbId) -> Result<(), DbError> {
        support::hard_delete_row(pool, "vendors", ENTITY, id, DEPENDENTS).await
    }

    async fn fetch(pool: &SqlitePool, id: DbId) -> Result<Vendor, DbError> {
        Self::find_by_id(pool, id)
            .await?
            .ok_or_else(|| DbError::not_found(ENTITY, id))
    }
}
