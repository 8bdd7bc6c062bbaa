//! Repository for the `material_purchases` table.
//!
//! `total_material_cost` is never taken from the caller. Every write derives
//! it from `unit_cost * quantity` inside the same transaction that stores the
//! row, so the stored total can never drift from its inputs.

use chrono::Utc;
use reno_core::derivation::derive_total;
use reno_core::pagination::{Page, PageRequest};
use reno_core::types::DbId;
use reno_core::validation::{ensure_non_negative, require_text, validate_purchase_date};
use sqlx::{SqliteConnection, SqlitePool};

use super::support::{self, Conditions};
use crate::error::DbError;
use crate::models::filter::MaterialPurchaseFilter;
use crate::models::material_purchase::{
    CreateMaterialPurchase, MaterialPurchase, UpdateMaterialPurchase,
};

const COLUMNS: &str = "id, project_id, task_id, vendor_id, material_description, \
    unit_cost, quantity, total_material_cost, delivery_cost, purchase_date, \
    archived_at, created_at, updated_at";

const ENTITY: &str = "MaterialPurchase";

/// Provides CRUD and archival operations for material purchases.
pub struct MaterialPurchaseRepo;

impl MaterialPurchaseRepo {
    /// Record a purchase, deriving its total.
    pub async fn create(
        pool: &SqlitePool,
        input: &CreateMaterialPurchase,
    ) -> Result<MaterialPurchase, DbError> {
        let description = require_text(&input.material_description, "material_description")?;
        let unit_cost = ensure_non_negative(input.unit_cost, "unit_cost")?;
        let quantity = ensure_non_negative(input.quantity, "quantity")?;
        let delivery_cost = ensure_non_negative(input.delivery_cost.unwrap_or(0.0), "delivery_cost")?;
        validate_purchase_date(input.purchase_date, Utc::now().date_naive())?;

        let mut tx = pool.begin().await?;
        check_references(&mut tx, input.project_id, input.vendor_id, input.task_id).await?;

        let total = derive_total(unit_cost, quantity);
        note_ignored_total(input.total_material_cost, total);

        let now = Utc::now();
        let query = format!(
            "INSERT INTO material_purchases
                (project_id, task_id, vendor_id, material_description, unit_cost, quantity,
                 total_material_cost, delivery_cost, purchase_date, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING {COLUMNS}"
        );
        let purchase = sqlx::query_as::<_, MaterialPurchase>(&query)
            .bind(input.project_id)
            .bind(input.task_id)
            .bind(input.vendor_id)
            .bind(&description)
            .bind(unit_cost)
            .bind(quantity)
            .bind(total)
            .bind(delivery_cost)
            .bind(input.purchase_date)
            .bind(now)
            .bind(now)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        tracing::info!(
            purchase_id = purchase.id,
            project_id = purchase.project_id,
            total_material_cost = purchase.total_material_cost,
            "Material purchase recorded",
        );
        Ok(purchase)
    }

    pub async fn find_by_id(
        pool: &SqlitePool,
        id: DbId,
    ) -> Result<Option<MaterialPurchase>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM material_purchases WHERE id = ?");
        sqlx::query_as::<_, MaterialPurchase>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List purchases, most recent purchase date first.
    pub async fn list(
        pool: &SqlitePool,
        filter: &MaterialPurchaseFilter,
        page: PageRequest,
    ) -> Result<Page<MaterialPurchase>, DbError> {
        filter.validate()?;

        let mut conditions = Conditions::default();
        conditions.push_id("project_id = ?", filter.project_id);
        conditions.push_id("task_id = ?", filter.task_id);
        conditions.push_id("vendor_id = ?", filter.vendor_id);
        conditions.push_date_range("purchase_date", filter.from, filter.to);
        if !filter.include_archived {
            conditions.push("archived_at IS NULL");
        }
        let where_clause = conditions.where_clause();

        let count_query = format!("SELECT COUNT(*) FROM material_purchases {where_clause}");
        let total: i64 = conditions
            .bind_scalar(sqlx::query_scalar(&count_query))
            .fetch_one(pool)
            .await?;

        let query = format!(
            "SELECT {COLUMNS} FROM material_purchases {where_clause}
             ORDER BY purchase_date DESC, id DESC LIMIT ? OFFSET ?"
        );
        let items = conditions
            .bind_as(sqlx::query_as::<_, MaterialPurchase>(&query))
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(pool)
            .await?;

        Ok(Page::new(items, page, total))
    }

    /// Apply a partial update and re-derive the total from the merged row.
    pub async fn update(
        pool: &SqlitePool,
        id: DbId,
        input: &UpdateMaterialPurchase,
    ) -> Result<MaterialPurchase, DbError> {
        let mut tx = pool.begin().await?;

        let query = format!("SELECT {COLUMNS} FROM material_purchases WHERE id = ?");
        let existing = sqlx::query_as::<_, MaterialPurchase>(&query)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| DbError::not_found(ENTITY, id))?;

        let description = match &input.material_description {
            Some(description) => require_text(description, "material_description")?,
            None => existing.material_description,
        };
        let unit_cost = ensure_non_negative(input.unit_cost.unwrap_or(existing.unit_cost), "unit_cost")?;
        let quantity = ensure_non_negative(input.quantity.unwrap_or(existing.quantity), "quantity")?;
        let delivery_cost = ensure_non_negative(
            input.delivery_cost.unwrap_or(existing.delivery_cost),
            "delivery_cost",
        )?;
        let purchase_date = input.purchase_date.unwrap_or(existing.purchase_date);
        if input.purchase_date.is_some() {
            validate_purchase_date(purchase_date, Utc::now().date_naive())?;
        }

        let project_id = input.project_id.unwrap_or(existing.project_id);
        let vendor_id = input.vendor_id.unwrap_or(existing.vendor_id);
        let task_id = input.task_id.unwrap_or(existing.task_id);
        check_references(&mut tx, project_id, vendor_id, task_id).await?;

        let total = derive_total(unit_cost, quantity);
        note_ignored_total(input.total_material_cost, total);

        let query = format!(
            "UPDATE material_purchases SET
                project_id = ?,
                task_id = ?,
                vendor_id = ?,
                material_description = ?,
                unit_cost = ?,
                quantity = ?,
                total_material_cost = ?,
                delivery_cost = ?,
                purchase_date = ?,
                updated_at = ?
             WHERE id = ?
             RETURNING {COLUMNS}"
        );
        let purchase = sqlx::query_as::<_, MaterialPurchase>(&query)
            .bind(project_id)
            .bind(task_id)
            .bind(vendor_id)
            .bind(&description)
            .bind(unit_cost)
            .bind(quantity)
            .bind(total)
            .bind(delivery_cost)
            .bind(purchase_date)
            .bind(Utc::now())
            .bind(id)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        tracing::info!(
            purchase_id = id,
            total_material_cost = purchase.total_material_cost,
            "Material purchase updated",
        );
        Ok(purchase)
    }

    pub async fn archive(pool: &SqlitePool, id: DbId) -> Result<MaterialPurchase, DbError> {
        support::archive_row(pool, "material_purchases", ENTITY, id).await?;
        Self::fetch(pool, id).await
    }

    pub async fn restore(pool: &SqlitePool, id: DbId) -> Result<MaterialPurchase, DbError> {
        support::restore_row(pool, "material_purchases", ENTITY, id).await?;
        Self::fetch(pool, id).await
    }

    /// Permanently delete a purchase. Nothing references purchases, so this
    /// only fails when the row does not exist.
    pub async fn hard_delete(pool: &SqlitePool, id: DbId) -> Result<(), DbError> {
        support::hard_delete_row(pool, "material_purchases", ENTITY, id, &[]).await
    }

    async fn fetch(pool: &SqlitePool, id: DbId) -> Result<MaterialPurchase, DbError> {
        Self::find_by_id(pool, id)
            .await?
            .ok_or_else(|| DbError::not_found(ENTITY, id))
    }
}

/// Project and vendor must exist; an optional task must belong to the project.
async fn check_references(
    conn: &mut SqliteConnection,
    project_id: DbId,
    vendor_id: DbId,
    task_id: Option<DbId>,
) -> Result<(), DbError> {
    support::ensure_exists(conn, "projects", "project_id", project_id).await?;
    support::ensure_exists(conn, "vendors", "vendor_id", vendor_id).await?;
    if let Some(task_id) = task_id {
        support::ensure_task_in_project(conn, task_id, project_id).await?;
    }
    Ok(())
}

fn note_ignored_total(supplied: Option<f64>, derived: f64) {
    if let Some(supplied) = supplied {
        if supplied != derived {
            tracing::debug!(supplied, derived, "Ignoring caller-supplied total_material_cost");
        }
    }
}
