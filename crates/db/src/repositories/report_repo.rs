//! Read-only report queries.
//!
//! Each report fetches the filtered rows it needs and hands them to the pure
//! aggregation in `reno_core::reports`. Archived rows are included unless the
//! filter sets `include_archived = false`.

use reno_core::estimation::{self, Estimate, EstimateRequest};
use reno_core::reports::{
    self, HoursReport, LaborEntryRow, LaborerPay, ProjectSpend, PurchaseCostRow, TaskDuration,
    TaskSpanRow, VendorSpend,
};
use sqlx::SqlitePool;

use super::support::Conditions;
use crate::error::DbError;
use crate::models::filter::ReportFilter;
use crate::models::report::{LaborEntryRecord, PurchaseCostRecord, TaskSpanRecord};

pub struct ReportRepo;

impl ReportRepo {
    /// Material and delivery spend grouped by project.
    pub async fn project_spend(
        pool: &SqlitePool,
        filter: &ReportFilter,
    ) -> Result<Vec<ProjectSpend>, DbError> {
        filter.validate()?;
        let rows = purchase_rows(pool, filter).await?;
        Ok(reports::project_spend(&rows))
    }

    /// Material and delivery spend grouped by vendor.
    pub async fn vendor_spend(
        pool: &SqlitePool,
        filter: &ReportFilter,
    ) -> Result<Vec<VendorSpend>, DbError> {
        filter.validate()?;
        let rows = purchase_rows(pool, filter).await?;
        Ok(reports::vendor_spend(&rows))
    }

    /// Hours worked per laborer and per project.
    pub async fn labor_hours(
        pool: &SqlitePool,
        filter: &ReportFilter,
    ) -> Result<HoursReport, DbError> {
        filter.validate()?;
        let rows = labor_rows(pool, filter).await?;
        Ok(reports::hours_worked(&rows))
    }

    /// Gross pay per laborer.
    pub async fn payroll(
        pool: &SqlitePool,
        filter: &ReportFilter,
    ) -> Result<Vec<LaborerPay>, DbError> {
        filter.validate()?;
        let rows = labor_rows(pool, filter).await?;
        Ok(reports::payroll(&rows))
    }

    /// Average scheduled duration per task name.
    pub async fn task_durations(
        pool: &SqlitePool,
        filter: &ReportFilter,
    ) -> Result<Vec<TaskDuration>, DbError> {
        filter.validate()?;
        let rows = task_rows(pool, filter).await?;
        Ok(reports::average_task_durations(&rows))
    }

    /// Project the cost of future work from purchase and task history.
    ///
    /// History is taken from `request.project_id` when set, otherwise from
    /// every project. Archived history counts. Nothing is persisted.
    pub async fn estimate(
        pool: &SqlitePool,
        request: &EstimateRequest,
    ) -> Result<Estimate, DbError> {
        estimation::validate_estimate_request(request)?;

        let filter = ReportFilter {
            project_id: request.project_id,
            ..ReportFilter::default()
        };
        let purchases = purchase_rows(pool, &filter).await?;
        let tasks = task_rows(pool, &filter).await?;

        let estimate = estimation::estimate(request, &purchases, &tasks);
        tracing::debug!(
            total_cost = estimate.total_cost,
            confidence = ?estimate.confidence,
            unmatched = estimate.unmatched_materials.len() + estimate.unmatched_tasks.len(),
            "Estimate computed",
        );
        Ok(estimate)
    }
}

// ---------------------------------------------------------------------------
// Row fetchers
// ---------------------------------------------------------------------------

/// Purchases joined with project and vendor names. `laborer_id` does not
/// apply.
async fn purchase_rows(
    pool: &SqlitePool,
    filter: &ReportFilter,
) -> Result<Vec<PurchaseCostRow>, sqlx::Error> {
    let mut conditions = Conditions::default();
    conditions.push_id("mp.project_id = ?", filter.project_id);
    conditions.push_id("mp.vendor_id = ?", filter.vendor_id);
    conditions.push_id("mp.task_id = ?", filter.task_id);
    conditions.push_date_range("mp.purchase_date", filter.from, filter.to);
    if !filter.include_archived {
        conditions.push("mp.archived_at IS NULL");
    }

    let query = format!(
        "SELECT mp.project_id, p.name AS project_name, mp.vendor_id, v.name AS vendor_name,
                mp.material_description, mp.unit_cost, mp.quantity,
                mp.total_material_cost, mp.delivery_cost
         FROM material_purchases mp
         JOIN projects p ON p.id = mp.project_id
         JOIN vendors v ON v.id = mp.vendor_id
         {}
         ORDER BY mp.id",
        conditions.where_clause()
    );
    let records = conditions
        .bind_as(sqlx::query_as::<_, PurchaseCostRecord>(&query))
        .fetch_all(pool)
        .await?;
    Ok(records.into_iter().map(Into::into).collect())
}

/// Work session entries joined with session, project and laborer. Dates
/// apply to the session's work date; `vendor_id` does not apply.
async fn labor_rows(
    pool: &SqlitePool,
    filter: &ReportFilter,
) -> Result<Vec<LaborEntryRow>, sqlx::Error> {
    let mut conditions = Conditions::default();
    conditions.push_id("ws.project_id = ?", filter.project_id);
    conditions.push_id("ws.task_id = ?", filter.task_id);
    conditions.push_id("e.laborer_id = ?", filter.laborer_id);
    conditions.push_date_range("ws.work_date", filter.from, filter.to);
    if !filter.include_archived {
        conditions.push("ws.archived_at IS NULL");
    }

    let query = format!(
        "SELECT e.work_session_id, ws.project_id, p.name AS project_name,
                e.laborer_id, l.name AS laborer_name, l.hourly_rate, l.daily_rate,
                e.clock_in_time, e.clock_out_time
         FROM work_session_entries e
         JOIN work_sessions ws ON ws.id = e.work_session_id
         JOIN projects p ON p.id = ws.project_id
         JOIN laborers l ON l.id = e.laborer_id
         {}
         ORDER BY e.id",
        conditions.where_clause()
    );
    let records = conditions
        .bind_as(sqlx::query_as::<_, LaborEntryRecord>(&query))
        .fetch_all(pool)
        .await?;
    Ok(records.into_iter().map(Into::into).collect())
}

/// Task spans. Dates apply to the start date; `vendor_id` and `laborer_id`
/// do not apply.
async fn task_rows(
    pool: &SqlitePool,
    filter: &ReportFilter,
) -> Result<Vec<TaskSpanRow>, sqlx::Error> {
    let mut conditions = Conditions::default();
    conditions.push_id("project_id = ?", filter.project_id);
    conditions.push_id("id = ?", filter.task_id);
    conditions.push_date_range("date(start_datetime)", filter.from, filter.to);
    if !filter.include_archived {
        conditions.push("archived_at IS NULL");
    }

    let query = format!(
        "SELECT name AS task_name, start_datetime, end_datetime
         FROM tasks
         {}
         ORDER BY id",
        conditions.where_clause()
    );
    let records = conditions
        .bind_as(sqlx::query_as::<_, TaskSpanRecord>(&query))
        .fetch_all(pool)
        .await?;
    Ok(records.into_iter().map(Into::into).collect())
}
