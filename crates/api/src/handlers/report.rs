//! Handlers for the read-only `/reports` endpoints.
//!
//! Every report accepts the same query filter: `project_id`, `laborer_id`,
//! `vendor_id`, `task_id`, `from`, `to` and `include_archived` (default
//! `true`). Filters that do not apply to a report's table are ignored.

use axum::extract::State;
use axum::Json;
use reno_core::estimation::{Estimate, EstimateRequest};
use reno_core::reports::{HoursReport, LaborerPay, ProjectSpend, TaskDuration, VendorSpend};
use reno_db::models::filter::ReportFilter;
use reno_db::repositories::ReportRepo;

use crate::error::AppResult;
use crate::query::QueryParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/reports/project-spend
pub async fn project_spend(
    State(state): State<AppState>,
    QueryParams(filter): QueryParams<ReportFilter>,
) -> AppResult<Json<DataResponse<Vec<ProjectSpend>>>> {
    let rows = ReportRepo::project_spend(&state.pool, &filter).await?;
    Ok(Json(DataResponse { data: rows }))
}

/// GET /api/v1/reports/vendor-spend
pub async fn vendor_spend(
    State(state): State<AppState>,
    QueryParams(filter): QueryParams<ReportFilter>,
) -> AppResult<Json<DataResponse<Vec<VendorSpend>>>> {
    let rows = ReportRepo::vendor_spend(&state.pool, &filter).await?;
    Ok(Json(DataResponse { data: rows }))
}

/// GET /api/v1/reports/labor-hours
pub async fn labor_hours(
    State(state): State<AppState>,
    QueryParams(filter): QueryParams<ReportFilter>,
) -> AppResult<Json<DataResponse<HoursReport>>> {
    let report = ReportRepo::labor_hours(&state.pool, &filter).await?;
    Ok(Json(DataResponse { data: report }))
}

/// GET /api/v1/reports/payroll
pub async fn payroll(
    State(state): State<AppState>,
    QueryParams(filter): QueryParams<ReportFilter>,
) -> AppResult<Json<DataResponse<Vec<LaborerPay>>>> {
    let rows = ReportRepo::payroll(&state.pool, &filter).await?;
    Ok(Json(DataResponse { data: rows }))
}

/// GET /api/v1/reports/task-durations
pub async fn task_durations(
    State(state): State<AppState>,
    QueryParams(filter): QueryParams<ReportFilter>,
) -> AppResult<Json<DataResponse<Vec<TaskDuration>>>> {
    let rows = ReportRepo::task_durations(&state.pool, &filter).await?;
    Ok(Json(DataResponse { data: rows }))
}

/// POST /api/v1/reports/estimate
///
/// Projection only; nothing is written.
pub async fn estimate(
    State(state): State<AppState>,
    Json(request): Json<EstimateRequest>,
) -> AppResult<Json<DataResponse<Estimate>>> {
    let estimate = ReportRepo::estimate(&state.pool, &request).await?;
    Ok(Json(DataResponse { data: estimate }))
}
