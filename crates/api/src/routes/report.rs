//! Route definitions for the `/reports` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::report;
use crate::state::AppState;

/// Routes mounted at `/reports`.
///
/// ```text
/// GET    /project-spend    -> project_spend
/// GET    /vendor-spend     -> vendor_spend
/// GET    /labor-hours      -> labor_hours
/// GET    /payroll          -> payroll
/// GET    /task-durations   -> task_durations
/// POST   /estimate         -> estimate
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/project-spend", get(report::project_spend))
        .route("/vendor-spend", get(report::vendor_spend))
        .route("/labor-hours", get(report::labor_hours))
        .route("/payroll", get(report::payroll))
        .route("/task-durations", get(report::task_durations))
        .route("/estimate", post(report::estimate))
}
