pub mod health;
pub mod laborer;
pub mod material_purchase;
pub mod project;
pub mod report;
pub mod task;
pub mod vendor;
pub mod work_session;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /projects                       list, create
/// /projects/{id}                  get, update, hard delete
/// /projects/{id}/archive          archive (POST)
/// /projects/{id}/restore          restore (POST)
///
/// /tasks, /vendors, /laborers,
/// /material-purchases,
/// /work-sessions                  same shape as /projects
///
/// /reports/project-spend          material + delivery spend per project
/// /reports/vendor-spend           spend per vendor
/// /reports/labor-hours            hours per laborer and per project
/// /reports/payroll                gross pay per laborer
/// /reports/task-durations         average duration per task name
/// /reports/estimate               cost projection (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/projects", project::router())
        .nest("/tasks", task::router())
        .nest("/vendors", vendor::router())
        .nest("/laborers", laborer::router())
        .nest("/material-purchases", material_purchase::router())
        .nest("/work-sessions", work_session::router())
        .nest("/reports", report::router())
}
