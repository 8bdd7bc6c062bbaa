//! Route definitions for the `/work-sessions` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::work_session;
use crate::state::AppState;

/// Routes mounted at `/work-sessions`.
///
/// ```text
/// GET    /               -> list
/// POST   /               -> create
/// GET    /{id}           -> get_by_id
/// PUT    /{id}           -> update
/// DELETE /{id}           -> delete (hard)
/// POST   /{id}/archive   -> archive
/// POST   /{id}/restore   -> restore
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(work_session::list).post(work_session::create))
        .route(
            "/{id}",
            get(work_session::get_by_id)
                .put(work_session::update)
                .delete(work_session::delete),
        )
        .route("/{id}/archive", post(work_session::archive))
        .route("/{id}/restore", post(work_session::restore))
}
