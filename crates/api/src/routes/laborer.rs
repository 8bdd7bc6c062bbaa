//! Route definitions for the `/laborers` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::laborer;
use crate::state::AppState;

/// Routes mounted at `/laborers`.
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
        .route("/", get(laborer::list).post(laborer::create))
        .route(
            "/{id}",
            get(laborer::get_by_id)
                .put(laborer::update)
                .delete(laborer::delete),
        )
        .route("/{id}/archive", post(laborer::archive))
        .route("/{id}/restore", post(laborer::restore))
}
