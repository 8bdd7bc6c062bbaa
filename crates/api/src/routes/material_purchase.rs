//! Route definitions for the `/material-purchases` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::material_purchase;
use crate::state::AppState;

/// Routes mounted at `/material-purchases`.
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
        .route("/", get(material_purchase::list).post(material_purchase::create))
        .route(
            "/{id}",
            get(material_purchase::get_by_id)
                .put(material_purchase::update)
                .delete(material_purchase::delete),
        )
        .route("/{id}/archive", post(material_purchase::archive))
        .route("/{id}/restore", post(material_purchase::restore))
}
