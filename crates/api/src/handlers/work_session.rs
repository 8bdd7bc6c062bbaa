//! Handlers for the `/work-sessions` resource.
//!
//! Sessions are always read and written together with their entries.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use reno_core::error::CoreError;
use reno_core::pagination::Page;
use reno_core::types::DbId;
use reno_db::models::filter::WorkSessionFilter;
use reno_db::models::work_session::{
    CreateWorkSession, UpdateWorkSession, WorkSessionWithEntries,
};
use reno_db::repositories::WorkSessionRepo;

use crate::error::{AppError, AppResult};
use crate::query::{PaginationParams, QueryParams};
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/work-sessions
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateWorkSession>,
) -> AppResult<(StatusCode, Json<DataResponse<WorkSessionWithEntries>>)> {
    let session = WorkSessionRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: session })))
}

/// GET /api/v1/work-sessions?project_id=&task_id=&laborer_id=&from=&to=
pub async fn list(
    State(state): State<AppState>,
    QueryParams(params): QueryParams<PaginationParams>,
    QueryParams(filter): QueryParams<WorkSessionFilter>,
) -> AppResult<Json<DataResponse<Page<WorkSessionWithEntries>>>> {
    let page = params.to_request(state.config.max_page_size)?;
    let sessions = WorkSessionRepo::list(&state.pool, &filter, page).await?;
    Ok(Json(DataResponse { data: sessions }))
}

/// GET /api/v1/work-sessions/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<WorkSessionWithEntries>>> {
    let session = WorkSessionRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "WorkSession",
            id,
        }))?;
    Ok(Json(DataResponse { data: session }))
}

/// PUT /api/v1/work-sessions/{id}
///
/// An `entries` array replaces every entry of the session.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateWorkSession>,
) -> AppResult<Json<DataResponse<WorkSessionWithEntries>>> {
    let session = WorkSessionRepo::update(&state.pool, id, &input).await?;
    Ok(Json(DataResponse { data: session }))
}

/// POST /api/v1/work-sessions/{id}/archive
pub async fn archive(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<WorkSessionWithEntries>>> {
    let session = WorkSessionRepo::archive(&state.pool, id).await?;
    Ok(Json(DataResponse { data: session }))
}

/// POST /api/v1/work-sessions/{id}/restore
pub async fn restore(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<WorkSessionWithEntries>>> {
    let session = WorkSessionRepo::restore(&state.pool, id).await?;
    Ok(Json(DataResponse { data: session }))
}

/// DELETE /api/v1/work-sessions/{id}
///
/// Removes the session and all of its entries.
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    WorkSessionRepo::hard_delete(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
