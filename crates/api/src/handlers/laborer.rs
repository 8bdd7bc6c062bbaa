//! Handlers for the `/laborers` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use reno_core::error::CoreError;
use reno_core::pagination::Page;
use reno_core::types::DbId;
use reno_db::models::filter::ArchiveFilter;
use reno_db::models::laborer::{CreateLaborer, Laborer, UpdateLaborer};
use reno_db::repositories::LaborerRepo;

use crate::error::{AppError, AppResult};
use crate::query::{PaginationParams, QueryParams};
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/laborers
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateLaborer>,
) -> AppResult<(StatusCode, Json<DataResponse<Laborer>>)> {
    let laborer = LaborerRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: laborer })))
}

/// GET /api/v1/laborers
pub async fn list(
    State(state): State<AppState>,
    QueryParams(params): QueryParams<PaginationParams>,
    QueryParams(filter): QueryParams<ArchiveFilter>,
) -> AppResult<Json<DataResponse<Page<Laborer>>>> {
    let page = params.to_request(state.config.max_page_size)?;
    let laborers = LaborerRepo::list(&state.pool, &filter, page).await?;
    Ok(Json(DataResponse { data: laborers }))
}

/// GET /api/v1/laborers/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Laborer>>> {
    let laborer = LaborerRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Laborer",
            id,
        }))?;
    Ok(Json(DataResponse { data: laborer }))
}

/// PUT /api/v1/laborers/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateLaborer>,
) -> AppResult<Json<DataResponse<Laborer>>> {
    let laborer = LaborerRepo::update(&state.pool, id, &input).await?;
    Ok(Json(DataResponse { data: laborer }))
}

/// POST /api/v1/laborers/{id}/archive
pub async fn archive(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Laborer>>> {
    let laborer = LaborerRepo::archive(&state.pool, id).await?;
    Ok(Json(DataResponse { data: laborer }))
}

/// POST /api/v1/laborers/{id}/restore
pub async fn restore(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Laborer>>> {
    let laborer = LaborerRepo::restore(&state.pool, id).await?;
    Ok(Json(DataResponse { data: laborer }))
}

/// DELETE /api/v1/laborers/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    LaborerRepo::hard_delete(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
