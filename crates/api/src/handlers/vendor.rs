//! Handlers for the `/vendors` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use reno_core::error::CoreError;
use reno_core::pagination::Page;
use reno_core::types::DbId;
use reno_db::models::filter::ArchiveFilter;
use reno_db::models::vendor::{CreateVendor, UpdateVendor, Vendor};
use reno_db::repositories::VendorRepo;

use crate::error::{AppError, AppResult};
use crate::query::{PaginationParams, QueryParams};
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/vendors
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateVendor>,
) -> AppResult<(StatusCode, Json<DataResponse<Vendor>>)> {
    let vendor = VendorRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: vendor })))
}

/// GET /api/v1/vendors
pub async fn list(
    State(state): State<AppState>,
    QueryParams(params): QueryParams<PaginationParams>,
    QueryParams(filter): QueryParams<ArchiveFilter>,
) -> AppResult<Json<DataResponse<Page<Vendor>>>> {
    let page = params.to_request(state.config.max_page_size)?;
    let vendors = VendorRepo::list(&state.pool, &filter, page).await?;
    Ok(Json(DataResponse { data: vendors }))
}

/// GET /api/v1/vendors/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vendor>>> {
    let vendor = VendorRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Vendor",
            id,
        }))?;
    Ok(Json(DataResponse { data: vendor }))
}

/// PUT /api/v1/vendors/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateVendor>,
) -> AppResult<Json<DataResponse<Vendor>>> {
    let vendor = VendorRepo::update(&state.pool, id, &input).await?;
    Ok(Json(DataResponse { data: vendor }))
}

/// POST /api/v1/vendors/{id}/archive
pub async fn archive(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vendor>>> {
    let vendor = VendorRepo::archive(&state.pool, id).await?;
    Ok(Json(DataResponse { data: vendor }))
}

/// POST /api/v1/vendors/{id}/restore
pub async fn restore(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vendor>>> {
    let vendor = VendorRepo::restore(&state.pool, id).await?;
    Ok(Json(DataResponse { data: vendor }))
}

/// DELETE /api/v1/vendors/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    VendorRepo::hard_delete(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
