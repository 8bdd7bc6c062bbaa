//! Handlers for the `/material-purchases` resource.
//!
//! A `total_material_cost` sent in create or update bodies is accepted but
//! ignored; the stored total is always re-derived.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use reno_core::error::CoreError;
use reno_core::pagination::Page;
use reno_core::types::DbId;
use reno_db::models::filter::MaterialPurchaseFilter;
use reno_db::models::material_purchase::{
    CreateMaterialPurchase, MaterialPurchase, UpdateMaterialPurchase,
};
use reno_db::repositories::MaterialPurchaseRepo;

use crate::error::{AppError, AppResult};
use crate::query::{PaginationParams, QueryParams};
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/material-purchases
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateMaterialPurchase>,
) -> AppResult<(StatusCode, Json<DataResponse<MaterialPurchase>>)> {
    let purchase = MaterialPurchaseRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: purchase })))
}

/// GET /api/v1/material-purchases?project_id=&task_id=&vendor_id=&from=&to=
pub async fn list(
    State(state): State<AppState>,
    QueryParams(params): QueryParams<PaginationParams>,
    QueryParams(filter): QueryParams<MaterialPurchaseFilter>,
) -> AppResult<Json<DataResponse<Page<MaterialPurchase>>>> {
    let page = params.to_request(state.config.max_page_size)?;
    let purchases = MaterialPurchaseRepo::list(&state.pool, &filter, page).await?;
    Ok(Json(DataResponse { data: purchases }))
}

/// GET /api/v1/material-purchases/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<MaterialPurchase>>> {
    let purchase = MaterialPurchaseRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "MaterialPurchase",
            id,
        }))?;
    Ok(Json(DataResponse { data: purchase }))
}

/// PUT /api/v1/material-purchases/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateMaterialPurchase>,
) -> AppResult<Json<DataResponse<MaterialPurchase>>> {
    let purchase = MaterialPurchaseRepo::update(&state.pool, id, &input).await?;
    Ok(Json(DataResponse { data: purchase }))
}

/// POST /api/v1/material-purchases/{id}/archive
pub async fn archive(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<MaterialPurchase>>> {
    let purchase = MaterialPurchaseRepo::archive(&state.pool, id).await?;
    Ok(Json(DataResponse { data: purchase }))
}

/// POST /api/v1/material-purchases/{id}/restore
pub async fn restore(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<MaterialPurchase>>> {
    let purchase = MaterialPurchaseRepo::restore(&state.pool, id).await?;
    Ok(Json(DataResponse { data: purchase }))
}

/// DELETE /api/v1/material-purchases/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    MaterialPurchaseRepo::hard_delete(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
