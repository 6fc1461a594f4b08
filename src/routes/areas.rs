//! Area routes: wards and bays.

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::errors::{ApiResponse, AppError};
use crate::models::area::{Area, CreateArea, UpdateArea};
use crate::services::area as area_service;
use crate::AppState;

/// GET /api/v1/areas: list areas.
pub async fn list(State(state): State<AppState>) -> Result<Json<ApiResponse<Vec<Area>>>, AppError> {
    let areas = area_service::list(&state.db).await?;
    Ok(ApiResponse::success(areas))
}

/// POST /api/v1/areas: create an area.
pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<CreateArea>,
) -> Result<Json<ApiResponse<Area>>, AppError> {
    body.validate()?;
    let area = area_service::create(&state.db, &body).await?;
    Ok(ApiResponse::done(area, "Area created"))
}

/// GET /api/v1/areas/{id}: get area by ID.
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Area>>, AppError> {
    let area = area_service::find_by_id(&state.db, id).await?;
    Ok(ApiResponse::success(area))
}

/// PUT /api/v1/areas/{id}: rename or resize an area.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateArea>,
) -> Result<Json<ApiResponse<Area>>, AppError> {
    body.validate()?;
    let area = area_service::update(&state.db, id, &body).await?;
    Ok(ApiResponse::done(area, "Area updated"))
}

/// DELETE /api/v1/areas/{id}: delete an unused area.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Uuid>>, AppError> {
    area_service::delete(&state.db, id).await?;
    Ok(ApiResponse::done(id, "Area deleted"))
}
