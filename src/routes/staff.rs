//! Staff administration routes: registration, updates, deactivation, roles.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::errors::{ApiResponse, AppError};
use crate::models::pagination::{PagedResult, Pagination};
use crate::models::staff::{
    CreateStaffMember, NursingRole, StaffMember, StaffSummary, UpdateStaffMember,
};
use crate::services::staff::{self as staff_service, StaffFilters};
use crate::AppState;

/// GET /api/v1/staff: list staff with filters and pagination.
pub async fn list(
    State(state): State<AppState>,
    Query(pagination): Query<Pagination>,
    Query(filters): Query<StaffFilters>,
) -> Result<Json<ApiResponse<PagedResult<StaffSummary>>>, AppError> {
    let result = staff_service::list(&state.db, &filters, &pagination).await?;
    Ok(ApiResponse::success(result))
}

/// POST /api/v1/staff: register a staff member.
pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<CreateStaffMember>,
) -> Result<Json<ApiResponse<StaffMember>>, AppError> {
    body.validate()?;
    let staff = staff_service::register(&state.db, &body).await?;
    Ok(ApiResponse::done(staff, "Staff member registered"))
}

/// GET /api/v1/staff/{id}: get staff member by ID.
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<StaffMember>>, AppError> {
    let staff = staff_service::find_by_id(&state.db, id).await?;
    Ok(ApiResponse::success(staff))
}

/// PUT /api/v1/staff/{id}: update a staff member's details.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateStaffMember>,
) -> Result<Json<ApiResponse<StaffMember>>, AppError> {
    body.validate()?;
    let staff = staff_service::update(&state.db, id, &body).await?;
    Ok(ApiResponse::done(staff, "Staff member updated"))
}

/// POST /api/v1/staff/{id}/deactivate: deactivate a staff member.
pub async fn deactivate(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<StaffMember>>, AppError> {
    let staff = staff_service::deactivate(&state.db, id).await?;
    Ok(ApiResponse::done(staff, "Staff member deactivated"))
}

/// GET /api/v1/roles: nursing role catalog.
pub async fn roles(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<NursingRole>>>, AppError> {
    let roles = staff_service::list_roles(&state.db).await?;
    Ok(ApiResponse::success(roles))
}
