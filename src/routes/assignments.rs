//! Shift assignment routes: day roster, assign, unassign, shift catalog.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::Local;
use uuid::Uuid;
use validator::Validate;

use crate::errors::{ApiResponse, AppError};
use crate::models::assignment::{
    Assignment, AssignmentQuery, AssignmentView, CreateAssignment, ShiftType,
};
use crate::services::assignment as assignment_service;
use crate::AppState;

/// GET /api/v1/assignments: roster for `?date=` (defaults to today).
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<AssignmentQuery>,
) -> Result<Json<ApiResponse<Vec<AssignmentView>>>, AppError> {
    let date = query.date.unwrap_or_else(|| Local::now().date_naive());
    let rows = assignment_service::list_for_date(&state.db, date).await?;
    Ok(ApiResponse::success(rows))
}

/// POST /api/v1/assignments: assign a staff member to an area shift.
pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<CreateAssignment>,
) -> Result<Json<ApiResponse<Assignment>>, AppError> {
    body.validate()?;
    let assignment = assignment_service::assign(&state.db, &body).await?;
    Ok(ApiResponse::done(assignment, "Assignment created"))
}

/// DELETE /api/v1/assignments/{id}: remove an assignment.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Uuid>>, AppError> {
    assignment_service::unassign(&state.db, id).await?;
    Ok(ApiResponse::done(id, "Assignment removed"))
}

/// GET /api/v1/shift-types: shift catalog.
pub async fn shift_types(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<ShiftType>>>, AppError> {
    let rows = assignment_service::list_shift_types(&state.db).await?;
    Ok(ApiResponse::success(rows))
}
