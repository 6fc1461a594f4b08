//! Patient routes: admission, placement, discharge, and physicians.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::errors::{ApiResponse, AppError};
use crate::models::pagination::{PagedResult, Pagination};
use crate::models::patient::{
    CreatePatient, CreatePhysician, Patient, PatientSummary, Physician, UpdatePatient,
};
use crate::services::patient::{self as patient_service, PatientFilters};
use crate::AppState;

/// GET /api/v1/patients: list patients, newest admissions first.
pub async fn list(
    State(state): State<AppState>,
    Query(pagination): Query<Pagination>,
    Query(filters): Query<PatientFilters>,
) -> Result<Json<ApiResponse<PagedResult<PatientSummary>>>, AppError> {
    let result = patient_service::list(&state.db, &filters, &pagination).await?;
    Ok(ApiResponse::success(result))
}

/// POST /api/v1/patients: admit a patient.
pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<CreatePatient>,
) -> Result<Json<ApiResponse<Patient>>, AppError> {
    body.validate()?;
    let patient = patient_service::admit(&state.db, &body).await?;
    Ok(ApiResponse::done(patient, "Patient admitted"))
}

/// GET /api/v1/patients/{id}: get patient by ID.
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Patient>>, AppError> {
    let patient = patient_service::find_by_id(&state.db, id).await?;
    Ok(ApiResponse::success(patient))
}

/// PUT /api/v1/patients/{id}: move a patient or change their care team.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdatePatient>,
) -> Result<Json<ApiResponse<Patient>>, AppError> {
    body.validate()?;
    let patient = patient_service::update(&state.db, id, &body).await?;
    Ok(ApiResponse::done(patient, "Patient updated"))
}

/// DELETE /api/v1/patients/{id}: discharge (remove) a patient.
pub async fn discharge(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Uuid>>, AppError> {
    patient_service::discharge(&state.db, id).await?;
    Ok(ApiResponse::done(id, "Patient discharged"))
}

/// GET /api/v1/physicians: physicians catalog.
pub async fn physicians(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<Physician>>>, AppError> {
    let rows = patient_service::list_physicians(&state.db).await?;
    Ok(ApiResponse::success(rows))
}

/// POST /api/v1/physicians: add a physician.
pub async fn create_physician(
    State(state): State<AppState>,
    Json(body): Json<CreatePhysician>,
) -> Result<Json<ApiResponse<Physician>>, AppError> {
    body.validate()?;
    let physician = patient_service::create_physician(&state.db, &body).await?;
    Ok(ApiResponse::done(physician, "Physician registered"))
}
