//! Point-of-care routes: triage intake and nursing chart.

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::errors::{ApiResponse, AppError};
use crate::middleware::acting::ActingStaff;
use crate::models::clinical::{ChartEntry, CreateChartEntry, CreateTriage, TriageRecord};
use crate::services::clinical::{self as clinical_service, ChartOutcome};
use crate::AppState;

/// GET /api/v1/patients/{id}/triage: triage history of a patient.
pub async fn triage_history(
    State(state): State<AppState>,
    Path(patient_id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<TriageRecord>>>, AppError> {
    let rows = clinical_service::list_triage(&state.db, patient_id).await?;
    Ok(ApiResponse::success(rows))
}

/// POST /api/v1/patients/{id}/triage: triage intake.
pub async fn record_triage(
    State(state): State<AppState>,
    ActingStaff(staff_id): ActingStaff,
    Path(patient_id): Path<Uuid>,
    Json(body): Json<CreateTriage>,
) -> Result<Json<ApiResponse<TriageRecord>>, AppError> {
    body.validate()?;
    let record = clinical_service::record_triage(&state.db, patient_id, staff_id, &body).await?;
    Ok(ApiResponse::done(record, "Triage recorded"))
}

/// GET /api/v1/patients/{id}/chart: nursing chart of a patient.
pub async fn chart(
    State(state): State<AppState>,
    Path(patient_id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<ChartEntry>>>, AppError> {
    let rows = clinical_service::list_chart(&state.db, patient_id).await?;
    Ok(ApiResponse::success(rows))
}

/// POST /api/v1/patients/{id}/chart: add a nursing chart entry.
pub async fn add_chart_entry(
    State(state): State<AppState>,
    ActingStaff(staff_id): ActingStaff,
    Path(patient_id): Path<Uuid>,
    Json(body): Json<CreateChartEntry>,
) -> Result<Json<ApiResponse<ChartOutcome>>, AppError> {
    body.validate()?;
    let outcome =
        clinical_service::add_chart_entry(&state.db, patient_id, staff_id, &body).await?;
    let message = match &outcome.consumed_item {
        Some(item) => format!("Chart entry saved, 1 unit of {} consumed", item.name),
        None => "Chart entry saved".to_string(),
    };
    Ok(ApiResponse::done(outcome, message))
}
