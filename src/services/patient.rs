//! Patient admission, placement, and discharge; attending physicians catalog.

use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::{violation, AppError, Violation};
use crate::models::pagination::{PagedResult, Pagination};
use crate::models::patient::{
    CreatePatient, CreatePhysician, Patient, PatientSummary, Physician, UpdatePatient,
};

/// Filters for listing patients.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct PatientFilters {
    pub area_id: Option<Uuid>,
    pub search: Option<String>,
}

fn unknown_reference(e: sqlx::Error) -> AppError {
    match violation(&e) {
        Some(Violation::ForeignKey) => AppError::NotFound(
            "Referenced area, staff member, or physician not found".to_string(),
        ),
        _ => AppError::Database(e),
    }
}

/// Admit a patient.
pub async fn admit(pool: &PgPool, input: &CreatePatient) -> Result<Patient, AppError> {
    let patient = sqlx::query_as::<_, Patient>(
        r#"
        INSERT INTO patients (id, first_name, last_name, birth_date, diagnosis,
            area_id, attending_staff_id, physician_id)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING *
        "#,
    )
    .bind(Uuid::now_v7())
    .bind(input.first_name.trim())
    .bind(input.last_name.trim())
    .bind(input.birth_date)
    .bind(&input.diagnosis)
    .bind(input.area_id)
    .bind(input.attending_staff_id)
    .bind(input.physician_id)
    .fetch_one(pool)
    .await
    .map_err(unknown_reference)?;

    tracing::info!(patient_id = %patient.id, area_id = ?patient.area_id, "Patient admitted");
    Ok(patient)
}

pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Patient, AppError> {
    sqlx::query_as::<_, Patient>("SELECT * FROM patients WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Patient not found".to_string()))
}

/// Move a patient or change their care team; absent fields are kept.
pub async fn update(pool: &PgPool, id: Uuid, input: &UpdatePatient) -> Result<Patient, AppError> {
    sqlx::query_as::<_, Patient>(
        r#"
        UPDATE patients
        SET diagnosis = COALESCE($1, diagnosis),
            area_id = COALESCE($2, area_id),
            attending_staff_id = COALESCE($3, attending_staff_id),
            physician_id = COALESCE($4, physician_id)
        WHERE id = $5
        RETURNING *
        "#,
    )
    .bind(&input.diagnosis)
    .bind(input.area_id)
    .bind(input.attending_staff_id)
    .bind(input.physician_id)
    .bind(id)
    .fetch_optional(pool)
    .await
    .map_err(unknown_reference)?
    .ok_or_else(|| AppError::NotFound("Patient not found".to_string()))
}

/// Discharge a patient, removing the row. Triage and chart records go with it;
/// consumption records are kept without the patient reference.
pub async fn discharge(pool: &PgPool, id: Uuid) -> Result<(), AppError> {
    let result = sqlx::query("DELETE FROM patients WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Patient not found".to_string()));
    }

    tracing::info!(patient_id = %id, "Patient discharged");
    Ok(())
}

/// List patients, newest admissions first.
pub async fn list(
    pool: &PgPool,
    filters: &PatientFilters,
    pagination: &Pagination,
) -> Result<PagedResult<PatientSummary>, AppError> {
    let search = filters
        .search
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| format!("%{s}%"));

    const PATIENT_FILTER: &str = r#"
        WHERE ($1::uuid IS NULL OR p.area_id = $1)
          AND ($2::text IS NULL OR p.first_name ILIKE $2 OR p.last_name ILIKE $2)
    "#;

    let total = sqlx::query_scalar::<_, i64>(&format!(
        "SELECT COUNT(*) FROM patients p {PATIENT_FILTER}"
    ))
    .bind(filters.area_id)
    .bind(&search)
    .fetch_one(pool)
    .await?;

    let items = sqlx::query_as::<_, PatientSummary>(&format!(
        "SELECT p.id, p.first_name, p.last_name, p.diagnosis, a.name AS area_name, p.created_at \
         FROM patients p LEFT JOIN areas a ON a.id = p.area_id {PATIENT_FILTER} \
         ORDER BY p.created_at DESC, p.id DESC LIMIT $3 OFFSET $4"
    ))
    .bind(filters.area_id)
    .bind(&search)
    .bind(pagination.limit())
    .bind(pagination.offset())
    .fetch_all(pool)
    .await?;

    Ok(PagedResult::new(items, total, pagination))
}

pub async fn list_physicians(pool: &PgPool) -> Result<Vec<Physician>, AppError> {
    let rows = sqlx::query_as::<_, Physician>("SELECT * FROM physicians ORDER BY full_name ASC")
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn create_physician(
    pool: &PgPool,
    input: &CreatePhysician,
) -> Result<Physician, AppError> {
    let physician = sqlx::query_as::<_, Physician>(
        "INSERT INTO physicians (id, full_name, specialty) VALUES ($1, $2, $3) RETURNING *",
    )
    .bind(Uuid::now_v7())
    .bind(input.full_name.trim())
    .bind(&input.specialty)
    .fetch_one(pool)
    .await?;
    Ok(physician)
}
