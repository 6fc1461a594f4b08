//! Staff administration: registration, updates, and soft deactivation.

use serde::Deserialize;
use sqlx::{PgExecutor, PgPool};
use uuid::Uuid;

use crate::errors::{violation, AppError, Violation};
use crate::models::pagination::{PagedResult, Pagination};
use crate::models::staff::{
    CreateStaffMember, NursingRole, StaffMember, StaffSummary, UpdateStaffMember,
};

/// Filters for listing staff.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct StaffFilters {
    pub active: Option<bool>,
    pub role_id: Option<Uuid>,
    pub search: Option<String>,
}

fn unknown_role(e: sqlx::Error) -> AppError {
    match violation(&e) {
        Some(Violation::ForeignKey) => AppError::NotFound("Nursing role not found".to_string()),
        _ => AppError::Database(e),
    }
}

/// Register a new staff member. New staff start active.
pub async fn register(pool: &PgPool, input: &CreateStaffMember) -> Result<StaffMember, AppError> {
    let staff = sqlx::query_as::<_, StaffMember>(
        r#"
        INSERT INTO staff_members (id, first_name, last_name, phone, address, role_id, is_active)
        VALUES ($1, $2, $3, $4, $5, $6, true)
        RETURNING *
        "#,
    )
    .bind(Uuid::now_v7())
    .bind(input.first_name.trim())
    .bind(input.last_name.trim())
    .bind(&input.phone)
    .bind(&input.address)
    .bind(input.role_id)
    .fetch_one(pool)
    .await
    .map_err(unknown_role)?;

    tracing::info!(staff_id = %staff.id, "Staff member registered");
    Ok(staff)
}

/// Find staff member by ID.
pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<StaffMember, AppError> {
    sqlx::query_as::<_, StaffMember>("SELECT * FROM staff_members WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Staff member not found".to_string()))
}

/// Load a staff member and require them to be active.
///
/// Accepts a pool or a connection inside a transaction.
pub async fn ensure_active<'e, E>(executor: E, id: Uuid) -> Result<StaffMember, AppError>
where
    E: PgExecutor<'e>,
{
    let staff = sqlx::query_as::<_, StaffMember>("SELECT * FROM staff_members WHERE id = $1")
        .bind(id)
        .fetch_optional(executor)
        .await?
        .ok_or_else(|| AppError::NotFound("Staff member not found".to_string()))?;

    if !staff.is_active {
        return Err(AppError::Validation(format!(
            "Staff member {} is deactivated",
            staff.full_name()
        )));
    }
    Ok(staff)
}

/// Replace a staff member's editable fields.
pub async fn update(
    pool: &PgPool,
    id: Uuid,
    input: &UpdateStaffMember,
) -> Result<StaffMember, AppError> {
    sqlx::query_as::<_, StaffMember>(
        r#"
        UPDATE staff_members
        SET first_name = $1, last_name = $2, phone = $3, address = $4, role_id = $5,
            updated_at = NOW()
        WHERE id = $6
        RETURNING *
        "#,
    )
    .bind(input.first_name.trim())
    .bind(input.last_name.trim())
    .bind(&input.phone)
    .bind(&input.address)
    .bind(input.role_id)
    .bind(id)
    .fetch_optional(pool)
    .await
    .map_err(unknown_role)?
    .ok_or_else(|| AppError::NotFound("Staff member not found".to_string()))
}

/// Deactivate a staff member. The row is kept for history.
pub async fn deactivate(pool: &PgPool, id: Uuid) -> Result<StaffMember, AppError> {
    let staff = sqlx::query_as::<_, StaffMember>(
        "UPDATE staff_members SET is_active = false, updated_at = NOW() WHERE id = $1 RETURNING *",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| AppError::NotFound("Staff member not found".to_string()))?;

    tracing::info!(staff_id = %id, name = %staff.full_name(), "Staff member deactivated");
    Ok(staff)
}

/// List staff with filters and pagination, ordered by surname.
pub async fn list(
    pool: &PgPool,
    filters: &StaffFilters,
    pagination: &Pagination,
) -> Result<PagedResult<StaffSummary>, AppError> {
    let search = filters
        .search
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| format!("%{s}%"));

    const STAFF_FILTER: &str = r#"
        WHERE ($1::boolean IS NULL OR s.is_active = $1)
          AND ($2::uuid IS NULL OR s.role_id = $2)
          AND ($3::text IS NULL OR s.first_name ILIKE $3 OR s.last_name ILIKE $3)
    "#;

    let total = sqlx::query_scalar::<_, i64>(&format!(
        "SELECT COUNT(*) FROM staff_members s {STAFF_FILTER}"
    ))
    .bind(filters.active)
    .bind(filters.role_id)
    .bind(&search)
    .fetch_one(pool)
    .await?;

    let items = sqlx::query_as::<_, StaffSummary>(&format!(
        "SELECT s.id, s.first_name, s.last_name, s.phone, r.name AS role_name, s.is_active \
         FROM staff_members s LEFT JOIN nursing_roles r ON r.id = s.role_id {STAFF_FILTER} \
         ORDER BY s.last_name ASC, s.first_name ASC LIMIT $4 OFFSET $5"
    ))
    .bind(filters.active)
    .bind(filters.role_id)
    .bind(&search)
    .bind(pagination.limit())
    .bind(pagination.offset())
    .fetch_all(pool)
    .await?;

    Ok(PagedResult::new(items, total, pagination))
}

/// All nursing roles, alphabetically.
pub async fn list_roles(pool: &PgPool) -> Result<Vec<NursingRole>, AppError> {
    let roles = sqlx::query_as::<_, NursingRole>("SELECT * FROM nursing_roles ORDER BY name ASC")
        .fetch_all(pool)
        .await?;
    Ok(roles)
}
