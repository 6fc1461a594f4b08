//! Area management: wards and bays with their bed capacity.

use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::{violation, AppError, Violation};
use crate::models::area::{Area, CreateArea, UpdateArea};

fn name_taken(name: &str) -> AppError {
    AppError::Conflict(format!("Area '{name}' already exists"))
}

pub async fn create(pool: &PgPool, input: &CreateArea) -> Result<Area, AppError> {
    let name = input.name.trim();
    let area = sqlx::query_as::<_, Area>(
        "INSERT INTO areas (id, name, capacity) VALUES ($1, $2, $3) RETURNING *",
    )
    .bind(Uuid::now_v7())
    .bind(name)
    .bind(input.capacity)
    .fetch_one(pool)
    .await
    .map_err(|e| match violation(&e) {
        Some(Violation::Unique) => name_taken(name),
        _ => AppError::Database(e),
    })?;

    tracing::info!(area_id = %area.id, name = %area.name, capacity = ?area.capacity, "Area created");
    Ok(area)
}

pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Area, AppError> {
    sqlx::query_as::<_, Area>("SELECT * FROM areas WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Area not found".to_string()))
}

pub async fn list(pool: &PgPool) -> Result<Vec<Area>, AppError> {
    let areas = sqlx::query_as::<_, Area>("SELECT * FROM areas ORDER BY name ASC")
        .fetch_all(pool)
        .await?;
    Ok(areas)
}

/// Rename an area or change its capacity; absent fields are kept.
pub async fn update(pool: &PgPool, id: Uuid, input: &UpdateArea) -> Result<Area, AppError> {
    let name = input.name.as_deref().map(str::trim);
    sqlx::query_as::<_, Area>(
        r#"
        UPDATE areas
        SET name = COALESCE($1, name), capacity = COALESCE($2, capacity)
        WHERE id = $3
        RETURNING *
        "#,
    )
    .bind(name)
    .bind(input.capacity)
    .bind(id)
    .fetch_optional(pool)
    .await
    .map_err(|e| match violation(&e) {
        Some(Violation::Unique) => name_taken(name.unwrap_or_default()),
        _ => AppError::Database(e),
    })?
    .ok_or_else(|| AppError::NotFound("Area not found".to_string()))
}

/// Delete an area that no patient or assignment refers to.
pub async fn delete(pool: &PgPool, id: Uuid) -> Result<(), AppError> {
    let result = sqlx::query("DELETE FROM areas WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await
        .map_err(|e| match violation(&e) {
            Some(Violation::ForeignKey) => AppError::Conflict(
                "Area still has patients or assignments and cannot be deleted".to_string(),
            ),
            _ => AppError::Database(e),
        })?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Area not found".to_string()));
    }

    tracing::info!(area_id = %id, "Area deleted");
    Ok(())
}
