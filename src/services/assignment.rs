//! Assignment guard: places nurses in areas per shift, at most once per (date, shift, nurse).

use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::{violation, AppError, Violation};
use crate::models::assignment::{Assignment, AssignmentView, CreateAssignment, ShiftType};
use crate::services::staff;

fn duplicate(input: &CreateAssignment) -> AppError {
    AppError::DuplicateAssignment(format!(
        "Staff member already has a {} assignment on {}",
        input.shift, input.date
    ))
}

/// Assign a staff member to an area for one shift on one date.
///
/// The existence check and the insert share one transaction; the unique
/// constraint on (date, shift, staff) settles concurrent attempts.
pub async fn assign(pool: &PgPool, input: &CreateAssignment) -> Result<Assignment, AppError> {
    let mut tx = pool.begin().await?;

    staff::ensure_active(&mut *tx, input.staff_id).await?;

    let area_exists =
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM areas WHERE id = $1)")
            .bind(input.area_id)
            .fetch_one(&mut *tx)
            .await?;
    if !area_exists {
        return Err(AppError::NotFound("Area not found".to_string()));
    }

    let shift_exists =
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM shift_types WHERE name = $1)")
            .bind(&input.shift)
            .fetch_one(&mut *tx)
            .await?;
    if !shift_exists {
        return Err(AppError::NotFound(format!(
            "Shift '{}' not found",
            input.shift
        )));
    }

    let taken = sqlx::query_scalar::<_, bool>(
        r#"
        SELECT EXISTS(
            SELECT 1 FROM assignments
            WHERE assignment_date = $1 AND shift = $2 AND staff_id = $3
        )
        "#,
    )
    .bind(input.date)
    .bind(&input.shift)
    .bind(input.staff_id)
    .fetch_one(&mut *tx)
    .await?;
    if taken {
        tracing::warn!(staff_id = %input.staff_id, shift = %input.shift, date = %input.date, "Duplicate assignment rejected");
        return Err(duplicate(input));
    }

    let assignment = sqlx::query_as::<_, Assignment>(
        r#"
        INSERT INTO assignments (id, assignment_date, shift, area_id, staff_id)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *
        "#,
    )
    .bind(Uuid::now_v7())
    .bind(input.date)
    .bind(&input.shift)
    .bind(input.area_id)
    .bind(input.staff_id)
    .fetch_one(&mut *tx)
    .await
    .map_err(|e| match violation(&e) {
        Some(Violation::Unique) => {
            tracing::warn!(staff_id = %input.staff_id, shift = %input.shift, date = %input.date, "Concurrent duplicate assignment rejected");
            duplicate(input)
        }
        _ => AppError::Database(e),
    })?;

    tx.commit().await?;

    tracing::info!(
        assignment_id = %assignment.id,
        staff_id = %assignment.staff_id,
        area_id = %assignment.area_id,
        shift = %assignment.shift,
        date = %assignment.assignment_date,
        "Staff assigned"
    );
    Ok(assignment)
}

/// Remove an assignment. Other records of the staff member are untouched.
pub async fn unassign(pool: &PgPool, id: Uuid) -> Result<(), AppError> {
    let result = sqlx::query("DELETE FROM assignments WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Assignment not found".to_string()));
    }

    tracing::info!(assignment_id = %id, "Assignment removed");
    Ok(())
}

/// Roster for one date, ordered by shift start then area.
pub async fn list_for_date(
    pool: &PgPool,
    date: NaiveDate,
) -> Result<Vec<AssignmentView>, AppError> {
    let rows = sqlx::query_as::<_, AssignmentView>(
        r#"
        SELECT a.id, a.assignment_date, a.shift, a.area_id, ar.name AS area_name,
               a.staff_id, s.first_name || ' ' || s.last_name AS staff_name
        FROM assignments a
        INNER JOIN areas ar ON ar.id = a.area_id
        INNER JOIN staff_members s ON s.id = a.staff_id
        INNER JOIN shift_types st ON st.name = a.shift
        WHERE a.assignment_date = $1
        ORDER BY st.starts_at ASC, ar.name ASC, staff_name ASC
        "#,
    )
    .bind(date)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Shift catalog ordered by start time.
pub async fn list_shift_types(pool: &PgPool) -> Result<Vec<ShiftType>, AppError> {
    let rows = sqlx::query_as::<_, ShiftType>("SELECT * FROM shift_types ORDER BY starts_at ASC")
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_message_names_shift_and_date() {
        let input = CreateAssignment {
            staff_id: Uuid::now_v7(),
            area_id: Uuid::now_v7(),
            shift: "Matutino".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
        };
        let err = duplicate(&input);
        assert!(err.is_duplicate_assignment());
        assert_eq!(
            err.to_string(),
            "Duplicate assignment: Staff member already has a Matutino assignment on 2025-06-01"
        );
    }
}
