//! Training courses and staff enrollment.

use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::{violation, AppError, Violation};
use crate::models::training::{Course, CreateCourse, Enrollment, EnrollmentView};

pub async fn create_course(pool: &PgPool, input: &CreateCourse) -> Result<Course, AppError> {
    let course = sqlx::query_as::<_, Course>(
        r#"
        INSERT INTO courses (id, title, description, starts_on, hours)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *
        "#,
    )
    .bind(Uuid::now_v7())
    .bind(input.title.trim())
    .bind(&input.description)
    .bind(input.starts_on)
    .bind(input.hours)
    .fetch_one(pool)
    .await?;

    tracing::info!(course_id = %course.id, title = %course.title, "Course created");
    Ok(course)
}

/// Courses by start date, undated ones last.
pub async fn list_courses(pool: &PgPool) -> Result<Vec<Course>, AppError> {
    let rows = sqlx::query_as::<_, Course>(
        "SELECT * FROM courses ORDER BY starts_on ASC NULLS LAST, title ASC",
    )
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Enroll a staff member in a course once.
pub async fn enroll(pool: &PgPool, course_id: Uuid, staff_id: Uuid) -> Result<Enrollment, AppError> {
    let enrollment = sqlx::query_as::<_, Enrollment>(
        r#"
        INSERT INTO enrollments (id, course_id, staff_id)
        VALUES ($1, $2, $3)
        RETURNING *
        "#,
    )
    .bind(Uuid::now_v7())
    .bind(course_id)
    .bind(staff_id)
    .fetch_one(pool)
    .await
    .map_err(|e| match violation(&e) {
        Some(Violation::Unique) => {
            AppError::Conflict("Staff member is already enrolled in this course".to_string())
        }
        Some(Violation::ForeignKey) => {
            AppError::NotFound("Course or staff member not found".to_string())
        }
        _ => AppError::Database(e),
    })?;

    tracing::info!(course_id = %course_id, staff_id = %staff_id, "Staff enrolled");
    Ok(enrollment)
}

pub async fn list_enrollments(
    pool: &PgPool,
    course_id: Uuid,
) -> Result<Vec<EnrollmentView>, AppError> {
    let exists = sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM courses WHERE id = $1)")
        .bind(course_id)
        .fetch_one(pool)
        .await?;
    if !exists {
        return Err(AppError::NotFound("Course not found".to_string()));
    }

    let rows = sqlx::query_as::<_, EnrollmentView>(
        r#"
        SELECT e.id, e.staff_id, s.first_name || ' ' || s.last_name AS staff_name,
               e.completed, e.enrolled_at
        FROM enrollments e
        INNER JOIN staff_members s ON s.id = e.staff_id
        WHERE e.course_id = $1
        ORDER BY s.last_name ASC, s.first_name ASC
        "#,
    )
    .bind(course_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Mark an enrollment as completed.
pub async fn complete(pool: &PgPool, enrollment_id: Uuid) -> Result<Enrollment, AppError> {
    sqlx::query_as::<_, Enrollment>(
        "UPDATE enrollments SET completed = true WHERE id = $1 RETURNING *",
    )
    .bind(enrollment_id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| AppError::NotFound("Enrollment not found".to_string()))
}
