//! Training routes: courses and enrollments.

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::errors::{ApiResponse, AppError};
use crate::models::training::{Course, CreateCourse, CreateEnrollment, Enrollment, EnrollmentView};
use crate::services::training as training_service;
use crate::AppState;

/// GET /api/v1/courses: list courses.
pub async fn list(State(state): State<AppState>) -> Result<Json<ApiResponse<Vec<Course>>>, AppError> {
    let courses = training_service::list_courses(&state.db).await?;
    Ok(ApiResponse::success(courses))
}

/// POST /api/v1/courses: create a course.
pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<CreateCourse>,
) -> Result<Json<ApiResponse<Course>>, AppError> {
    body.validate()?;
    let course = training_service::create_course(&state.db, &body).await?;
    Ok(ApiResponse::done(course, "Course created"))
}

/// GET /api/v1/courses/{id}/enrollments: staff enrolled in a course.
pub async fn enrollments(
    State(state): State<AppState>,
    Path(course_id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<EnrollmentView>>>, AppError> {
    let rows = training_service::list_enrollments(&state.db, course_id).await?;
    Ok(ApiResponse::success(rows))
}

/// POST /api/v1/courses/{id}/enrollments: enroll a staff member.
pub async fn enroll(
    State(state): State<AppState>,
    Path(course_id): Path<Uuid>,
    Json(body): Json<CreateEnrollment>,
) -> Result<Json<ApiResponse<Enrollment>>, AppError> {
    let enrollment = training_service::enroll(&state.db, course_id, body.staff_id).await?;
    Ok(ApiResponse::done(enrollment, "Staff member enrolled"))
}

/// POST /api/v1/enrollments/{id}/complete: mark an enrollment completed.
pub async fn complete(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Enrollment>>, AppError> {
    let enrollment = training_service::complete(&state.db, id).await?;
    Ok(ApiResponse::done(enrollment, "Course completed"))
}
