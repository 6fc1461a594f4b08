//! Training courses and staff enrollments.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Course {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub starts_on: Option<NaiveDate>,
    pub hours: Option<i32>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateCourse {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    pub description: Option<String>,
    pub starts_on: Option<NaiveDate>,
    #[validate(range(min = 1))]
    pub hours: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Enrollment {
    pub id: Uuid,
    pub course_id: Uuid,
    pub staff_id: Uuid,
    pub completed: bool,
    pub enrolled_at: DateTime<Utc>,
}

/// Enrollment joined with the enrolled staff member's name.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct EnrollmentView {
    pub id: Uuid,
    pub staff_id: Uuid,
    pub staff_name: String,
    pub completed: bool,
    pub enrolled_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateEnrollment {
    pub staff_id: Uuid,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn course(title: &str, hours: Option<i32>) -> CreateCourse {
        CreateCourse {
            title: title.to_string(),
            description: None,
            starts_on: NaiveDate::from_ymd_opt(2025, 7, 1),
            hours,
        }
    }

    #[test]
    fn course_requires_title_and_positive_hours() {
        assert!(course("RCP básico", Some(8)).validate().is_ok());
        assert!(course("RCP básico", None).validate().is_ok());
        assert!(course("", Some(8)).validate().is_err());
        assert!(course("RCP básico", Some(0)).validate().is_err());
    }
}
