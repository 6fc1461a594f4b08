//! Patients, their placement, and the attending physicians catalog.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// Patient row. Discharge removes the row physically.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Patient {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub birth_date: Option<NaiveDate>,
    pub diagnosis: Option<String>,
    pub area_id: Option<Uuid>,
    pub attending_staff_id: Option<Uuid>,
    pub physician_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

/// Summary DTO for list views and the dashboard admissions feed.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PatientSummary {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub diagnosis: Option<String>,
    pub area_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreatePatient {
    #[validate(length(min = 1, max = 100))]
    pub first_name: String,
    #[validate(length(min = 1, max = 150))]
    pub last_name: String,
    pub birth_date: Option<NaiveDate>,
    #[validate(length(max = 2000))]
    pub diagnosis: Option<String>,
    pub area_id: Option<Uuid>,
    pub attending_staff_id: Option<Uuid>,
    pub physician_id: Option<Uuid>,
}

/// Partial update; absent fields keep their stored value.
#[derive(Debug, Clone, Serialize, Deserialize, Default, Validate)]
pub struct UpdatePatient {
    #[validate(length(max = 2000))]
    pub diagnosis: Option<String>,
    pub area_id: Option<Uuid>,
    pub attending_staff_id: Option<Uuid>,
    pub physician_id: Option<Uuid>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Physician {
    pub id: Uuid,
    pub full_name: String,
    pub specialty: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreatePhysician {
    #[validate(length(min = 1, max = 200))]
    pub full_name: String,
    #[validate(length(max = 100))]
    pub specialty: Option<String>,
}
