//! Nursing staff and their roles.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// Catalog entry for a nursing role (floor lead, general nurse, assistant).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct NursingRole {
    pub id: Uuid,
    pub name: String,
    pub authority_level: Option<String>,
}

/// Staff member row. Staff are deactivated, never deleted.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct StaffMember {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub role_id: Option<Uuid>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl StaffMember {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Summary DTO for list views, with the role name resolved.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct StaffSummary {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub role_name: Option<String>,
    pub is_active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateStaffMember {
    #[validate(length(min = 1, max = 100))]
    pub first_name: String,
    #[validate(length(min = 1, max = 150))]
    pub last_name: String,
    #[validate(length(max = 20))]
    pub phone: Option<String>,
    #[validate(length(max = 255))]
    pub address: Option<String>,
    pub role_id: Option<Uuid>,
}

/// Full replacement of a staff member's editable fields.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateStaffMember {
    #[validate(length(min = 1, max = 100))]
    pub first_name: String,
    #[validate(length(min = 1, max = 150))]
    pub last_name: String,
    #[validate(length(max = 20))]
    pub phone: Option<String>,
    #[validate(length(max = 255))]
    pub address: Option<String>,
    pub role_id: Option<Uuid>,
}
