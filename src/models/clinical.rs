//! Point-of-care records: triage intake and the nursing chart.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// Five-level triage scale, most to least urgent.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq)]
#[sqlx(type_name = "triage_priority")]
pub enum TriagePriority {
    Immediate,
    #[sqlx(rename = "Very_Urgent")]
    VeryUrgent,
    Urgent,
    Standard,
    #[sqlx(rename = "Non_Urgent")]
    NonUrgent,
}

impl TriagePriority {
    /// Maximum wait before first medical contact, in minutes.
    pub fn target_wait_minutes(&self) -> u32 {
        match self {
            Self::Immediate => 0,
            Self::VeryUrgent => 10,
            Self::Urgent => 60,
            Self::Standard => 120,
            Self::NonUrgent => 240,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct TriageRecord {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub performed_by: Uuid,
    pub priority: TriagePriority,
    pub chief_complaint: String,
    pub systolic_bp: Option<i32>,
    pub diastolic_bp: Option<i32>,
    pub heart_rate: Option<i32>,
    pub respiratory_rate: Option<i32>,
    pub temperature: Option<f64>,
    pub oxygen_saturation: Option<i32>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateTriage {
    pub priority: TriagePriority,
    #[validate(length(min = 1, max = 1000))]
    pub chief_complaint: String,
    #[validate(range(min = 40, max = 300))]
    pub systolic_bp: Option<i32>,
    #[validate(range(min = 20, max = 200))]
    pub diastolic_bp: Option<i32>,
    #[validate(range(min = 20, max = 250))]
    pub heart_rate: Option<i32>,
    #[validate(range(min = 4, max = 80))]
    pub respiratory_rate: Option<i32>,
    #[validate(range(min = 30.0, max = 45.0))]
    pub temperature: Option<f64>,
    #[validate(range(min = 50, max = 100))]
    pub oxygen_saturation: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ChartEntry {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub performed_by: Uuid,
    pub shift: Option<String>,
    pub notes: String,
    pub medication: Option<String>,
    pub dose: Option<String>,
    /// Stock item decremented by this administration, if the medication
    /// matched a stocked product.
    pub consumed_item_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateChartEntry {
    #[validate(length(min = 1, max = 30))]
    pub shift: Option<String>,
    #[validate(length(min = 1, max = 4000))]
    pub notes: String,
    #[validate(length(min = 1, max = 150))]
    pub medication: Option<String>,
    #[validate(length(max = 100))]
    pub dose: Option<String>,
}
