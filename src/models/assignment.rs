//! Shift catalog and nurse-to-area shift assignments.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// Named shift (Matutino, Vespertino, Nocturno) with its working hours.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ShiftType {
    pub name: String,
    pub starts_at: NaiveTime,
    pub ends_at: NaiveTime,
}

/// A staff member placed in an area for one shift on one date.
/// At most one row exists per (date, shift, staff member).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Assignment {
    pub id: Uuid,
    pub assignment_date: NaiveDate,
    pub shift: String,
    pub area_id: Uuid,
    pub staff_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Roster row for a day view.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AssignmentView {
    pub id: Uuid,
    pub assignment_date: NaiveDate,
    pub shift: String,
    pub area_id: Uuid,
    pub area_name: String,
    pub staff_id: Uuid,
    pub staff_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateAssignment {
    pub staff_id: Uuid,
    pub area_id: Uuid,
    #[validate(length(min = 1, max = 30))]
    pub shift: String,
    pub date: NaiveDate,
}

/// Query for the day roster; defaults to today.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AssignmentQuery {
    pub date: Option<NaiveDate>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_assignment_from_form() {
        let input: CreateAssignment = serde_json::from_value(serde_json::json!({
            "staff_id": Uuid::now_v7(),
            "area_id": Uuid::now_v7(),
            "shift": "Matutino",
            "date": "2025-06-01",
        }))
        .unwrap();
        assert_eq!(input.date, NaiveDate::from_ymd_opt(2025, 6, 1).unwrap());
        assert!(input.validate().is_ok());
    }

    #[test]
    fn blank_shift_is_rejected() {
        let input = CreateAssignment {
            staff_id: Uuid::now_v7(),
            area_id: Uuid::now_v7(),
            shift: String::new(),
            date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
        };
        assert!(input.validate().is_err());
    }
}
