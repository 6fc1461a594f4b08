//! Hospital floor areas (wards, bays) with bed capacity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Area {
    pub id: Uuid,
    pub name: String,
    /// Number of beds. Missing or zero means occupancy is reported as 0%.
    pub capacity: Option<i32>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateArea {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(range(min = 0))]
    pub capacity: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, Validate)]
pub struct UpdateArea {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    #[validate(range(min = 0))]
    pub capacity: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_capacity_is_rejected() {
        let input = CreateArea {
            name: "Urgencias".to_string(),
            capacity: Some(-1),
        };
        assert!(input.validate().is_err());
    }

    #[test]
    fn capacity_is_optional() {
        let input: CreateArea = serde_json::from_str(r#"{"name":"Pasillo"}"#).unwrap();
        assert!(input.capacity.is_none());
        assert!(input.validate().is_ok());
    }
}
