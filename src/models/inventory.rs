//! Pharmacy and supply inventory with its consumption log.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct StockItem {
    pub id: Uuid,
    pub name: String,
    /// Units on hand. Never negative.
    pub stock: i32,
    /// Reorder alert fires when `stock <= reorder_threshold`.
    pub reorder_threshold: i32,
    pub unit: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl StockItem {
    pub fn needs_reorder(&self) -> bool {
        self.stock <= self.reorder_threshold
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateStockItem {
    #[validate(length(min = 1, max = 150))]
    pub name: String,
    #[validate(range(min = 0))]
    pub stock: Option<i32>,
    #[validate(range(min = 0))]
    pub reorder_threshold: Option<i32>,
    #[validate(length(max = 30))]
    pub unit: Option<String>,
}

/// Direction of a manual stock adjustment.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum StockDirection {
    #[serde(rename = "entrada", alias = "inbound")]
    Inbound,
    #[serde(rename = "salida", alias = "outbound")]
    Outbound,
}

/// Manual count correction: delivery received or units removed.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct StockAdjustment {
    #[validate(range(min = 1))]
    pub quantity: i32,
    pub direction: StockDirection,
}

/// Point-of-care quick withdrawal of supplies.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Withdrawal {
    #[validate(range(min = 1))]
    pub quantity: i32,
    #[validate(length(min = 1, max = 500))]
    pub reason: String,
    pub patient_id: Option<Uuid>,
}

/// Append-only record of stock leaving through a consumption path.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ConsumptionRecord {
    pub id: Uuid,
    pub item_id: Uuid,
    pub quantity: i32,
    pub reason: String,
    pub performed_by: Uuid,
    pub patient_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

/// Consumption log row joined with item and performer names.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ConsumptionEntry {
    pub id: Uuid,
    pub item_id: Uuid,
    pub item_name: String,
    pub quantity: i32,
    pub reason: String,
    pub performed_by: Uuid,
    pub performed_by_name: String,
    pub patient_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}
