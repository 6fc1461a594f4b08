//! Dashboard statistics aggregation queries.

use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::config::DashboardSettings;
use crate::errors::AppError;
use crate::models::patient::PatientSummary;

/// Aggregated floor statistics for the main overview page.
#[derive(Debug, Serialize)]
pub struct DashboardStats {
    pub total_patients: i64,
    pub total_active_staff: i64,
    pub urgent_count: i64,
    pub low_stock_count: usize,
    pub low_stock_items: Vec<LowStockItem>,
    pub occupancy: Vec<AreaOccupancy>,
    pub recent_admissions: Vec<PatientSummary>,
}

/// Stock item below the dashboard alert threshold.
#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct LowStockItem {
    pub id: Uuid,
    pub name: String,
    pub stock: i32,
    pub unit: Option<String>,
}

/// Saturation band of an area.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OccupancyTier {
    Normal,
    Warning,
    Critical,
}

impl OccupancyTier {
    /// `normal` up to 50%, `warning` from 51% to 80%, `critical` above.
    pub fn classify(percentage: i64) -> Self {
        match percentage {
            p if p > 80 => Self::Critical,
            p if p > 50 => Self::Warning,
            _ => Self::Normal,
        }
    }
}

/// Bed occupancy of one area.
#[derive(Debug, Serialize)]
pub struct AreaOccupancy {
    pub area_id: Uuid,
    pub name: String,
    pub capacity: Option<i32>,
    pub patients: i64,
    pub percentage: i64,
    pub tier: OccupancyTier,
}

/// Floor of `100 * patients / capacity`; 0 when the area has no usable capacity.
pub fn occupancy_percentage(patients: i64, capacity: Option<i32>) -> i64 {
    match capacity {
        Some(capacity) if capacity > 0 => patients.max(0) * 100 / i64::from(capacity),
        _ => 0,
    }
}

/// Intermediate row for per-area patient counts.
#[derive(Debug, sqlx::FromRow)]
struct AreaLoadRow {
    id: Uuid,
    name: String,
    capacity: Option<i32>,
    patients: i64,
}

impl From<AreaLoadRow> for AreaOccupancy {
    fn from(row: AreaLoadRow) -> Self {
        let percentage = occupancy_percentage(row.patients, row.capacity);
        Self {
            area_id: row.id,
            name: row.name,
            capacity: row.capacity,
            patients: row.patients,
            percentage,
            tier: OccupancyTier::classify(percentage),
        }
    }
}

/// Fetch all dashboard statistics in parallel queries.
///
/// Either every figure is produced or the call fails as a whole.
pub async fn get_stats(
    pool: &PgPool,
    settings: &DashboardSettings,
) -> Result<DashboardStats, AppError> {
    let (total_patients, total_active_staff, urgent_count, low_stock_items, occupancy, recent_admissions) = tokio::try_join!(
        fetch_total_patients(pool),
        fetch_active_staff_count(pool),
        fetch_urgent_count(pool, &settings.urgent_area_marker),
        fetch_low_stock_items(pool, settings.low_stock_threshold),
        fetch_occupancy(pool),
        fetch_recent_admissions(pool, settings.recent_admissions_limit),
    )?;

    Ok(DashboardStats {
        total_patients,
        total_active_staff,
        urgent_count,
        low_stock_count: low_stock_items.len(),
        low_stock_items,
        occupancy,
        recent_admissions,
    })
}

async fn fetch_total_patients(pool: &PgPool) -> Result<i64, AppError> {
    let row = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM patients")
        .fetch_one(pool)
        .await?;
    Ok(row)
}

/// Count staff members that have not been deactivated.
async fn fetch_active_staff_count(pool: &PgPool) -> Result<i64, AppError> {
    let row = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM staff_members WHERE is_active = true",
    )
    .fetch_one(pool)
    .await?;
    Ok(row)
}

/// Count patients placed in an area whose name contains the urgent marker.
async fn fetch_urgent_count(pool: &PgPool, marker: &str) -> Result<i64, AppError> {
    // strpos avoids treating `%` or `_` in the marker as LIKE wildcards.
    let row = sqlx::query_scalar::<_, i64>(
        r#"
        SELECT COUNT(*)
        FROM patients p
        INNER JOIN areas a ON a.id = p.area_id
        WHERE strpos(LOWER(a.name), LOWER($1)) > 0
        "#,
    )
    .bind(marker)
    .fetch_one(pool)
    .await?;
    Ok(row)
}

/// Items with stock strictly below the alert threshold, scarcest first.
async fn fetch_low_stock_items(
    pool: &PgPool,
    threshold: i32,
) -> Result<Vec<LowStockItem>, AppError> {
    let rows = sqlx::query_as::<_, LowStockItem>(
        r#"
        SELECT id, name, stock, unit
        FROM stock_items
        WHERE stock < $1
        ORDER BY stock ASC, name ASC
        "#,
    )
    .bind(threshold)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

async fn fetch_occupancy(pool: &PgPool) -> Result<Vec<AreaOccupancy>, AppError> {
    let rows = sqlx::query_as::<_, AreaLoadRow>(
        r#"
        SELECT a.id, a.name, a.capacity, COUNT(p.id) AS patients
        FROM areas a
        LEFT JOIN patients p ON p.area_id = a.id
        GROUP BY a.id, a.name, a.capacity
        ORDER BY a.name ASC
        "#,
    )
    .fetch_all(pool)
    .await?;
    Ok(rows.into_iter().map(AreaOccupancy::from).collect())
}

/// Most recently admitted patients, newest first.
async fn fetch_recent_admissions(
    pool: &PgPool,
    limit: i64,
) -> Result<Vec<PatientSummary>, AppError> {
    let rows = sqlx::query_as::<_, PatientSummary>(
        r#"
        SELECT p.id, p.first_name, p.last_name, p.diagnosis, a.name AS area_name, p.created_at
        FROM patients p
        LEFT JOIN areas a ON a.id = p.area_id
        ORDER BY p.created_at DESC, p.id DESC
        LIMIT $1
        "#,
    )
    .bind(limit)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}
