//! Inventory guard: stock adjustments and consumption with a non-negative stock invariant.
//!
//! Every mutation locks the item row (`FOR UPDATE`) inside a transaction, so the
//! sufficiency check and the write act on the same stock value. Concurrent
//! consumers of one item are serialized by the row lock.

use serde::{Deserialize, Serialize};
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::errors::{violation, AppError, Violation};
use crate::models::inventory::{
    ConsumptionEntry, ConsumptionRecord, CreateStockItem, StockAdjustment, StockDirection,
    StockItem,
};
use crate::services::staff;

/// Default number of consumption log rows returned.
const DEFAULT_LOG_LIMIT: i64 = 100;

/// Filters for listing stock items.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct InventoryFilters {
    /// Only items at or below their reorder threshold.
    #[serde(default)]
    pub reorder_only: bool,
    pub search: Option<String>,
}

/// Filters for the consumption log.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ConsumptionFilters {
    pub item_id: Option<Uuid>,
    pub patient_id: Option<Uuid>,
    pub limit: Option<i64>,
}

/// A request to take units out of stock through a consumption path.
#[derive(Debug, Clone)]
pub struct ConsumptionRequest {
    pub item_id: Uuid,
    pub quantity: i32,
    pub reason: String,
    pub performed_by: Uuid,
    pub patient_id: Option<Uuid>,
}

/// Result of a successful consumption.
#[derive(Debug, Serialize)]
pub struct ConsumptionOutcome {
    pub item: StockItem,
    pub record: ConsumptionRecord,
}

/// Compute the stock level after moving `quantity` units in `direction`.
pub fn next_stock(
    item: &StockItem,
    quantity: i32,
    direction: StockDirection,
) -> Result<i32, AppError> {
    if quantity <= 0 {
        return Err(AppError::Validation(
            "Quantity must be a positive number of units".to_string(),
        ));
    }

    match direction {
        StockDirection::Inbound => item.stock.checked_add(quantity).ok_or_else(|| {
            AppError::Validation(format!("Stock for '{}' would overflow", item.name))
        }),
        StockDirection::Outbound if item.stock < quantity => Err(AppError::InsufficientStock {
            item: item.name.clone(),
            available: item.stock,
            requested: quantity,
        }),
        StockDirection::Outbound => Ok(item.stock - quantity),
    }
}

/// Register a new stock item.
pub async fn create(pool: &PgPool, input: &CreateStockItem) -> Result<StockItem, AppError> {
    let item = sqlx::query_as::<_, StockItem>(
        r#"
        INSERT INTO stock_items (id, name, stock, reorder_threshold, unit)
        VALUES ($1, $2, COALESCE($3, 0), COALESCE($4, 0), $5)
        RETURNING *
        "#,
    )
    .bind(Uuid::now_v7())
    .bind(input.name.trim())
    .bind(input.stock)
    .bind(input.reorder_threshold)
    .bind(&input.unit)
    .fetch_one(pool)
    .await
    .map_err(|e| match violation(&e) {
        Some(Violation::Unique) => {
            AppError::Conflict(format!("Stock item '{}' already exists", input.name.trim()))
        }
        Some(Violation::Check) => {
            AppError::Validation("Stock and reorder threshold cannot be negative".to_string())
        }
        _ => AppError::Database(e),
    })?;

    tracing::info!(item_id = %item.id, name = %item.name, stock = item.stock, "Stock item created");
    Ok(item)
}

/// Find stock item by ID.
pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<StockItem, AppError> {
    sqlx::query_as::<_, StockItem>("SELECT * FROM stock_items WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Stock item not found".to_string()))
}

/// List stock items alphabetically.
pub async fn list(pool: &PgPool, filters: &InventoryFilters) -> Result<Vec<StockItem>, AppError> {
    let search = filters
        .search
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| format!("%{s}%"));

    let items = sqlx::query_as::<_, StockItem>(
        r#"
        SELECT * FROM stock_items
        WHERE ($1 = false OR stock <= reorder_threshold)
          AND ($2::text IS NULL OR name ILIKE $2)
        ORDER BY name ASC
        "#,
    )
    .bind(filters.reorder_only)
    .bind(search)
    .fetch_all(pool)
    .await?;
    Ok(items)
}

/// Lock an item row for the rest of the surrounding transaction.
async fn lock_item(conn: &mut PgConnection, id: Uuid) -> Result<StockItem, AppError> {
    sqlx::query_as::<_, StockItem>("SELECT * FROM stock_items WHERE id = $1 FOR UPDATE")
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?
        .ok_or_else(|| AppError::NotFound("Stock item not found".to_string()))
}

async fn store_stock(
    conn: &mut PgConnection,
    id: Uuid,
    stock: i32,
) -> Result<StockItem, AppError> {
    let item = sqlx::query_as::<_, StockItem>(
        "UPDATE stock_items SET stock = $1, updated_at = NOW() WHERE id = $2 RETURNING *",
    )
    .bind(stock)
    .bind(id)
    .fetch_one(&mut *conn)
    .await
    .map_err(|e| match violation(&e) {
        Some(Violation::Check) => {
            AppError::Internal(format!("Stock for item {id} would become negative ({stock})"))
        }
        _ => AppError::Database(e),
    })?;
    Ok(item)
}

/// Manual stock adjustment (delivery in, count correction out).
///
/// Writes no consumption record: manual counts are not consumption.
pub async fn adjust_stock(
    pool: &PgPool,
    id: Uuid,
    adjustment: &StockAdjustment,
) -> Result<StockItem, AppError> {
    let mut tx = pool.begin().await?;

    let item = lock_item(&mut tx, id).await?;
    let new_stock = match next_stock(&item, adjustment.quantity, adjustment.direction) {
        Ok(stock) => stock,
        Err(e) => {
            tracing::warn!(item_id = %id, quantity = adjustment.quantity, direction = ?adjustment.direction, error = %e, "Stock adjustment rejected");
            return Err(e);
        }
    };
    let updated = store_stock(&mut tx, id, new_stock).await?;

    tx.commit().await?;

    tracing::info!(
        item_id = %id,
        direction = ?adjustment.direction,
        quantity = adjustment.quantity,
        previous = item.stock,
        stock = updated.stock,
        "Stock adjusted"
    );
    Ok(updated)
}

/// Consume stock and append the consumption record in one transaction.
pub async fn consume(
    pool: &PgPool,
    request: &ConsumptionRequest,
) -> Result<ConsumptionOutcome, AppError> {
    let mut tx = pool.begin().await?;
    let outcome = consume_in(&mut tx, request).await?;
    tx.commit().await?;
    Ok(outcome)
}

/// Consumption inside a caller-owned transaction.
///
/// The caller commits; any error leaves the transaction to be rolled back.
pub async fn consume_in(
    conn: &mut PgConnection,
    request: &ConsumptionRequest,
) -> Result<ConsumptionOutcome, AppError> {
    staff::ensure_active(&mut *conn, request.performed_by).await?;

    let item = lock_item(conn, request.item_id).await?;
    let new_stock = match next_stock(&item, request.quantity, StockDirection::Outbound) {
        Ok(stock) => stock,
        Err(e) => {
            tracing::warn!(item_id = %request.item_id, quantity = request.quantity, error = %e, "Consumption rejected");
            return Err(e);
        }
    };
    let item = store_stock(conn, request.item_id, new_stock).await?;

    let record = sqlx::query_as::<_, ConsumptionRecord>(
        r#"
        INSERT INTO consumption_records (id, item_id, quantity, reason, performed_by, patient_id)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING *
        "#,
    )
    .bind(Uuid::now_v7())
    .bind(request.item_id)
    .bind(request.quantity)
    .bind(&request.reason)
    .bind(request.performed_by)
    .bind(request.patient_id)
    .fetch_one(&mut *conn)
    .await
    .map_err(|e| match violation(&e) {
        Some(Violation::ForeignKey) => AppError::NotFound("Patient not found".to_string()),
        _ => AppError::Database(e),
    })?;

    tracing::info!(
        item_id = %item.id,
        quantity = request.quantity,
        stock = item.stock,
        performed_by = %request.performed_by,
        patient_id = ?request.patient_id,
        "Stock consumed"
    );
    Ok(ConsumptionOutcome { item, record })
}

/// Find the stocked product a medication name refers to (case-insensitive, trimmed).
pub async fn find_by_name(
    conn: &mut PgConnection,
    name: &str,
) -> Result<Option<StockItem>, AppError> {
    let item = sqlx::query_as::<_, StockItem>(
        "SELECT * FROM stock_items WHERE LOWER(name) = LOWER($1)",
    )
    .bind(name.trim())
    .fetch_optional(&mut *conn)
    .await?;
    Ok(item)
}

/// Consumption log, newest first.
pub async fn list_consumption(
    pool: &PgPool,
    filters: &ConsumptionFilters,
) -> Result<Vec<ConsumptionEntry>, AppError> {
    let limit = filters.limit.unwrap_or(DEFAULT_LOG_LIMIT).clamp(1, 500);

    let rows = sqlx::query_as::<_, ConsumptionEntry>(
        r#"
        SELECT c.id, c.item_id, i.name AS item_name, c.quantity, c.reason,
               c.performed_by, s.first_name || ' ' || s.last_name AS performed_by_name,
               c.patient_id, c.created_at
        FROM consumption_records c
        INNER JOIN stock_items i ON i.id = c.item_id
        INNER JOIN staff_members s ON s.id = c.performed_by
        WHERE ($1::uuid IS NULL OR c.item_id = $1)
          AND ($2::uuid IS NULL OR c.patient_id = $2)
        ORDER BY c.created_at DESC, c.id DESC
        LIMIT $3
        "#,
    )
    .bind(filters.item_id)
    .bind(filters.patient_id)
    .bind(limit)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}
