//! Inventory routes: stock items, manual adjustments, and quick withdrawal.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::errors::{ApiResponse, AppError};
use crate::middleware::acting::ActingStaff;
use crate::models::inventory::{
    ConsumptionEntry, CreateStockItem, StockAdjustment, StockDirection, StockItem, Withdrawal,
};
use crate::services::inventory::{
    self as inventory_service, ConsumptionFilters, ConsumptionOutcome, ConsumptionRequest,
    InventoryFilters,
};
use crate::AppState;

/// GET /api/v1/inventory: list stock items.
pub async fn list(
    State(state): State<AppState>,
    Query(filters): Query<InventoryFilters>,
) -> Result<Json<ApiResponse<Vec<StockItem>>>, AppError> {
    let items = inventory_service::list(&state.db, &filters).await?;
    Ok(ApiResponse::success(items))
}

/// POST /api/v1/inventory: register a stock item.
pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<CreateStockItem>,
) -> Result<Json<ApiResponse<StockItem>>, AppError> {
    body.validate()?;
    let item = inventory_service::create(&state.db, &body).await?;
    Ok(ApiResponse::done(item, "Stock item registered"))
}

/// GET /api/v1/inventory/{id}: get stock item by ID.
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<StockItem>>, AppError> {
    let item = inventory_service::find_by_id(&state.db, id).await?;
    Ok(ApiResponse::success(item))
}

/// POST /api/v1/inventory/{id}/adjust: manual inbound/outbound adjustment.
pub async fn adjust(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<StockAdjustment>,
) -> Result<Json<ApiResponse<StockItem>>, AppError> {
    body.validate()?;
    let item = inventory_service::adjust_stock(&state.db, id, &body).await?;
    let message = match body.direction {
        StockDirection::Inbound => format!("{} units received", body.quantity),
        StockDirection::Outbound => format!("{} units removed", body.quantity),
    };
    Ok(ApiResponse::done(item, message))
}

/// POST /api/v1/inventory/{id}/withdraw: point-of-care quick withdrawal.
pub async fn withdraw(
    State(state): State<AppState>,
    ActingStaff(staff_id): ActingStaff,
    Path(id): Path<Uuid>,
    Json(body): Json<Withdrawal>,
) -> Result<Json<ApiResponse<ConsumptionOutcome>>, AppError> {
    body.validate()?;
    let request = ConsumptionRequest {
        item_id: id,
        quantity: body.quantity,
        reason: body.reason.trim().to_string(),
        performed_by: staff_id,
        patient_id: body.patient_id,
    };
    let outcome = inventory_service::consume(&state.db, &request).await?;
    let message = format!(
        "{} units of {} withdrawn, {} left",
        body.quantity, outcome.item.name, outcome.item.stock
    );
    Ok(ApiResponse::done(outcome, message))
}

/// GET /api/v1/inventory/consumption: consumption log, newest first.
pub async fn consumption(
    State(state): State<AppState>,
    Query(filters): Query<ConsumptionFilters>,
) -> Result<Json<ApiResponse<Vec<ConsumptionEntry>>>, AppError> {
    let rows = inventory_service::list_consumption(&state.db, &filters).await?;
    Ok(ApiResponse::success(rows))
}
