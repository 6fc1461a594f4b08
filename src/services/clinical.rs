//! Point-of-care records: triage intake and nursing chart entries.
//!
//! A chart entry that administers a stocked medication consumes one unit of it
//! through the inventory guard, in the same transaction as the entry itself.

use serde::Serialize;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::errors::{violation, AppError, Violation};
use crate::models::clinical::{ChartEntry, CreateChartEntry, CreateTriage, TriageRecord};
use crate::models::inventory::StockItem;
use crate::services::inventory::{self, ConsumptionRequest};
use crate::services::staff;

/// Consumption reason recorded for medication given at the bedside.
pub const MEDICATION_REASON: &str = "Administración de medicamento";

/// Result of charting, including the stock item decremented, if any.
#[derive(Debug, Serialize)]
pub struct ChartOutcome {
    pub entry: ChartEntry,
    pub consumed_item: Option<StockItem>,
}

/// Medication name as written on the chart, or `None` when blank.
pub fn medication_name(medication: Option<&str>) -> Option<&str> {
    medication.map(str::trim).filter(|m| !m.is_empty())
}

async fn ensure_patient(conn: &mut PgConnection, patient_id: Uuid) -> Result<(), AppError> {
    let exists =
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM patients WHERE id = $1)")
            .bind(patient_id)
            .fetch_one(&mut *conn)
            .await?;
    if !exists {
        return Err(AppError::NotFound("Patient not found".to_string()));
    }
    Ok(())
}

/// Record a triage assessment for a patient.
pub async fn record_triage(
    pool: &PgPool,
    patient_id: Uuid,
    performed_by: Uuid,
    input: &CreateTriage,
) -> Result<TriageRecord, AppError> {
    let mut conn = pool.acquire().await?;
    staff::ensure_active(&mut *conn, performed_by).await?;
    ensure_patient(&mut conn, patient_id).await?;

    let record = sqlx::query_as::<_, TriageRecord>(
        r#"
        INSERT INTO triage_records (id, patient_id, performed_by, priority, chief_complaint,
            systolic_bp, diastolic_bp, heart_rate, respiratory_rate, temperature, oxygen_saturation)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
        RETURNING *
        "#,
    )
    .bind(Uuid::now_v7())
    .bind(patient_id)
    .bind(performed_by)
    .bind(input.priority)
    .bind(input.chief_complaint.trim())
    .bind(input.systolic_bp)
    .bind(input.diastolic_bp)
    .bind(input.heart_rate)
    .bind(input.respiratory_rate)
    .bind(input.temperature)
    .bind(input.oxygen_saturation)
    .fetch_one(&mut *conn)
    .await?;

    tracing::info!(
        patient_id = %patient_id,
        performed_by = %performed_by,
        priority = ?record.priority,
        target_wait_minutes = record.priority.target_wait_minutes(),
        "Triage recorded"
    );
    Ok(record)
}

/// Triage history of a patient, newest first.
pub async fn list_triage(pool: &PgPool, patient_id: Uuid) -> Result<Vec<TriageRecord>, AppError> {
    let rows = sqlx::query_as::<_, TriageRecord>(
        "SELECT * FROM triage_records WHERE patient_id = $1 ORDER BY created_at DESC, id DESC",
    )
    .bind(patient_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Add a nursing chart entry, consuming one unit of the administered medication
/// when it matches a stocked product.
pub async fn add_chart_entry(
    pool: &PgPool,
    patient_id: Uuid,
    performed_by: Uuid,
    input: &CreateChartEntry,
) -> Result<ChartOutcome, AppError> {
    let mut tx = pool.begin().await?;

    staff::ensure_active(&mut *tx, performed_by).await?;
    ensure_patient(&mut tx, patient_id).await?;

    let medication = medication_name(input.medication.as_deref());
    let consumed_item = match medication {
        Some(name) => match inventory::find_by_name(&mut tx, name).await? {
            Some(item) => {
                let request = ConsumptionRequest {
                    item_id: item.id,
                    quantity: 1,
                    reason: MEDICATION_REASON.to_string(),
                    performed_by,
                    patient_id: Some(patient_id),
                };
                Some(inventory::consume_in(&mut tx, &request).await?.item)
            }
            None => {
                tracing::debug!(medication = %name, "Medication not stocked, no consumption");
                None
            }
        },
        None => None,
    };

    let entry = sqlx::query_as::<_, ChartEntry>(
        r#"
        INSERT INTO chart_entries (id, patient_id, performed_by, shift, notes, medication, dose,
            consumed_item_id)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING *
        "#,
    )
    .bind(Uuid::now_v7())
    .bind(patient_id)
    .bind(performed_by)
    .bind(&input.shift)
    .bind(input.notes.trim())
    .bind(medication)
    .bind(&input.dose)
    .bind(consumed_item.as_ref().map(|item| item.id))
    .fetch_one(&mut *tx)
    .await
    .map_err(|e| match violation(&e) {
        Some(Violation::ForeignKey) => AppError::NotFound(format!(
            "Shift '{}' not found",
            input.shift.as_deref().unwrap_or_default()
        )),
        _ => AppError::Database(e),
    })?;

    tx.commit().await?;

    tracing::info!(
        patient_id = %patient_id,
        performed_by = %performed_by,
        consumed_item_id = ?entry.consumed_item_id,
        "Chart entry added"
    );
    Ok(ChartOutcome {
        entry,
        consumed_item,
    })
}

/// Nursing chart of a patient, newest first.
pub async fn list_chart(pool: &PgPool, patient_id: Uuid) -> Result<Vec<ChartEntry>, AppError> {
    let rows = sqlx::query_as::<_, ChartEntry>(
        "SELECT * FROM chart_entries WHERE patient_id = $1 ORDER BY created_at DESC, id DESC",
    )
    .bind(patient_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn medication_name_trims() {
        assert_eq!(medication_name(Some("  Ketorolaco ")), Some("Ketorolaco"));
    }

    #[test]
    fn blank_medication_is_none() {
        assert_eq!(medication_name(Some("   ")), None);
        assert_eq!(medication_name(None), None);
    }
}
