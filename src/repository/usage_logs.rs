//! Usage logs repository for database operations

use chrono::{DateTime, Utc};
use sqlx::{Pool, Postgres, Transaction};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::enums::UsageStatus,
    models::usage_log::UsageLog,
};

/// Column values for an insert/update, already parsed and merged by the
/// service layer
#[derive(Debug, Clone)]
pub struct UsageLogRecord {
    pub asset_id: Uuid,
    pub project_id: Option<Uuid>,
    pub test_profile_id: Option<Uuid>,
    pub operator: String,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub status: UsageStatus,
    pub notes: Option<String>,
    pub selected_config_ids: Option<Vec<Uuid>>,
    pub selected_waterfall: Option<String>,
}

#[derive(Clone)]
pub struct UsageLogsRepository {
    pool: Pool<Postgres>,
}

impl UsageLogsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List all usage logs, newest first
    pub async fn list_all(&self) -> AppResult<Vec<UsageLog>> {
        let logs = sqlx::query_as::<_, UsageLog>(
            "SELECT * FROM usage_logs ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(logs)
    }

    /// List usage logs for one asset, newest first
    pub async fn list_by_asset(&self, asset_id: Uuid) -> AppResult<Vec<UsageLog>> {
        let logs = sqlx::query_as::<_, UsageLog>(
            "SELECT * FROM usage_logs WHERE asset_id = $1 ORDER BY created_at DESC",
        )
        .bind(asset_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(logs)
    }

    /// List one asset's logs inside an open transaction, so a consistency
    /// pass sees the writes that precede it in the same unit of work
    pub async fn list_by_asset_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        asset_id: Uuid,
    ) -> AppResult<Vec<UsageLog>> {
        let logs = sqlx::query_as::<_, UsageLog>(
            "SELECT * FROM usage_logs WHERE asset_id = $1 ORDER BY created_at DESC",
        )
        .bind(asset_id)
        .fetch_all(&mut **tx)
        .await?;
        Ok(logs)
    }

    /// Get usage log by ID
    pub async fn get_by_id(&self, id: Uuid) -> AppResult<UsageLog> {
        sqlx::query_as::<_, UsageLog>("SELECT * FROM usage_logs WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Usage log {} not found", id)))
    }

    /// Insert a new usage log inside an open transaction
    pub async fn insert_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        record: &UsageLogRecord,
    ) -> AppResult<UsageLog> {
        let log = sqlx::query_as::<_, UsageLog>(
            r#"
            INSERT INTO usage_logs (
                id, asset_id, project_id, test_profile_id, operator,
                start_time, end_time, status, notes, selected_config_ids,
                selected_waterfall, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(record.asset_id)
        .bind(record.project_id)
        .bind(record.test_profile_id)
        .bind(&record.operator)
        .bind(record.start_time)
        .bind(record.end_time)
        .bind(record.status)
        .bind(&record.notes)
        .bind(&record.selected_config_ids)
        .bind(&record.selected_waterfall)
        .bind(Utc::now())
        .fetch_one(&mut **tx)
        .await?;
        Ok(log)
    }

    /// Overwrite a usage log inside an open transaction
    pub async fn update_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        id: Uuid,
        record: &UsageLogRecord,
    ) -> AppResult<UsageLog> {
        sqlx::query_as::<_, UsageLog>(
            r#"
            UPDATE usage_logs SET
                asset_id = $2, project_id = $3, test_profile_id = $4,
                operator = $5, start_time = $6, end_time = $7, status = $8,
                notes = $9, selected_config_ids = $10, selected_waterfall = $11
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(record.asset_id)
        .bind(record.project_id)
        .bind(record.test_profile_id)
        .bind(&record.operator)
        .bind(record.start_time)
        .bind(record.end_time)
        .bind(record.status)
        .bind(&record.notes)
        .bind(&record.selected_config_ids)
        .bind(&record.selected_waterfall)
        .fetch_optional(&mut **tx)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Usage log {} not found", id)))
    }

    /// Delete a usage log inside an open transaction
    pub async fn delete_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        id: Uuid,
    ) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM usage_logs WHERE id = $1")
            .bind(id)
            .execute(&mut **tx)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Usage log {} not found", id)));
        }
        Ok(())
    }
}
