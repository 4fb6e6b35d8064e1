//! Repair tickets repository for database operations

use chrono::Utc;
use sqlx::types::Json;
use sqlx::{Pool, Postgres, Transaction};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::enums::RepairStatus,
    models::repair_ticket::{RepairTicket, TicketTransition},
};

#[derive(Clone)]
pub struct RepairTicketsRepository {
    pool: Pool<Postgres>,
}

impl RepairTicketsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List tickets, optionally filtered by status and/or asset, most
    /// recently touched first
    pub async fn list(
        &self,
        status: Option<RepairStatus>,
        asset_id: Option<Uuid>,
    ) -> AppResult<Vec<RepairTicket>> {
        let tickets = sqlx::query_as::<_, RepairTicket>(
            r#"
            SELECT * FROM repair_tickets
            WHERE ($1::smallint IS NULL OR status = $1)
              AND ($2::uuid IS NULL OR asset_id = $2)
            ORDER BY COALESCE(updated_at, created_at) DESC
            "#,
        )
        .bind(status.map(|s| s as i16))
        .bind(asset_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(tickets)
    }

    /// Get ticket by ID
    pub async fn get_by_id(&self, id: Uuid) -> AppResult<RepairTicket> {
        sqlx::query_as::<_, RepairTicket>("SELECT * FROM repair_tickets WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Repair ticket {} not found", id)))
    }

    /// Is there a non-completed ticket for this asset (optionally ignoring
    /// one ticket)?
    pub async fn has_open_for_asset(
        &self,
        asset_id: Uuid,
        exclude: Option<Uuid>,
    ) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM repair_tickets
                WHERE asset_id = $1 AND status != $2
                  AND ($3::uuid IS NULL OR id != $3)
            )
            "#,
        )
        .bind(asset_id)
        .bind(RepairStatus::Completed)
        .bind(exclude)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    /// Transaction-scoped variant of [`Self::has_open_for_asset`], used when
    /// the answer decides a write in the same unit of work
    pub async fn has_open_for_asset_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        asset_id: Uuid,
        exclude: Option<Uuid>,
    ) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM repair_tickets
                WHERE asset_id = $1 AND status != $2
                  AND ($3::uuid IS NULL OR id != $3)
            )
            "#,
        )
        .bind(asset_id)
        .bind(RepairStatus::Completed)
        .bind(exclude)
        .fetch_one(&mut **tx)
        .await?;
        Ok(exists)
    }

    /// Insert a new ticket inside an open transaction
    pub async fn insert_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        ticket: &RepairTicket,
    ) -> AppResult<RepairTicket> {
        let row = sqlx::query_as::<_, RepairTicket>(
            r#"
            INSERT INTO repair_tickets (
                id, asset_id, status, problem_desc, vendor_name, quote_amount,
                quote_at, expected_return_at, completed_at, timeline,
                created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING *
            "#,
        )
        .bind(ticket.id)
        .bind(ticket.asset_id)
        .bind(ticket.status)
        .bind(&ticket.problem_desc)
        .bind(&ticket.vendor_name)
        .bind(ticket.quote_amount)
        .bind(ticket.quote_at)
        .bind(ticket.expected_return_at)
        .bind(ticket.completed_at)
        .bind(&ticket.timeline)
        .bind(ticket.created_at)
        .bind(ticket.updated_at)
        .fetch_one(&mut **tx)
        .await?;
        Ok(row)
    }

    /// Overwrite a ticket's mutable columns inside an open transaction. The
    /// timeline column is only ever replaced with a superset of its rows;
    /// the service layer appends, never rewrites history.
    pub async fn save_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        ticket: &RepairTicket,
    ) -> AppResult<RepairTicket> {
        sqlx::query_as::<_, RepairTicket>(
            r#"
            UPDATE repair_tickets SET
                status = $2, problem_desc = $3, vendor_name = $4,
                quote_amount = $5, quote_at = $6, expected_return_at = $7,
                completed_at = $8, timeline = $9, updated_at = $10
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(ticket.id)
        .bind(ticket.status)
        .bind(&ticket.problem_desc)
        .bind(&ticket.vendor_name)
        .bind(ticket.quote_amount)
        .bind(ticket.quote_at)
        .bind(ticket.expected_return_at)
        .bind(ticket.completed_at)
        .bind(&ticket.timeline)
        .bind(Utc::now())
        .fetch_optional(&mut **tx)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Repair ticket {} not found", ticket.id)))
    }

    /// Delete a ticket inside an open transaction
    pub async fn delete_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        id: Uuid,
    ) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM repair_tickets WHERE id = $1")
            .bind(id)
            .execute(&mut **tx)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Repair ticket {} not found", id)));
        }
        Ok(())
    }

    /// Count open tickets (dashboard figure)
    pub async fn count_open(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM repair_tickets WHERE status != $1",
        )
        .bind(RepairStatus::Completed)
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }
}

/// Build the synthetic creation timeline for a fresh ticket
pub fn creation_timeline(at: chrono::DateTime<Utc>) -> Json<Vec<TicketTransition>> {
    Json(vec![TicketTransition {
        at,
        from: None,
        to: RepairStatus::QuotePending,
        note: None,
    }])
}
