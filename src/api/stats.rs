//! Dashboard statistics endpoints

use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::AppResult;

/// Asset whose calibration is due (or already expired)
#[derive(Serialize, ToSchema)]
pub struct CalibrationAlert {
    pub asset_id: Uuid,
    pub asset_name: String,
    pub calibration_date: DateTime<Utc>,
    pub expired: bool,
}

/// Usage log that has been occupying its asset unusually long
#[derive(Serialize, ToSchema)]
pub struct LongOccupancyAlert {
    pub log_id: Uuid,
    pub asset_id: Uuid,
    pub operator: String,
    pub started_at: DateTime<Utc>,
    pub hours: i64,
}

/// Dashboard overview counters and alerts
#[derive(Serialize, ToSchema)]
pub struct StatsOverview {
    pub assets_total: i64,
    pub assets_available: i64,
    pub assets_in_use: i64,
    pub assets_maintenance: i64,
    pub usage_logs_total: i64,
    /// Logs whose effective status occupies an asset right now
    pub occupying_now: i64,
    /// Logs effectively overdue right now
    pub overdue_now: i64,
    pub open_tickets: i64,
    pub calibration_due: Vec<CalibrationAlert>,
    pub long_occupancy: Vec<LongOccupancyAlert>,
}

/// Dashboard overview
#[utoipa::path(
    get,
    path = "/stats",
    tag = "stats",
    responses(
        (status = 200, description = "Dashboard overview", body = StatsOverview)
    )
)]
pub async fn get_stats(State(state): State<crate::AppState>) -> AppResult<Json<StatsOverview>> {
    Ok(Json(state.services.stats.overview().await?))
}
