//! Settings endpoints
//!
//! LabWatch settings live in configuration files rather than the database,
//! so this surface is read-only: it reports the effective timeline and alert
//! settings the server is running with.

use axum::{extract::State, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::error::AppResult;

/// Timeline settings in effect
#[derive(Serialize, ToSchema)]
pub struct TimelineSettings {
    pub day_start_hour: u32,
    pub days_before: u32,
    pub days_after: u32,
}

/// Alert thresholds in effect
#[derive(Serialize, ToSchema)]
pub struct AlertSettings {
    pub calibration_days_threshold: i64,
    pub long_occupancy_hours_threshold: i64,
}

/// Settings response
#[derive(Serialize, ToSchema)]
pub struct SettingsResponse {
    pub timeline: TimelineSettings,
    pub alerts: AlertSettings,
    /// Default holiday region
    pub holiday_region: String,
}

/// Effective server settings
#[utoipa::path(
    get,
    path = "/settings",
    tag = "settings",
    responses(
        (status = 200, description = "Effective settings", body = SettingsResponse)
    )
)]
pub async fn get_settings(
    State(state): State<crate::AppState>,
) -> AppResult<Json<SettingsResponse>> {
    let config = &state.config;
    Ok(Json(SettingsResponse {
        timeline: TimelineSettings {
            day_start_hour: config.timeline.day_start_hour,
            days_before: config.timeline.days_before,
            days_after: config.timeline.days_after,
        },
        alerts: AlertSettings {
            calibration_days_threshold: config.alerts.calibration_days_threshold,
            long_occupancy_hours_threshold: config.alerts.long_occupancy_hours_threshold,
        },
        holiday_region: config.holidays.region.clone(),
    }))
}
