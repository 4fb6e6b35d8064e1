//! Timeline endpoints

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{error::AppResult, models::timeline::TimelineView};

/// Query parameters for the timeline window
#[derive(Debug, Deserialize, IntoParams)]
pub struct TimelineQuery {
    /// Days before today's logical day (defaults from configuration)
    pub days_before: Option<u32>,
    /// Days after today's logical day (defaults from configuration)
    pub days_after: Option<u32>,
    /// Holiday region override (e.g. "cn", "tw")
    pub region: Option<String>,
}

/// Render feed for the scrollable timeline
#[utoipa::path(
    get,
    path = "/timeline",
    tag = "timeline",
    params(TimelineQuery),
    responses(
        (status = 200, description = "Timeline view", body = TimelineView)
    )
)]
pub async fn get_timeline(
    State(state): State<crate::AppState>,
    Query(query): Query<TimelineQuery>,
) -> AppResult<Json<TimelineView>> {
    let view = state
        .services
        .timeline
        .build(query.days_before, query.days_after, query.region)
        .await?;
    Ok(Json(view))
}
