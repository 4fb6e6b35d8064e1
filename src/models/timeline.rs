//! Timeline view models (derived, never persisted)

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use super::enums::{DayKind, UsageStatus};

/// One display interval fed to the track layout engine. A usage log with
/// selected configs produces one interval per config, all sharing the log's
/// time window; a log without configs produces a single default interval.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimelineInterval {
    /// Log ID, or `{log_id}:{config_id}` for fanned-out rows
    pub interval_id: String,
    pub asset_id: Uuid,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub effective_status: UsageStatus,
}

/// Transient layout output: which display lane an interval landed on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackAssignment {
    pub interval: TimelineInterval,
    pub track_index: usize,
}

/// One day header in the scrollable window
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CalendarDay {
    /// Instant the logical day starts (at the configured day-start hour)
    pub starts_at: DateTime<Utc>,
    pub date: NaiveDate,
    pub kind: DayKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub is_today: bool,
}

/// One render-ready bar inside an asset lane
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TimelineBar {
    pub display_id: String,
    pub log_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_id: Option<Uuid>,
    /// Composed caption (project / config / waterfall / profile, falling
    /// back to the operator name)
    pub label: String,
    pub operator: String,
    pub start_time: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<DateTime<Utc>>,
    pub effective_status: UsageStatus,
    pub track_index: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// One asset row in the timeline
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AssetLane {
    pub asset_id: Uuid,
    pub asset_name: String,
    /// Number of stacked tracks; sizes the row height client-side
    pub max_tracks: usize,
    pub bars: Vec<TimelineBar>,
}

/// Full render feed for the scrollable timeline
#[derive(Debug, Serialize, ToSchema)]
pub struct TimelineView {
    pub window_start: DateTime<Utc>,
    pub window_end: DateTime<Utc>,
    pub day_start_hour: u32,
    pub days: Vec<CalendarDay>,
    pub lanes: Vec<AssetLane>,
    /// Best-effort notices (e.g. holiday data missing for a year in view)
    pub warnings: Vec<String>,
}
