//! Usage log (reservation/run record) model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::enums::UsageStatus;

/// Usage log from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct UsageLog {
    pub id: Uuid,
    pub asset_id: Uuid,
    pub project_id: Option<Uuid>,
    pub test_profile_id: Option<Uuid>,
    /// Name of the person running the test
    pub operator: String,
    pub start_time: DateTime<Utc>,
    /// Absent while the run is open-ended
    pub end_time: Option<DateTime<Utc>>,
    /// Stored status; display always goes through the effective-status
    /// resolver instead of trusting this value
    pub status: UsageStatus,
    pub notes: Option<String>,
    /// Selected project configs; each fans out into its own timeline bar
    pub selected_config_ids: Option<Vec<Uuid>>,
    pub selected_waterfall: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Create usage log request. Times are accepted as strings and parsed
/// leniently (legacy exports use a few different formats).
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateUsageLog {
    pub asset_id: Uuid,
    pub project_id: Option<Uuid>,
    pub test_profile_id: Option<Uuid>,
    #[validate(length(min = 1, max = 100))]
    pub operator: String,
    pub start_time: String,
    pub end_time: Option<String>,
    pub status: Option<UsageStatus>,
    #[validate(length(max = 2000))]
    pub notes: Option<String>,
    pub selected_config_ids: Option<Vec<Uuid>>,
    pub selected_waterfall: Option<String>,
}

/// Update usage log request. Absent fields are left untouched; an explicit
/// `null` end_time clears the end and reopens the run.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateUsageLog {
    pub asset_id: Option<Uuid>,
    pub project_id: Option<Uuid>,
    pub test_profile_id: Option<Uuid>,
    #[validate(length(min = 1, max = 100))]
    pub operator: Option<String>,
    pub start_time: Option<String>,
    #[serde(default, with = "serde_with::rust::double_option")]
    #[schema(value_type = Option<String>, nullable)]
    pub end_time: Option<Option<String>>,
    pub status: Option<UsageStatus>,
    #[validate(length(max = 2000))]
    pub notes: Option<String>,
    pub selected_config_ids: Option<Vec<Uuid>>,
    pub selected_waterfall: Option<String>,
}
