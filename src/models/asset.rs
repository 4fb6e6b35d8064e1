//! Asset model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::enums::{AssetStatus, AssetType};

/// Asset record from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Asset {
    pub id: Uuid,
    pub asset_type: AssetType,
    pub name: String,
    pub status: AssetStatus,
    pub category: Option<String>,
    pub asset_code: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub serial_number: Option<String>,
    pub manufacturer: Option<String>,
    pub model: Option<String>,
    pub owner: Option<String>,
    pub tags: Option<Vec<String>>,
    pub calibration_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Create asset request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateAsset {
    pub asset_type: AssetType,
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    /// Initial status; defaults to available
    pub status: Option<AssetStatus>,
    pub category: Option<String>,
    pub asset_code: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub serial_number: Option<String>,
    pub manufacturer: Option<String>,
    pub model: Option<String>,
    pub owner: Option<String>,
    pub tags: Option<Vec<String>>,
    /// Calibration expiry (RFC 3339 or `YYYY-MM-DD`)
    pub calibration_date: Option<String>,
}

/// Update asset request. Absent fields are left untouched.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateAsset {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    pub status: Option<AssetStatus>,
    pub category: Option<String>,
    pub asset_code: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub serial_number: Option<String>,
    pub manufacturer: Option<String>,
    pub model: Option<String>,
    pub owner: Option<String>,
    pub tags: Option<Vec<String>>,
    pub calibration_date: Option<String>,
}

/// One corrective write proposed by the status reconciler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct StatusWrite {
    pub asset_id: Uuid,
    pub new_status: AssetStatus,
}
