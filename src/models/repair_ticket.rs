//! Repair ticket model and related types

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::enums::RepairStatus;

/// One immutable entry in a ticket's audit timeline
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TicketTransition {
    pub at: DateTime<Utc>,
    /// Absent on the synthetic creation entry
    pub from: Option<RepairStatus>,
    pub to: RepairStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Repair ticket from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct RepairTicket {
    pub id: Uuid,
    pub asset_id: Uuid,
    pub status: RepairStatus,
    pub problem_desc: String,
    pub vendor_name: Option<String>,
    #[schema(value_type = Option<f64>)]
    pub quote_amount: Option<Decimal>,
    pub quote_at: Option<DateTime<Utc>>,
    /// Date the vendor promised the asset back
    pub expected_return_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    /// Append-only audit trail, never edited or truncated
    #[schema(value_type = Vec<TicketTransition>)]
    pub timeline: Json<Vec<TicketTransition>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Create repair ticket request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateRepairTicket {
    pub asset_id: Uuid,
    #[validate(length(min = 1, max = 2000))]
    pub problem_desc: String,
    pub expected_return_at: Option<String>,
}

/// Edit request for a ticket's descriptive fields (never its state)
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateRepairTicket {
    #[validate(length(min = 1, max = 2000))]
    pub problem_desc: Option<String>,
    pub vendor_name: Option<String>,
    #[schema(value_type = Option<f64>)]
    pub quote_amount: Option<Decimal>,
    #[serde(default, with = "serde_with::rust::double_option")]
    #[schema(value_type = Option<String>, nullable)]
    pub expected_return_at: Option<Option<String>>,
}

/// State machine transition request
#[derive(Debug, Deserialize, ToSchema)]
pub struct TransitionRepairTicket {
    pub to: RepairStatus,
    pub note: Option<String>,
    /// Required together with `quote_amount` when entering repair-pending
    pub vendor_name: Option<String>,
    #[schema(value_type = Option<f64>)]
    pub quote_amount: Option<Decimal>,
}

/// Outcome of a ticket mutation: the ticket plus the asset-status write
/// that committed with it
#[derive(Debug, Serialize, ToSchema)]
pub struct TicketOutcome {
    pub ticket: RepairTicket,
    pub asset_status_write: Option<super::asset::StatusWrite>,
}
