//! Shared domain enums

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// ---------------------------------------------------------------------------
// AssetType
// ---------------------------------------------------------------------------

/// Asset type codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[serde(rename_all = "kebab-case")]
#[repr(i16)]
pub enum AssetType {
    Chamber = 0,
    Instrument = 1,
    Fixture = 2,
    Other = 3,
}

impl std::fmt::Display for AssetType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            AssetType::Chamber => "Chamber",
            AssetType::Instrument => "Instrument",
            AssetType::Fixture => "Fixture",
            AssetType::Other => "Other",
        };
        write!(f, "{}", label)
    }
}

// ---------------------------------------------------------------------------
// AssetStatus
// ---------------------------------------------------------------------------

/// Asset status codes.
///
/// The stored value is a derived cache: usage-log reconciliation owns the
/// available/in-use pair, the repair ticket lifecycle owns maintenance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[serde(rename_all = "kebab-case")]
#[repr(i16)]
pub enum AssetStatus {
    Available = 0,
    InUse = 1,
    Maintenance = 2,
}

impl std::fmt::Display for AssetStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            AssetStatus::Available => "available",
            AssetStatus::InUse => "in-use",
            AssetStatus::Maintenance => "maintenance",
        };
        write!(f, "{}", label)
    }
}

// ---------------------------------------------------------------------------
// UsageStatus
// ---------------------------------------------------------------------------

/// Usage log status codes.
///
/// Doubles as the stored status (what the user last set) and the effective
/// status (recomputed against the clock, see `scheduling::status`). The
/// stored value is never trusted for display on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[serde(rename_all = "kebab-case")]
#[repr(i16)]
pub enum UsageStatus {
    NotStarted = 0,
    InProgress = 1,
    Completed = 2,
    Overdue = 3,
}

impl std::fmt::Display for UsageStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            UsageStatus::NotStarted => "not-started",
            UsageStatus::InProgress => "in-progress",
            UsageStatus::Completed => "completed",
            UsageStatus::Overdue => "overdue",
        };
        write!(f, "{}", label)
    }
}

// ---------------------------------------------------------------------------
// RepairStatus
// ---------------------------------------------------------------------------

/// Repair ticket status codes. `Completed` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[serde(rename_all = "kebab-case")]
#[repr(i16)]
pub enum RepairStatus {
    QuotePending = 0,
    RepairPending = 1,
    Completed = 2,
}

impl RepairStatus {
    /// A ticket in a non-terminal state keeps the asset in maintenance
    pub fn is_open(self) -> bool {
        self != RepairStatus::Completed
    }
}

impl std::fmt::Display for RepairStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            RepairStatus::QuotePending => "quote-pending",
            RepairStatus::RepairPending => "repair-pending",
            RepairStatus::Completed => "completed",
        };
        write!(f, "{}", label)
    }
}

// ---------------------------------------------------------------------------
// DayKind
// ---------------------------------------------------------------------------

/// Calendar day classification for timeline shading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum DayKind {
    Weekday,
    WeekendRest,
    PublicHolidayLowWage,
    PublicHolidayHighWage,
    /// A weekend day declared a working day (holiday make-up shift)
    WorkdayOverride,
}
