//! Data models for LabWatch

pub mod asset;
pub mod enums;
pub mod holiday;
pub mod project;
pub mod repair_ticket;
pub mod timeline;
pub mod usage_log;

// Re-export commonly used types
pub use asset::{Asset, StatusWrite};
pub use enums::{AssetStatus, AssetType, DayKind, RepairStatus, UsageStatus};
pub use holiday::{DayClassification, HolidayDetail, HolidayTable};
pub use project::{Project, TestProfile};
pub use repair_ticket::{RepairTicket, TicketTransition};
pub use timeline::{TimelineInterval, TrackAssignment};
pub use usage_log::UsageLog;
